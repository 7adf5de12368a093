use crate::{
    dims::Dims,
    grid::{CellWall, Grid},
};

/// Depth-first search from the entrance to the exit.
///
/// Directions are tried in the order of [`CellWall::get_in_order`] (up, right, down, left), so
/// on grids with loops the first path in that order is the one found.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

struct Frame {
    pos: Dims,
    next: usize,
}

enum Step {
    Found,
    Descend,
    Blocked,
}

impl Solver {
    /// Marks a path from [`Grid::entrance`] to [`Grid::exit`] and returns whether one exists.
    ///
    /// Cells explored on the way are marked visited and the flags are not cleared afterwards.
    /// Calling this again without [`Grid::reset_visited`] finds the entrance already visited and
    /// returns `false`, unless the entrance is the exit.
    pub fn solve(&self, grid: &mut Grid) -> bool {
        let mut stack = Vec::new();
        let entrance = grid.entrance();

        match Self::enter(grid, entrance, &mut stack) {
            Step::Found => return true,
            Step::Blocked => return false,
            Step::Descend => {}
        }

        let order = CellWall::get_in_order();
        while let Some(frame) = stack.last_mut() {
            let Some(&wall) = order.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let pos = frame.pos;
            if grid.has_wall(pos, wall) {
                continue;
            }

            if let Step::Found = Self::enter(grid, pos + wall.to_coord(), &mut stack) {
                for frame in &stack {
                    if let Some(cell) = grid.get_cell_mut(frame.pos) {
                        cell.set_on_path(true);
                    }
                }
                log::debug!("Found path of {} cells", grid.solution_len());
                return true;
            }
        }

        log::debug!("No path from {:?} to {:?}", grid.entrance(), grid.exit());
        false
    }

    fn enter(grid: &mut Grid, pos: Dims, stack: &mut Vec<Frame>) -> Step {
        if pos == grid.exit() {
            if let Some(cell) = grid.get_cell_mut(pos) {
                cell.set_on_path(true);
            }
            return Step::Found;
        }

        match grid.get_cell_mut(pos) {
            Some(cell) if !cell.is_visited() => {
                cell.set_visited(true);
                stack.push(Frame { pos, next: 0 });
                Step::Descend
            }
            _ => Step::Blocked,
        }
    }
}

/// Shorthand for [`Solver::solve`].
pub fn solve(grid: &mut Grid) -> bool {
    Solver.solve(grid)
}
