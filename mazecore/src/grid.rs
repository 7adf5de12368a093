use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

use self::CellWall::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid maze size {0:?}, width and height must both be at least 1")]
    InvalidSize(Dims),
    #[error("maze size {0:?} has too many cells")]
    TooLarge(Dims),
}

/// Upper bound on `width * height` accepted by [`Grid::new`].
pub const MAX_CELLS: usize = 1 << 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    /// Walls in the order the solver tries them.
    pub fn get_in_order() -> [CellWall; 4] {
        [Top, Right, Bottom, Left]
    }

    pub fn to_coord(self) -> Dims {
        match self {
            Top => Dims(0, -1),
            Right => Dims(1, 0),
            Bottom => Dims(0, 1),
            Left => Dims(-1, 0),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    visited: bool,
    on_path: bool,
}

impl Cell {
    pub fn new() -> Cell {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
            on_path: false,
        }
    }

    pub(crate) fn remove_wall(&mut self, wall: CellWall) {
        match wall {
            Top => self.top = false,
            Right => self.right = false,
            Bottom => self.bottom = false,
            Left => self.left = false,
        }
    }

    pub fn get_wall(&self, wall: CellWall) -> bool {
        match wall {
            Top => self.top,
            Right => self.right,
            Bottom => self.bottom,
            Left => self.left,
        }
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    pub fn set_on_path(&mut self, on_path: bool) {
        self.on_path = on_path;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangular grid of cells.
///
/// Every internal wall is stored on both cells it separates and the two flags are only ever
/// changed together, see [`Grid::remove_wall`]. Outer walls can be opened separately with
/// [`Grid::open_boundary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a grid with all walls present and every cell unvisited.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::new_dims(Dims(width, height))
    }

    pub fn new_dims(size: Dims) -> Result<Self, GridError> {
        if !size.all_positive() {
            return Err(GridError::InvalidSize(size));
        }

        match (size.0 as usize).checked_mul(size.1 as usize) {
            Some(count) if count <= MAX_CELLS => {}
            _ => return Err(GridError::TooLarge(size)),
        }

        let cells = Array2D::new_dims(Cell::new(), size).ok_or(GridError::InvalidSize(size))?;
        Ok(Grid { cells })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn width(&self) -> i32 {
        self.size().0
    }

    pub fn height(&self) -> i32 {
        self.size().1
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell whose left wall is the entrance.
    pub fn entrance(&self) -> Dims {
        Dims::ZERO
    }

    /// Cell whose right wall is the exit.
    pub fn exit(&self) -> Dims {
        self.size() - Dims::ONE
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.width() && 0 <= pos.1 && pos.1 < self.height()
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn get_cell_mut(&mut self, pos: Dims) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    /// Whether the wall exists. Cells outside the grid are treated as fully walled.
    pub fn has_wall(&self, pos: Dims, wall: CellWall) -> bool {
        self.get_cell(pos).map_or(true, |cell| cell.get_wall(wall))
    }

    pub fn is_visited(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_visited)
    }

    pub fn is_on_path(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_on_path)
    }

    /// Returns the wall of `cell` facing `cell2`, if they are adjacent.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell2.0 - cell.0, cell2.1 - cell.1) {
            (0, -1) => Some(Top),
            (1, 0) => Some(Right),
            (0, 1) => Some(Bottom),
            (-1, 0) => Some(Left),
            _ => None,
        }
    }

    /// In-bounds orthogonal neighbors of `cell`.
    pub fn get_neighbors_pos(&self, cell: Dims) -> SmallVec<[Dims; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .map(|wall| cell + wall.to_coord())
            .filter(|&pos| self.is_in_bounds(pos))
            .collect()
    }

    /// Removes the wall pair between `cell` and its neighbor in direction `wall`.
    ///
    /// Returns `false` and leaves the grid untouched when either cell is outside the grid.
    pub fn remove_wall(&mut self, cell: Dims, wall: CellWall) -> bool {
        let neighbor = cell + wall.to_coord();
        match self.cells.get_pair_mut(cell, neighbor) {
            Some((current, next)) => {
                current.remove_wall(wall);
                next.remove_wall(wall.reverse_wall());
                true
            }
            None => false,
        }
    }

    /// Removes an outer wall of a boundary cell.
    ///
    /// Returns `false` when the wall separates two cells of the grid, those go through
    /// [`Grid::remove_wall`].
    pub fn open_boundary(&mut self, cell: Dims, wall: CellWall) -> bool {
        if self.is_in_bounds(cell + wall.to_coord()) {
            return false;
        }

        match self.get_cell_mut(cell) {
            Some(cell) => {
                cell.remove_wall(wall);
                true
            }
            None => false,
        }
    }

    /// Clears the visited flag of every cell.
    ///
    /// Generation and solving both use the flag, so this has to run between the two.
    pub fn reset_visited(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.set_visited(false));
    }

    pub fn clear_solution(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.set_on_path(false));
    }

    pub fn solution_len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_on_path()).count()
    }

    /// Number of removed internal wall pairs.
    pub fn passage_count(&self) -> usize {
        self.iter_pos()
            .map(|pos| {
                [Right, Bottom]
                    .into_iter()
                    .filter(|&wall| {
                        self.is_in_bounds(pos + wall.to_coord()) && !self.has_wall(pos, wall)
                    })
                    .count()
            })
            .sum()
    }

    /// Whether every cell can be reached from the entrance through removed walls.
    pub fn is_connected(&self) -> bool {
        let Some(mut seen) = Array2D::new_dims(false, self.size()) else {
            return false;
        };
        let mut stack = vec![self.entrance()];
        seen[self.entrance()] = true;
        let mut reached = 1;

        while let Some(pos) = stack.pop() {
            for wall in CellWall::get_in_order() {
                let next = pos + wall.to_coord();
                if self.has_wall(pos, wall) || !self.is_in_bounds(next) || seen[next] {
                    continue;
                }
                seen[next] = true;
                reached += 1;
                stack.push(next);
            }
        }

        reached == self.cell_count()
    }

    /// Whether both sides of every internal wall agree.
    pub fn walls_consistent(&self) -> bool {
        self.iter_pos().all(|pos| {
            [Right, Bottom].into_iter().all(|wall| {
                let next = pos + wall.to_coord();
                !self.is_in_bounds(next)
                    || self.has_wall(pos, wall) == self.has_wall(next, wall.reverse_wall())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_size() {
        assert_eq!(Grid::new(0, 3), Err(GridError::InvalidSize(Dims(0, 3))));
        assert_eq!(Grid::new(3, -1), Err(GridError::InvalidSize(Dims(3, -1))));
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn rejects_huge_size() {
        assert_eq!(
            Grid::new(i32::MAX, i32::MAX),
            Err(GridError::TooLarge(Dims(i32::MAX, i32::MAX)))
        );
        assert_eq!(
            Grid::new(1 << 14, (1 << 12) + 1),
            Err(GridError::TooLarge(Dims(1 << 14, (1 << 12) + 1)))
        );
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.cell_count(), 6);
        for pos in grid.iter_pos() {
            for wall in CellWall::get_in_order() {
                assert!(grid.has_wall(pos, wall));
            }
            assert!(!grid.is_visited(pos));
            assert!(!grid.is_on_path(pos));
        }
        assert_eq!(grid.passage_count(), 0);
        assert!(!grid.is_connected());
    }

    #[test]
    fn remove_wall_updates_both_sides() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.remove_wall(Dims(0, 0), Right));
        assert!(!grid.has_wall(Dims(0, 0), Right));
        assert!(!grid.has_wall(Dims(1, 0), Left));

        assert!(grid.remove_wall(Dims(1, 1), Top));
        assert!(!grid.has_wall(Dims(1, 1), Top));
        assert!(!grid.has_wall(Dims(1, 0), Bottom));

        assert!(grid.walls_consistent());
        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn remove_wall_on_boundary_is_ignored() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.remove_wall(Dims(0, 0), Left));
        assert!(!grid.remove_wall(Dims(1, 1), Bottom));
        assert!(grid.has_wall(Dims(0, 0), Left));
        assert!(grid.has_wall(Dims(1, 1), Bottom));
    }

    #[test]
    fn open_boundary_only_touches_outer_walls() {
        let mut grid = Grid::new(2, 1).unwrap();
        assert!(!grid.open_boundary(Dims(0, 0), Right));
        assert!(grid.has_wall(Dims(0, 0), Right));

        assert!(grid.open_boundary(Dims(0, 0), Left));
        assert!(!grid.has_wall(Dims(0, 0), Left));
        assert!(grid.walls_consistent());
    }

    #[test]
    fn which_wall_between() {
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(1, 0)), Some(Top));
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(2, 1)), Some(Right));
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(1, 2)), Some(Bottom));
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(0, 1)), Some(Left));
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(2, 2)), None);
        assert_eq!(Grid::which_wall_between(Dims(1, 1), Dims(1, 1)), None);
    }

    #[test]
    fn neighbors_are_bounds_checked() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.get_neighbors_pos(Dims(0, 0)).len(), 2);
        assert_eq!(grid.get_neighbors_pos(Dims(1, 0)).len(), 3);
        assert_eq!(grid.get_neighbors_pos(Dims(1, 1)).len(), 4);

        let single = Grid::new(1, 1).unwrap();
        assert!(single.get_neighbors_pos(Dims(0, 0)).is_empty());
    }

    #[test]
    fn reset_and_clear() {
        let mut grid = Grid::new(2, 2).unwrap();
        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            let cell = grid.get_cell_mut(pos).unwrap();
            cell.set_visited(true);
            cell.set_on_path(true);
        }
        assert_eq!(grid.solution_len(), 4);

        grid.reset_visited();
        assert!(grid.iter_pos().all(|pos| !grid.is_visited(pos)));
        assert_eq!(grid.solution_len(), 4);

        grid.clear_solution();
        assert_eq!(grid.solution_len(), 0);
    }

    #[test]
    fn out_of_bounds_queries() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.get_cell(Dims(2, 0)).is_none());
        assert!(grid.has_wall(Dims(-1, 0), Right));
        assert!(!grid.is_visited(Dims(0, 5)));
    }

    #[test]
    fn entrance_and_exit() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.entrance(), Dims(0, 0));
        assert_eq!(grid.exit(), Dims(3, 2));
    }
}
