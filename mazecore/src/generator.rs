use std::{fmt, sync::Arc};

use rand::{seq::SliceRandom as _, thread_rng, Rng as _, RngCore, SeedableRng as _};
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{CellWall, Grid, GridError},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Carves passages into a fully walled grid.
///
/// Implementations may use the visited flags freely, [`Generator`] resets them afterwards.
pub trait MazeAlgorithm: fmt::Debug + Sync + Send {
    fn carve(&self, grid: &mut Grid, rng: &mut dyn RngCore);
}

/// Randomized depth-first backtracking.
///
/// Produces a perfect maze: every cell is reachable and there is exactly one path between any
/// two cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl MazeAlgorithm for DepthFirstSearch {
    fn carve(&self, grid: &mut Grid, rng: &mut dyn RngCore) {
        let start = grid.entrance();
        let mut stack = Vec::with_capacity(grid.cell_count());

        if let Some(cell) = grid.get_cell_mut(start) {
            cell.set_visited(true);
            stack.push(start);
        }

        while let Some(&current) = stack.last() {
            let unvisited_neighbors = grid
                .get_neighbors_pos(current)
                .into_iter()
                .filter(|&pos| !grid.is_visited(pos))
                .collect::<SmallVec<[_; 4]>>();

            let Some(&next) = unvisited_neighbors.choose(rng) else {
                stack.pop();
                continue;
            };

            if let Some(wall) = Grid::which_wall_between(current, next) {
                grid.remove_wall(current, wall);
            }
            if let Some(cell) = grid.get_cell_mut(next) {
                cell.set_visited(true);
            }
            stack.push(next);
        }
    }
}

/// Builds complete mazes: carves passages, opens the entrance and the exit and leaves the grid
/// ready for solving.
#[derive(Debug, Clone)]
pub struct Generator {
    seed: u64,
    algorithm: Arc<dyn MazeAlgorithm>,
}

impl Generator {
    /// Uses the given seed, or a random one when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed: seed.unwrap_or_else(|| thread_rng().gen()),
            algorithm: Arc::new(DepthFirstSearch),
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl MazeAlgorithm + 'static) -> Self {
        self.algorithm = Arc::new(algorithm);
        self
    }

    /// Seed every maze from this generator is built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a new maze of the given size. Same seed and size always give the same maze.
    pub fn generate(&self, size: Dims) -> Result<Grid, GridError> {
        let mut grid = Grid::new_dims(size)?;
        let mut rng = Random::seed_from_u64(self.seed);

        log::debug!("Generating {}x{} maze, seed {}", size.0, size.1, self.seed);
        self.generate_with(&mut grid, &mut rng);

        Ok(grid)
    }

    /// Runs all generation phases on `grid` with a caller supplied random source.
    ///
    /// `grid` is expected to be fully walled and unvisited, as returned by [`Grid::new`].
    pub fn generate_with(&self, grid: &mut Grid, rng: &mut dyn RngCore) {
        self.algorithm.carve(grid, rng);

        let (entrance, exit) = (grid.entrance(), grid.exit());
        grid.open_boundary(entrance, CellWall::Left);
        grid.open_boundary(exit, CellWall::Right);

        grid.reset_visited();

        log::trace!(
            "Carved {} passages into {} cells",
            grid.passage_count(),
            grid.cell_count()
        );
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(None)
    }
}
