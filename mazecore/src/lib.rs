//! Perfect maze generation and solving on a rectangular grid.
//!
//! A [`Generator`] carves a maze into a fresh [`Grid`], [`Solver`] marks the path from the
//! entrance to the exit and [`GridView`] draws the result as text.

pub mod array;
pub mod dims;
pub mod generator;
pub mod grid;
pub mod render;
pub mod solver;

pub use dims::Dims;
pub use generator::{DepthFirstSearch, Generator, MazeAlgorithm, Random};
pub use grid::{Cell, CellWall, Grid, GridError, MAX_CELLS};
pub use render::{GridView, RenderMode};
pub use solver::{solve, Solver};
