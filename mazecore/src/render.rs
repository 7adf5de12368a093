use std::fmt;

use crate::{
    dims::Dims,
    grid::{CellWall, Grid},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Walls only.
    #[default]
    Plain,
    /// Walls and a `*` in every cell on the solution path.
    Solution,
}

/// Text rendering of a [`Grid`].
///
/// Each row of cells is drawn as a line of top walls (`+---` or `+   `) and a line of left walls
/// and cell contents. Every cell line ends with `|` except the last one, which is where the exit
/// is. A line of bottom walls closes the maze.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
    mode: RenderMode,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid, mode: RenderMode) -> Self {
        Self { grid, mode }
    }

    pub fn plain(grid: &'a Grid) -> Self {
        Self::new(grid, RenderMode::Plain)
    }

    pub fn solution(grid: &'a Grid) -> Self {
        Self::new(grid, RenderMode::Solution)
    }

    fn cell_content(&self, pos: Dims) -> &'static str {
        if self.mode == RenderMode::Solution && self.grid.is_on_path(pos) {
            " * "
        } else {
            "   "
        }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Dims(width, height) = self.grid.size();

        for y in 0..height {
            for x in 0..width {
                let top = self.grid.has_wall(Dims(x, y), CellWall::Top);
                f.write_str(if top { "+---" } else { "+   " })?;
            }
            f.write_str("+\n")?;

            for x in 0..width {
                let pos = Dims(x, y);
                let left = self.grid.has_wall(pos, CellWall::Left);
                f.write_str(if left { "|" } else { " " })?;
                f.write_str(self.cell_content(pos))?;
            }
            f.write_str(if y == height - 1 { "\n" } else { "|\n" })?;
        }

        for _ in 0..width {
            f.write_str("+---")?;
        }
        f.write_str("+\n")
    }
}
