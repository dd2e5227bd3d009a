//! Parallel flood fill over a 2D grid of one-byte colors.
//!
//! ```no_run
//! use flood_fill::{Grid, fill};
//!
//! let mut grid = Grid::new(100, 120, b'_')?;
//! grid.fill_rect(30..70, 25..65, b'\\');
//! let stats = fill(&mut grid, 2, 3, b'G')?;
//! println!("{} cells recolored", stats.cells_filled);
//! # Ok::<(), flood_fill::FloodError>(())
//! ```

pub mod error;
pub mod export;
pub mod fill;
pub mod grid;
pub mod shapes;

pub use error::{FloodError, Result};
pub use fill::{FillParameters, FillStats, FloodFill, fill};
pub use grid::{Grid, GridPoint, Neighbor};
