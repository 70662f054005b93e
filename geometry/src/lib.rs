//! Points, maps and weighted grids in two dimensions, with routing
//! provided by the `vagabond` search strategies.

#![deny(clippy::all)]

pub mod coord2d;
pub mod grid;

pub use coord2d::map::Map;
pub use coord2d::{Direction, ParsePointError, Point};
pub use grid::{Grid, GridPather, ParseGridError, StepCost};

/// Data type used for coordinates
pub type Position = i32;
