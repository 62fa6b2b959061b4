//! Buffer module: Core data structures for the double-buffered grid.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display, with the Empty/Cleared sentinels
//! - [`Color`] / [`Rgba`]: Tagged colors and the true-color value
//! - [`Attributes`]: Text attribute bitflags
//! - [`CellBuffer`]: A plain cell array, also used for off-screen sub-grids
//! - [`Grid`]: Front and shadow buffers plus the drawing primitives
//! - [`palette`] / [`BorderStyle`]: Static color and border tables

mod border;
#[allow(clippy::module_inception)]
mod buffer;
mod cell;
mod grid;
pub mod palette;

pub use border::{BorderGlyphs, BorderStyle};
pub use buffer::CellBuffer;
pub use cell::{Attributes, Cell, CellKind, Color, Rgba};
pub use grid::Grid;
