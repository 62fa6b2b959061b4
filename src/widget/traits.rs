//! Renderable trait: The contract between producers and the scheduler.

use crate::buffer::Grid;
use std::fmt;

/// A producer invoked once per scheduler tick.
///
/// Implementors re-issue their drawing primitives from [`render`] and blank
/// whatever they occupy from [`clear`]. The scheduler calls `render` in
/// ascending [`layer`] order, so higher layers paint over lower ones.
///
/// [`render`]: Renderable::render
/// [`clear`]: Renderable::clear
/// [`layer`]: Renderable::layer
pub trait Renderable: Send {
    /// Draw onto the grid.
    fn render(&mut self, grid: &mut Grid);

    /// Blank the region this producer occupies.
    ///
    /// Called once, right before the producer is dropped from the list.
    fn clear(&mut self, grid: &mut Grid);

    /// Paint order. Lower layers draw first.
    fn layer(&self) -> i32 {
        0
    }

    /// Whether the producer wants to be removed on the next tick.
    fn is_removed(&self) -> bool {
        false
    }
}

/// Handle returned by registration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableId(pub(crate) u64);

impl RenderableId {
    /// The raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RenderableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderableId({})", self.0)
    }
}
