//! Widget-facing contract.
//!
//! Producers implement [`Renderable`] and are registered with the
//! [`Renderer`](crate::Renderer). Each tick the scheduler calls
//! [`Renderable::render`] on every registered producer, in layer order.
//! Animated producers step a [`Cycle`] from inside `render` instead of
//! keeping their own timers.

mod cycle;
mod traits;

pub use cycle::Cycle;
pub use traits::{Renderable, RenderableId};
