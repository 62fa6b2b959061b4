//! # Termframe
//!
//! A double-buffered terminal frame renderer.
//!
//! Producers draw into a cell [`Grid`] from their [`Renderable::render`]
//! callbacks. A background scheduler ticks at a fixed rate (20 Hz by
//! default), renders every registered producer in layer order, and asks the
//! active backend to flush. Nothing is written unless the grid changed.
//!
//! ## Core Concepts
//!
//! - **Front and shadow buffers**: the shadow holds what the terminal last
//!   showed; a flush starts by comparing the two
//! - **Streak coalescing**: the ANSI backend emits one style sequence per run
//!   of same-style cells and repositions the cursor only across gaps
//! - **Empty vs Cleared**: never-drawn cells emit nothing; cleared cells emit
//!   a reset once and then fold back to empty
//! - **Two backends**: an escape-sequence stream and a native 16-color cell
//!   array, picked at startup
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use termframe::{Color, Coord, Grid, Renderable, Renderer, RendererConfig};
//!
//! struct Box3;
//!
//! impl Renderable for Box3 {
//!     fn render(&mut self, grid: &mut Grid) {
//!         grid.draw_rect(Coord::new(2, 2), Coord::new(3, 1), Color::RED);
//!     }
//!
//!     fn clear(&mut self, grid: &mut Grid) {
//!         grid.clear_rect(Coord::new(2, 2), Coord::new(3, 1));
//!     }
//! }
//!
//! let renderer = Renderer::new(RendererConfig::default())?;
//! let id = renderer.register(Arc::new(Mutex::new(Box3)));
//! std::thread::sleep(std::time::Duration::from_millis(200));
//! renderer.unregister(id);
//! # Ok::<(), termframe::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;
pub mod layout;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{FrameStats, Renderer, TickReport};
pub use backend::{Backend, CellArrayRenderer, CellRecord, RenderMode, StreamRenderer};
pub use buffer::{Attributes, BorderStyle, Cell, CellBuffer, Color, Grid, Rgba};
pub use config::{ColorDepth, ModeSelector, RendererConfig};
pub use error::{Error, Result};
pub use layout::{Alignment, Coord, Rect};
pub use widget::{Cycle, Renderable, RenderableId};
