//! Render loop: One background thread ticking a shared stage.
//!
//! - **Stage**: grid, active backend and the registered producers, behind
//!   a single lock
//! - **Scheduler**: the render thread; every tick it renders producers in
//!   layer order and flushes
//! - **Renderer**: the context object that owns both plus the terminal
//!   session
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  register / with_grid  ┌──────────────────────────┐
//! │  Producers   │ ─────────────────────▶ │  Mutex<Stage>            │
//! │ (any thread) │                        │  Grid + Backend + list   │
//! └──────────────┘                        └──────────────────────────┘
//!                                                      ▲
//!                                         tick: render │ + flush
//!                                                      │
//!                                         ┌──────────────────────────┐
//!                                         │ termframe-render thread  │
//!                                         └──────────────────────────┘
//! ```

mod engine;
mod stage;
mod ticker;

pub use engine::Renderer;
pub use stage::{BackendFactory, FrameStats, SharedRenderable, Stage, TickReport};
pub use ticker::{remaining, Scheduler};
