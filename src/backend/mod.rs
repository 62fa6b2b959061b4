//! Backends: Turn a [`Grid`] into terminal output.
//!
//! Two strategies share the [`Backend`] contract:
//! - [`StreamRenderer`]: one escape-coded text payload per frame, with
//!   run-length style coalescing and minimal cursor repositioning
//! - [`CellArrayRenderer`]: a full blit of fixed-width cell records in the
//!   console's 16-color format
//!
//! Each backend owns its change detection. A flush that finds nothing new
//! writes nothing.

mod ansi;
mod native;

pub use ansi::{FrameSummary, StreamRenderer};
pub use native::{CellArrayRenderer, CellRecord, ConsoleSink, CrosstermSink};

use crate::buffer::Grid;
use crate::config::ColorDepth;
use crate::error::{Error, Result};
use std::io;

/// Concrete output strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Escape-sequence stream.
    Ansi,
    /// Console cell-array blit.
    Native,
}

impl RenderMode {
    /// Probe the hosting terminal.
    ///
    /// Consoles that cannot interpret escape sequences get the native
    /// backend; everything else gets ANSI.
    pub fn detect() -> Self {
        #[cfg(windows)]
        {
            if !crossterm::ansi_support::supports_ansi() {
                return Self::Native;
            }
        }
        Self::Ansi
    }
}

/// Grid-to-terminal output strategy.
pub trait Backend: Send {
    /// Which strategy this is.
    fn mode(&self) -> RenderMode;

    /// Detect changes in `grid` and, if there are any, write a frame.
    ///
    /// Returns `Ok(true)` when a frame was written. A failed write leaves
    /// the backend primed to retry the same frame on the next call.
    fn flush(&mut self, grid: &mut Grid) -> Result<bool>;

    /// Blank the physical screen and forget what is on it.
    fn clear_screen(&mut self) -> Result<()>;
}

/// Build the backend for `mode`, writing to stdout.
///
/// Returns [`Error::BackendUnavailable`] if the console cannot be reached.
pub fn create(mode: RenderMode, depth: ColorDepth) -> Result<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = match mode {
        RenderMode::Ansi => Box::new(StreamRenderer::new(io::stdout(), depth)),
        RenderMode::Native => {
            crossterm::terminal::size()
                .map_err(|e| Error::BackendUnavailable(format!("console handle: {e}")))?;
            Box::new(CellArrayRenderer::new(CrosstermSink::new(io::stdout())))
        }
    };
    log::debug!("created {mode:?} backend");
    Ok(backend)
}
