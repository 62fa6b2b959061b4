//! Error types for renderer construction, style lookups and flushing.

use std::io;
use thiserror::Error;

/// Renderer error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing a frame or driving the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The selected backend could not be brought up.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Border style name not present in the border table.
    #[error("Unknown border style: {0}")]
    UnknownBorderStyle(String),

    /// Text attribute name not recognized.
    #[error("Unknown text attribute: {0}")]
    UnknownAttribute(String),

    /// Render mode name not recognized.
    #[error("Unknown render mode: {0}")]
    UnknownMode(String),

    /// A grid cannot have a zero dimension.
    #[error("Invalid grid size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, Error>;
