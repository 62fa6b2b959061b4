//! Terminal module: Output staging and terminal session control.

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::TerminalSession;
