//! Terminal session: enter and restore the terminal around a renderer.

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Restores the terminal state it changed when dropped.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    hide_cursor: bool,
}

impl TerminalSession {
    /// Switch to the alternate screen and hide the cursor as requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects a command.
    pub fn enter(alternate_screen: bool, hide_cursor: bool) -> io::Result<Self> {
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if hide_cursor {
            execute!(stdout, cursor::Hide)?;
        }
        Ok(Self {
            alternate_screen,
            hide_cursor,
        })
    }

    /// Current terminal size in columns and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is not attached to a terminal.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.hide_cursor {
            let _ = execute!(stdout, cursor::Show);
        }
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
    }
}
