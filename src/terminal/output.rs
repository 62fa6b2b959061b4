//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::{palette, Attributes, Color};
use crate::config::ColorDepth;
use std::io::Write;

/// Pre-allocated buffer for building one frame of escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()`
/// call to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

#[allow(clippy::len_without_is_empty)]
impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move the cursor to the top-left corner.
    #[inline]
    pub fn cursor_home(&mut self) {
        self.data.extend_from_slice(b"\x1b[H");
    }

    /// Move cursor to 0-indexed (x, y).
    ///
    /// Uses the most compact representation:
    /// - `\x1b[H` for home (1,1)
    /// - `\x1b[{row}H` for column 1
    /// - `\x1b[{row};{col}H` otherwise
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let row = u32::from(y) + 1;
        let col = u32::from(x) + 1;
        if row == 1 && col == 1 {
            self.cursor_home();
        } else if col == 1 {
            let _ = write!(self.data, "\x1b[{row}H");
        } else {
            let _ = write!(self.data, "\x1b[{row};{col}H");
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Emit one SGR sequence that fully establishes a style.
    ///
    /// The sequence starts with a reset so attributes from the previous run
    /// never leak. Non-concrete colors select the terminal default.
    pub fn set_style(&mut self, fg: Color, bg: Color, attrs: Attributes, depth: ColorDepth) {
        self.data.extend_from_slice(b"\x1b[0");
        for (flag, code) in Attributes::SGR_CODES {
            if attrs.contains(flag) {
                let _ = write!(self.data, ";{code}");
            }
        }
        self.color_params(fg, depth, Layer::Fg);
        self.color_params(bg, depth, Layer::Bg);
        self.data.push(b'm');
    }

    fn color_params(&mut self, color: Color, depth: ColorDepth, layer: Layer) {
        let Some(c) = color.rgba() else {
            let code = match layer {
                Layer::Fg => 39,
                Layer::Bg => 49,
            };
            let _ = write!(self.data, ";{code}");
            return;
        };
        match depth {
            ColorDepth::TrueColor => {
                let selector = match layer {
                    Layer::Fg => 38,
                    Layer::Bg => 48,
                };
                let _ = write!(self.data, ";{selector};2;{};{};{}", c.r, c.g, c.b);
            }
            ColorDepth::Palette16 => {
                let entry = palette::lookup(c.console_index());
                let code = match layer {
                    Layer::Fg => entry.fg_sgr,
                    Layer::Bg => entry.bg_sgr,
                };
                let _ = write!(self.data, ";{code}");
            }
        }
    }

    /// Flush to a writer in a single call.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer").field("len", &self.data.len()).finish()
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Fg,
    Bg,
}
