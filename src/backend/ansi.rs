//! ANSI stream backend: Encode the whole grid as one escape-coded payload.
//!
//! When the grid is dirty the frame is written in row-major order:
//! 1. Home the cursor
//! 2. Group each row into streaks of cells sharing kind and style
//! 3. For every non-Empty streak: reposition only if the terminal cursor is
//!    not already at the streak start, emit one SGR, then the glyphs
//! 4. Reset attributes so later output is unaffected
//!
//! Empty cells never produce output. Cleared cells produce a reset and a
//! space, then fold back to Empty so they are written only once.

use super::{Backend, RenderMode};
use crate::buffer::{Cell, CellBuffer, CellKind, Grid};
use crate::config::ColorDepth;
use crate::error::Result;
use crate::terminal::OutputBuffer;
use std::io::Write;

/// Counters for the last encoded frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Streaks that produced output.
    pub streaks: usize,
    /// Cursor repositioning sequences, excluding the initial home.
    pub cursor_moves: usize,
    /// Cells written, including Cleared blanks.
    pub cells: usize,
    /// Payload size in bytes.
    pub bytes: usize,
}

/// A run of consecutive cells on one row sharing kind and style.
#[derive(Debug, Default)]
struct Streak {
    /// Column of the first cell.
    x: u16,
    /// Row.
    y: u16,
    /// First cell of the run, `None` when no run is open.
    template: Option<Cell>,
    /// Glyphs to write (stays empty for Empty runs).
    glyphs: String,
    /// Number of cells covered.
    len: u16,
}

impl Streak {
    fn accepts(&self, cell: &Cell) -> bool {
        // Kinds never mix, so a default-colored glyph next to a Cleared cell
        // costs an extra reset.
        self.template
            .is_some_and(|t| t.kind() == cell.kind() && t.same_style(cell))
    }

    fn open(&mut self, x: u16, y: u16, cell: Cell) {
        self.x = x;
        self.y = y;
        self.template = Some(cell);
        self.glyphs.clear();
        self.len = 0;
    }

    fn push(&mut self, cell: &Cell) {
        if !cell.is_empty() {
            self.glyphs.push(cell.display_glyph());
        }
        self.len += 1;
    }
}

/// ANSI escape-sequence backend.
pub struct StreamRenderer<W: Write> {
    writer: W,
    output: OutputBuffer,
    depth: ColorDepth,
    streak: Streak,
    /// Where the terminal cursor sits after the bytes emitted so far.
    cursor: (u16, u16),
    summary: FrameSummary,
}

impl<W: Write> StreamRenderer<W> {
    /// Create a renderer writing to `writer`.
    pub fn new(writer: W, depth: ColorDepth) -> Self {
        Self {
            writer,
            output: OutputBuffer::with_capacity(16 * 1024),
            depth,
            streak: Streak::default(),
            cursor: (0, 0),
            summary: FrameSummary::default(),
        }
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the renderer and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Counters for the last encoded frame.
    pub const fn last_summary(&self) -> FrameSummary {
        self.summary
    }

    /// Encode `cells` as a full frame without change detection or writing.
    ///
    /// The returned bytes stay valid until the next encode.
    pub fn encode(&mut self, cells: &CellBuffer) -> &[u8] {
        self.output.clear();
        self.summary = FrameSummary::default();
        self.output.cursor_home();
        self.cursor = (0, 0);

        for (y, row) in (0u16..).zip(cells.rows()) {
            for (x, cell) in (0u16..).zip(row) {
                if !self.streak.accepts(cell) {
                    self.close_streak();
                    self.streak.open(x, y, *cell);
                }
                self.streak.push(cell);
            }
            // Rows never merge, even when the next row starts in the same style.
            self.close_streak();
        }

        self.output.reset_attrs();
        self.summary.bytes = self.output.len();
        self.output.as_bytes()
    }

    fn close_streak(&mut self) {
        let Some(template) = self.streak.template.take() else {
            return;
        };
        let kind = template.kind();
        if kind == CellKind::Empty {
            return;
        }

        let (x, y) = (self.streak.x, self.streak.y);
        if self.cursor != (x, y) {
            self.output.cursor_move(x, y);
            self.summary.cursor_moves += 1;
        }
        if kind == CellKind::Cleared {
            self.output.reset_attrs();
        } else {
            self.output
                .set_style(template.fg(), template.bg(), template.attrs(), self.depth);
        }
        self.output.write_str(&self.streak.glyphs);

        self.cursor = (x + self.streak.len, y);
        self.summary.streaks += 1;
        self.summary.cells += usize::from(self.streak.len);
    }
}

impl<W: Write + Send> Backend for StreamRenderer<W> {
    fn mode(&self) -> RenderMode {
        RenderMode::Ansi
    }

    fn flush(&mut self, grid: &mut Grid) -> Result<bool> {
        if !grid.detect_changes() {
            return Ok(false);
        }
        self.encode(grid.front());
        if let Err(e) = self.output.flush_to(&mut self.writer) {
            grid.invalidate();
            return Err(e.into());
        }
        grid.fold_cleared();
        Ok(true)
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.output.clear();
        self.output.reset_attrs();
        self.output.clear_screen();
        self.output.cursor_home();
        self.output.flush_to(&mut self.writer)?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for StreamRenderer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamRenderer")
            .field("depth", &self.depth)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
