//! Native backend: Blit the grid as an array of console cell records.
//!
//! Each cell becomes a fixed-width record of a UTF-16 glyph and a packed
//! attribute word (`fg | bg << 4`, both 4-bit palette indices). Only the
//! 16-color palette is available here, so true-color values lose precision
//! through [`palette::console_index`](crate::buffer::palette::console_index).
//!
//! The per-cell comparison against the shadow array decides *whether* to
//! blit. When anything differs the whole array is written, as the console
//! has no cheaper partial write.

use super::{Backend, RenderMode};
use crate::buffer::{palette, Cell, Grid};
use crate::error::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// One console cell: glyph plus packed colors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRecord {
    /// UTF-16 code unit.
    pub glyph: u16,
    /// Foreground index in the low nibble, background in the next.
    pub attributes: u16,
}

impl Default for CellRecord {
    fn default() -> Self {
        Self::BLANK
    }
}

impl CellRecord {
    /// A space in the default colors; what Empty and Cleared cells become.
    pub const BLANK: Self = Self::new(' ', palette::DEFAULT_FG, palette::DEFAULT_BG);

    /// Build a record from a glyph and two palette indices.
    #[inline]
    pub const fn new(glyph: char, fg: u8, bg: u8) -> Self {
        let glyph = if (glyph as u32) <= 0xFFFF { glyph as u16 } else { b'?' as u16 };
        Self {
            glyph,
            attributes: ((fg & 0x0F) as u16) | (((bg & 0x0F) as u16) << 4),
        }
    }

    /// Pack a grid cell.
    ///
    /// The glyph goes through [`Cell::display_glyph`]; anything left outside
    /// the basic multilingual plane becomes `?`.
    pub fn from_cell(cell: &Cell) -> Self {
        if cell.is_empty() || cell.is_cleared() {
            return Self::BLANK;
        }
        Self::new(
            cell.display_glyph(),
            cell.fg().console_index(palette::DEFAULT_FG),
            cell.bg().console_index(palette::DEFAULT_BG),
        )
    }

    /// Foreground palette index.
    #[inline]
    pub const fn fg_index(self) -> u8 {
        (self.attributes & 0x0F) as u8
    }

    /// Background palette index.
    #[inline]
    pub const fn bg_index(self) -> u8 {
        ((self.attributes >> 4) & 0x0F) as u8
    }

    /// The glyph as a `char`, with unpaired surrogates shown as `?`.
    #[inline]
    pub fn glyph_char(self) -> char {
        char::from_u32(u32::from(self.glyph)).unwrap_or('?')
    }
}

/// Destination for whole-screen record blits.
pub trait ConsoleSink: Send {
    /// Write every record, row by row, starting at the top-left corner.
    fn blit(&mut self, records: &[CellRecord], width: u16) -> io::Result<()>;

    /// Blank the console.
    fn clear(&mut self) -> io::Result<()>;
}

/// Console transport through crossterm's command API.
///
/// On legacy Windows consoles crossterm drives the console API directly;
/// elsewhere it falls back to escape sequences restricted to the 16 named
/// colors.
#[derive(Debug)]
pub struct CrosstermSink<W: Write> {
    writer: W,
}

impl<W: Write> CrosstermSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn queue_run(&mut self, run: &mut String, attributes: u16) -> io::Result<()> {
        if run.is_empty() {
            return Ok(());
        }
        let record = CellRecord {
            glyph: 0,
            attributes,
        };
        queue!(
            self.writer,
            SetForegroundColor(palette::lookup(record.fg_index()).term),
            SetBackgroundColor(palette::lookup(record.bg_index()).term),
            Print(run.as_str())
        )?;
        run.clear();
        Ok(())
    }
}

impl<W: Write + Send> ConsoleSink for CrosstermSink<W> {
    fn blit(&mut self, records: &[CellRecord], width: u16) -> io::Result<()> {
        let mut run = String::with_capacity(usize::from(width) * 3);
        for (y, row) in (0u16..).zip(records.chunks(usize::from(width.max(1)))) {
            queue!(self.writer, MoveTo(0, y))?;
            let mut attributes = None;
            for record in row {
                if attributes != Some(record.attributes) {
                    if let Some(previous) = attributes {
                        self.queue_run(&mut run, previous)?;
                    }
                    attributes = Some(record.attributes);
                }
                run.push(record.glyph_char());
            }
            if let Some(previous) = attributes {
                self.queue_run(&mut run, previous)?;
            }
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        self.writer.flush()
    }
}

/// Native cell-array backend.
#[derive(Debug)]
pub struct CellArrayRenderer<S: ConsoleSink> {
    sink: S,
    /// Records for the frame being built.
    records: Vec<CellRecord>,
    /// Records as of the last successful blit.
    shadow: Vec<CellRecord>,
    width: u16,
    height: u16,
    /// Set when the last blit failed.
    stale: bool,
}

impl<S: ConsoleSink> CellArrayRenderer<S> {
    /// Create a renderer blitting to `sink`.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            records: Vec::new(),
            shadow: Vec::new(),
            width: 0,
            height: 0,
            stale: false,
        }
    }

    /// The sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Records as of the last successful blit.
    pub fn shadow(&self) -> &[CellRecord] {
        &self.shadow
    }

    /// Rebuild the record array from the grid's front buffer.
    fn pack(&mut self, grid: &Grid) {
        if grid.width() != self.width || grid.height() != self.height {
            let len = usize::from(grid.width()) * usize::from(grid.height());
            self.records = vec![CellRecord::BLANK; len];
            self.shadow = vec![CellRecord::BLANK; len];
            self.width = grid.width();
            self.height = grid.height();
        }
        for (record, cell) in self.records.iter_mut().zip(grid.front().cells()) {
            *record = CellRecord::from_cell(cell);
        }
    }
}

impl<S: ConsoleSink> Backend for CellArrayRenderer<S> {
    fn mode(&self) -> RenderMode {
        RenderMode::Native
    }

    fn flush(&mut self, grid: &mut Grid) -> Result<bool> {
        self.pack(grid);
        let changed = self.stale || self.records.iter().zip(&self.shadow).any(|(a, b)| a != b);
        if !changed {
            grid.fold_cleared();
            return Ok(false);
        }

        self.stale = false;
        self.shadow.copy_from_slice(&self.records);
        if let Err(e) = self.sink.blit(&self.records, self.width) {
            self.stale = true;
            return Err(e.into());
        }
        grid.fold_cleared();
        Ok(true)
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.shadow.fill(CellRecord::BLANK);
        self.sink.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Attributes, Color};
    use crate::layout::Coord;

    #[derive(Default)]
    struct RecordingSink {
        blits: Vec<Vec<CellRecord>>,
        clears: usize,
        fail: bool,
    }

    impl ConsoleSink for RecordingSink {
        fn blit(&mut self, records: &[CellRecord], _width: u16) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.blits.push(records.to_vec());
            Ok(())
        }

        fn clear(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }
    }

    #[test]
    fn test_record_layout() {
        assert_eq!(std::mem::size_of::<CellRecord>(), 4);
        let record = CellRecord::new('A', 12, 1);
        assert_eq!(record.glyph, 0x41);
        assert_eq!(record.attributes, 0x1C);
        assert_eq!(record.fg_index(), 12);
        assert_eq!(record.bg_index(), 1);
    }

    #[test]
    fn test_record_from_cell() {
        let cell = Cell::styled('x', Color::RED, Color::rgb(0, 0, 100), Attributes::BOLD);
        let record = CellRecord::from_cell(&cell);
        assert_eq!(record.glyph_char(), 'x');
        assert_eq!(record.fg_index(), 12);
        assert_eq!(record.bg_index(), 1);

        assert_eq!(CellRecord::from_cell(&Cell::EMPTY), CellRecord::BLANK);
        assert_eq!(CellRecord::from_cell(&Cell::CLEARED), CellRecord::BLANK);
        assert_eq!(CellRecord::from_cell(&Cell::new('😀')).glyph_char(), '?');
        assert_eq!(CellRecord::from_cell(&Cell::new('日')).glyph_char(), '?');
        assert_eq!(CellRecord::from_cell(&Cell::new('\n')).glyph_char(), '?');
    }

    #[test]
    fn test_nearby_colors_pack_identically() {
        let a = CellRecord::from_cell(&Cell::new('x').with_fg(Color::rgb(200, 10, 10)));
        let b = CellRecord::from_cell(&Cell::new('x').with_fg(Color::rgb(250, 60, 0)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_grid_is_not_blitted() {
        let mut grid = Grid::new(4, 2).unwrap();
        let mut r = CellArrayRenderer::new(RecordingSink::default());
        assert!(!r.flush(&mut grid).unwrap());
        assert!(r.sink().blits.is_empty());
    }

    #[test]
    fn test_change_blits_whole_array_once() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.draw_rect(Coord::new(1, 1), Coord::new(1, 1), Color::RED);
        let mut r = CellArrayRenderer::new(RecordingSink::default());

        assert!(r.flush(&mut grid).unwrap());
        assert!(!r.flush(&mut grid).unwrap());
        assert_eq!(r.sink().blits.len(), 1);

        let blit = &r.sink().blits[0];
        assert_eq!(blit.len(), 8);
        assert_eq!(blit[5].bg_index(), 12);
        assert_eq!(blit[5].fg_index(), 15);
        assert_eq!(blit[0], CellRecord::BLANK);
    }

    #[test]
    fn test_precision_loss_hides_small_changes() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut r = CellArrayRenderer::new(RecordingSink::default());
        grid.draw(0, 0, 'x', Color::rgb(200, 0, 0), Color::Unset, Attributes::empty());
        assert!(r.flush(&mut grid).unwrap());
        grid.draw(0, 0, 'x', Color::rgb(210, 0, 0), Color::Unset, Attributes::empty());
        assert!(!r.flush(&mut grid).unwrap());
    }

    #[test]
    fn test_cleared_cell_blanks_and_folds() {
        let mut grid = Grid::new(3, 1).unwrap();
        let mut r = CellArrayRenderer::new(RecordingSink::default());
        grid.draw(1, 0, 'x', Color::WHITE, Color::BLACK, Attributes::empty());
        r.flush(&mut grid).unwrap();

        grid.clear_at(1, 0);
        assert!(r.flush(&mut grid).unwrap());
        assert_eq!(r.sink().blits[1][1], CellRecord::BLANK);
        assert!(grid.get(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_failed_blit_retries() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut r = CellArrayRenderer::new(RecordingSink {
            fail: true,
            ..RecordingSink::default()
        });
        grid.draw(0, 0, 'x', Color::WHITE, Color::BLACK, Attributes::empty());
        assert!(r.flush(&mut grid).is_err());

        r.sink.fail = false;
        assert!(r.flush(&mut grid).unwrap());
        assert_eq!(r.sink().blits.len(), 1);
    }

    #[test]
    fn test_clear_screen_resets_shadow() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut r = CellArrayRenderer::new(RecordingSink::default());
        grid.draw(0, 0, 'x', Color::WHITE, Color::BLACK, Attributes::empty());
        r.flush(&mut grid).unwrap();

        r.clear_screen().unwrap();
        assert_eq!(r.sink().clears, 1);
        assert!(r.shadow().iter().all(|rec| *rec == CellRecord::BLANK));
        assert!(r.flush(&mut grid).unwrap());
    }

    #[test]
    fn test_crossterm_sink_writes_rows() {
        let mut sink = CrosstermSink::new(Vec::new());
        let records = [
            CellRecord::new('a', 12, 0),
            CellRecord::new('b', 12, 0),
            CellRecord::new('c', 7, 0),
            CellRecord::new('d', 7, 0),
        ];
        sink.blit(&records, 2).unwrap();
        let text = String::from_utf8(sink.writer().clone()).unwrap();
        assert!(text.contains("ab"));
        assert!(text.contains('c'));
        assert!(text.contains('d'));
    }
}
