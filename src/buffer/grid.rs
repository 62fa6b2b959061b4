//! Grid: The logical screen with a shadow copy for change detection.
//!
//! Producers mutate the front buffer through the drawing primitives below.
//! Every primitive clips silently: coordinates outside `[0, width) x
//! [0, height)` are no-ops, never errors. Whether anything changed is
//! decided later, in bulk, by [`Grid::detect_changes`].

use super::border::BorderStyle;
use super::buffer::CellBuffer;
use super::cell::{Attributes, Cell, Color};
use crate::error::Result;
use crate::layout::{Alignment, Coord, Rect};

/// Double-buffered cell grid.
///
/// Dimensions are fixed at construction; a terminal resize replaces the
/// whole grid.
#[derive(Clone)]
pub struct Grid {
    /// Buffer being drawn into.
    front: CellBuffer,
    /// State as of the last flush.
    shadow: CellBuffer,
    /// Set when the last frame never reached the terminal.
    stale: bool,
}

impl Grid {
    /// Create a grid of Empty cells.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let front = CellBuffer::new(width, height)?;
        let shadow = front.clone();
        Ok(Self {
            front,
            shadow,
            stale: false,
        })
    }

    /// Grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.front.width()
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.front.height()
    }

    /// Grid size as a coordinate.
    #[inline]
    pub fn size(&self) -> Coord {
        Coord::new(i32::from(self.width()), i32::from(self.height()))
    }

    /// The front buffer.
    #[inline]
    pub const fn front(&self) -> &CellBuffer {
        &self.front
    }

    /// The shadow buffer (last flushed state).
    #[inline]
    pub const fn shadow(&self) -> &CellBuffer {
        &self.shadow
    }

    /// Cell at (x, y) in the front buffer.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.front.get(x, y)
    }

    /// Write a cell unconditionally.
    #[inline]
    pub fn draw_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.front.set(x, y, cell);
    }

    /// Write a glyph with explicit style.
    #[inline]
    pub fn draw(&mut self, x: i32, y: i32, glyph: char, fg: Color, bg: Color, attrs: Attributes) {
        self.draw_cell(x, y, Cell::styled(glyph, fg, bg, attrs));
    }

    /// Fill a rectangle with spaces on `color`.
    pub fn draw_rect(&mut self, pos: Coord, size: Coord, color: Color) {
        self.fill_rect(pos, size, color, ' ');
    }

    /// Fill a rectangle with `glyph` on `color`, in the neutral ink color.
    pub fn fill_rect(&mut self, pos: Coord, size: Coord, color: Color, glyph: char) {
        let cell = Cell::styled(glyph, Color::INK, color, Attributes::empty());
        self.fill_clipped(Rect::from_coords(pos, size), cell);
    }

    /// Write a text run on row `y`, anchored at `x` by `alignment`.
    ///
    /// A row outside the grid drops the whole call. Otherwise the run is
    /// clipped horizontally, one cell per character.
    #[allow(clippy::too_many_arguments)]
    pub fn print(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        fg: Color,
        bg: Color,
        alignment: Alignment,
        attrs: Attributes,
    ) {
        if y < 0 || y >= i32::from(self.height()) {
            return;
        }
        let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let start = alignment.start(x, len);
        let width = i32::from(self.width());

        for (col, glyph) in (start..).zip(text.chars()) {
            if col >= width {
                break;
            }
            if col >= 0 {
                self.draw(col, y, glyph, fg, bg, attrs);
            }
        }
    }

    /// Blank a single cell; the renderer will emit a reset for it.
    #[inline]
    pub fn clear_at(&mut self, x: i32, y: i32) {
        self.draw_cell(x, y, Cell::CLEARED);
    }

    /// Blank a rectangle.
    pub fn clear_rect(&mut self, pos: Coord, size: Coord) {
        self.fill_clipped(Rect::from_coords(pos, size), Cell::CLEARED);
    }

    /// Blank the whole grid.
    pub fn clear(&mut self) {
        self.front.fill(Cell::CLEARED);
    }

    /// Draw a border around a rectangle.
    ///
    /// Corners land on the corners of the clipped rectangle. A corner on a
    /// side with no room left (end <= start after clipping) is skipped, so
    /// a 1x1 visible area gets only the upper-left glyph.
    pub fn draw_border(&mut self, pos: Coord, size: Coord, color: Color, style: BorderStyle) {
        let Some(clip) = Rect::from_coords(pos, size).clip(self.width(), self.height()) else {
            return;
        };
        let glyphs = style.glyphs();
        let (left, top) = (clip.x, clip.y);
        let (right, bottom) = (clip.right() - 1, clip.bottom() - 1);
        let has_right = right > left;
        let has_bottom = bottom > top;
        let edge = |glyph| Cell::styled(glyph, color, Color::Unset, Attributes::empty());

        for x in left + 1..right {
            self.draw_cell(x, top, edge(glyphs.horizontal));
            if has_bottom {
                self.draw_cell(x, bottom, edge(glyphs.horizontal));
            }
        }
        for y in top + 1..bottom {
            self.draw_cell(left, y, edge(glyphs.vertical));
            if has_right {
                self.draw_cell(right, y, edge(glyphs.vertical));
            }
        }

        self.draw_cell(left, top, edge(glyphs.top_left));
        if has_right {
            self.draw_cell(right, top, edge(glyphs.top_right));
        }
        if has_bottom {
            self.draw_cell(left, bottom, edge(glyphs.bottom_left));
        }
        if has_right && has_bottom {
            self.draw_cell(right, bottom, edge(glyphs.bottom_right));
        }
    }

    /// Blit a pre-rendered sub-grid with its top-left corner at `pos`.
    ///
    /// Empty cells in `source` are skipped so they do not overwrite what is
    /// already on the grid.
    pub fn draw_buffer(&mut self, pos: Coord, source: &CellBuffer) {
        let area = Rect::new(
            pos.x,
            pos.y,
            i32::from(source.width()),
            i32::from(source.height()),
        );
        let Some(clip) = area.clip(self.width(), self.height()) else {
            return;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                if let Some(cell) = source.get(x - pos.x, y - pos.y) {
                    if !cell.is_empty() {
                        self.draw_cell(x, y, *cell);
                    }
                }
            }
        }
    }

    /// Compare front against shadow.
    ///
    /// The scan stops at the first mismatch, after which the whole front
    /// buffer is copied into the shadow in one pass. Returns whether
    /// anything changed.
    pub fn detect_changes(&mut self) -> bool {
        let stale = std::mem::take(&mut self.stale);
        let changed = stale
            || self
                .front
                .cells()
                .iter()
                .zip(self.shadow.cells())
                .any(|(front, shadow)| front != shadow);
        if changed {
            self.shadow.copy_from(&self.front);
        }
        changed
    }

    /// Force the next change detection to report dirty.
    ///
    /// Backends call this when a frame could not be written.
    #[inline]
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Turn every Cleared cell back into Empty once it has been emitted.
    ///
    /// Both buffers are folded so an unchanged next frame stays clean.
    pub fn fold_cleared(&mut self) {
        for buffer in [&mut self.front, &mut self.shadow] {
            for cell in buffer.cells_mut() {
                if cell.is_cleared() {
                    *cell = Cell::EMPTY;
                }
            }
        }
    }

    fn fill_clipped(&mut self, rect: Rect, cell: Cell) {
        let Some(clip) = rect.clip(self.width(), self.height()) else {
            return;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.draw_cell(x, y, cell);
            }
        }
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}
