//! `CellBuffer`: A fixed-size grid of cells in row-major order.
//!
//! This is the storage behind both halves of a [`Grid`](super::Grid) and
//! the type producers use for off-screen sub-grids.

use super::cell::Cell;
use crate::error::{Error, Result};

/// A grid of cells with no change tracking.
///
/// Access is in row-major order: `index = y * width + x`. Fresh buffers are
/// filled with [`Cell::EMPTY`].
#[derive(Clone, PartialEq, Eq)]
pub struct CellBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl CellBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// Returns [`Error::InvalidSize`] if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        let size = usize::from(width) * usize::from(height);
        Ok(Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        })
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer holds no cells (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a mutable reference to the underlying cell slice.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Convert signed (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let width = usize::from(self.width);
        if x < width && y < usize::from(self.height) {
            Some(y * width + x)
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Copy content from another buffer of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    /// Render the glyphs as text, one line per row, with Empty cells as
    /// spaces. Intended for tests and debugging.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + usize::from(self.height));
        for row in self.rows() {
            out.extend(row.iter().map(|c| if c.is_empty() { ' ' } else { c.glyph() }));
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for CellBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = CellBuffer::new(80, 24).unwrap();
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
        assert!(buffer.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_buffer_zero_size() {
        assert!(matches!(
            CellBuffer::new(0, 24),
            Err(Error::InvalidSize { width: 0, height: 24 })
        ));
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = CellBuffer::new(80, 24).unwrap();
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
        assert!(buffer.get(-1, 0).is_none());
        assert_eq!(buffer.index_of(5, 10), Some(10 * 80 + 5));
    }

    #[test]
    fn test_buffer_set_out_of_bounds() {
        let mut buffer = CellBuffer::new(4, 4).unwrap();
        assert!(!buffer.set(4, 0, Cell::new('X')));
        assert!(!buffer.set(0, -1, Cell::new('X')));
        assert!(buffer.set(3, 3, Cell::new('X')));
        assert_eq!(buffer.get(3, 3).map(Cell::glyph), Some('X'));
    }

    #[test]
    fn test_buffer_to_text() {
        let mut buffer = CellBuffer::new(3, 2).unwrap();
        buffer.set(0, 0, Cell::new('a'));
        buffer.set(2, 1, Cell::new('b'));
        assert_eq!(buffer.to_text(), "a  \n  b\n");
    }
}
