//! Cell: The atomic unit of terminal display.
//!
//! A cell is a plain value: glyph, foreground, background and attribute
//! flags. Two reserved values carry control meaning instead of content:
//!
//! ```text
//! ┌──────────┬────────┬─────────┬─────────┬────────────────────────────────┐
//! │  state   │ glyph  │   fg    │   bg    │ meaning                        │
//! ├──────────┼────────┼─────────┼─────────┼────────────────────────────────┤
//! │  Empty   │  NUL   │  Unset  │  Unset  │ never drawn, emit nothing      │
//! │  Cleared │ space  │  Unset  │  Unset  │ blanked, emit a style reset    │
//! └──────────┴────────┴─────────┴─────────┴────────────────────────────────┘
//! ```

use super::palette;
use crate::error::{Error, Result};
use bitflags::bitflags;
use std::str::FromStr;
use unicode_width::UnicodeWidthChar;

/// True-color RGBA representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255)
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a 24-bit hex value (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// The 4-bit console palette index for this color.
    ///
    /// See [`palette::console_index`] for the threshold rule.
    #[inline]
    pub const fn console_index(self) -> u8 {
        palette::console_index(self.r, self.g, self.b)
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

/// A cell color.
///
/// `Transparent` means "inherit from whatever is beneath"; producers resolve
/// it with [`Color::over`] before drawing. The grid stores colors as given,
/// and backends render both `Unset` and an unresolved `Transparent` with the
/// terminal's default color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Never set. Renders as the terminal default.
    #[default]
    Unset,
    /// Take the parent's color.
    Transparent,
    /// A concrete color.
    Rgba(Rgba),
}

impl Color {
    /// Create a concrete opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba(Rgba::rgb(r, g, b))
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Red (255, 0, 0)
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Green (0, 255, 0)
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Blue (0, 0, 255)
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Neutral ink used as the foreground of filled rectangles.
    pub const INK: Self = Self::rgb(192, 192, 192);

    /// Resolve `Transparent` against a parent color.
    #[inline]
    #[must_use]
    pub const fn over(self, parent: Self) -> Self {
        match self {
            Self::Transparent => parent,
            other => other,
        }
    }

    /// The concrete color, if any.
    #[inline]
    pub const fn rgba(self) -> Option<Rgba> {
        match self {
            Self::Rgba(c) => Some(c),
            Self::Unset | Self::Transparent => None,
        }
    }

    /// Check whether this color carries a concrete value.
    #[inline]
    pub const fn is_concrete(self) -> bool {
        matches!(self, Self::Rgba(_))
    }

    /// The 4-bit console index, using `default` for non-concrete colors.
    #[inline]
    pub const fn console_index(self, default: u8) -> u8 {
        match self {
            Self::Rgba(c) => c.console_index(),
            Self::Unset | Self::Transparent => default,
        }
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Transparent => f.write_str("Transparent"),
            Self::Rgba(c) => write!(f, "{c:?}"),
        }
    }
}

impl From<Rgba> for Color {
    #[inline]
    fn from(c: Rgba) -> Self {
        Self::Rgba(c)
    }
}

impl From<u32> for Color {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::Rgba(Rgba::from_u32(hex))
    }
}

bitflags! {
    /// Text attribute flags.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use termframe::Attributes;
    /// let style = Attributes::BOLD | Attributes::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Italic text
        const ITALIC = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Double-underlined text
        const DOUBLE_UNDERLINE = 0b0000_1000;
        /// Line above the text
        const OVERLINE = 0b0001_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b0010_0000;
    }
}

impl Attributes {
    /// SGR parameter for each attribute, in emission order.
    pub const SGR_CODES: [(Self, u8); 6] = [
        (Self::BOLD, 1),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::DOUBLE_UNDERLINE, 21),
        (Self::OVERLINE, 53),
        (Self::STRIKETHROUGH, 9),
    ];

    /// Look up a single attribute by name.
    pub fn parse_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bold" => Ok(Self::BOLD),
            "italic" => Ok(Self::ITALIC),
            "underline" => Ok(Self::UNDERLINE),
            "double-underline" | "double_underline" => Ok(Self::DOUBLE_UNDERLINE),
            "overline" => Ok(Self::OVERLINE),
            "strikethrough" => Ok(Self::STRIKETHROUGH),
            _ => Err(Error::UnknownAttribute(name.to_string())),
        }
    }
}

impl FromStr for Attributes {
    type Err = Error;

    /// Parse a `|`-separated list of attribute names ("bold|underline").
    fn from_str(s: &str) -> Result<Self> {
        s.split('|')
            .filter(|part| !part.trim().is_empty())
            .try_fold(Self::empty(), |acc, part| Ok(acc | Self::parse_name(part)?))
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// How a cell participates in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// The `Empty` sentinel: never drawn, contributes no output.
    Empty,
    /// The `Cleared` sentinel: blanked, rendered as a reset space.
    Cleared,
    /// Ordinary content.
    Visible,
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    glyph: char,
    fg: Color,
    bg: Color,
    attrs: Attributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Never drawn; backends emit nothing for it.
    pub const EMPTY: Self = Self {
        glyph: '\0',
        fg: Color::Unset,
        bg: Color::Unset,
        attrs: Attributes::empty(),
    };

    /// Explicitly blanked; backends emit a reset for it.
    pub const CLEARED: Self = Self {
        glyph: ' ',
        fg: Color::Unset,
        bg: Color::Unset,
        attrs: Attributes::empty(),
    };

    /// Stand-in for glyphs that do not occupy exactly one column.
    pub const REPLACEMENT: char = '?';

    /// Create a cell with default colors and no attributes.
    #[inline]
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            fg: Color::Unset,
            bg: Color::Unset,
            attrs: Attributes::empty(),
        }
    }

    /// Create a fully styled cell.
    #[inline]
    pub const fn styled(glyph: char, fg: Color, bg: Color, attrs: Attributes) -> Self {
        Self { glyph, fg, bg, attrs }
    }

    /// Get the glyph.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// The glyph as written to the terminal.
    ///
    /// A glyph that would not move the cursor exactly one column (control
    /// characters, wide and zero-width characters) becomes
    /// [`Cell::REPLACEMENT`].
    #[inline]
    pub fn display_glyph(&self) -> char {
        if self.glyph.is_control() {
            return Self::REPLACEMENT;
        }
        match self.glyph.width() {
            Some(1) => self.glyph,
            _ => Self::REPLACEMENT,
        }
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Color {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Color {
        self.bg
    }

    /// Get the attributes.
    #[inline]
    pub const fn attrs(&self) -> Attributes {
        self.attrs
    }

    /// Classify the cell against the two sentinels.
    #[inline]
    pub fn kind(&self) -> CellKind {
        if *self == Self::EMPTY {
            CellKind::Empty
        } else if *self == Self::CLEARED {
            CellKind::Cleared
        } else {
            CellKind::Visible
        }
    }

    /// Check for the `Empty` sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Check for the `Cleared` sentinel.
    #[inline]
    pub fn is_cleared(&self) -> bool {
        *self == Self::CLEARED
    }

    /// True when both cells would be emitted with the same style escape.
    #[inline]
    pub fn same_style(&self, other: &Self) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.attrs == other.attrs
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attributes (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            CellKind::Empty => f.write_str("Cell::EMPTY"),
            CellKind::Cleared => f.write_str("Cell::CLEARED"),
            CellKind::Visible => f
                .debug_struct("Cell")
                .field("glyph", &self.glyph)
                .field("fg", &self.fg)
                .field("bg", &self.bg)
                .field("attrs", &self.attrs)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_hex() {
        let c = Rgba::from_u32(0xFF8000);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
    }

    #[test]
    fn test_color_over_resolves_transparent() {
        assert_eq!(Color::Transparent.over(Color::RED), Color::RED);
        assert_eq!(Color::BLUE.over(Color::RED), Color::BLUE);
        assert_eq!(Color::Unset.over(Color::RED), Color::Unset);
    }

    #[test]
    fn test_color_structural_equality() {
        assert_eq!(Color::rgb(1, 2, 3), Color::Rgba(Rgba::new(1, 2, 3, 255)));
        assert_ne!(Color::rgb(1, 2, 3), Color::Rgba(Rgba::new(1, 2, 3, 0)));
        assert_ne!(Color::Unset, Color::Transparent);
    }

    #[test]
    fn test_sentinels_are_distinct() {
        assert_eq!(Cell::EMPTY.kind(), CellKind::Empty);
        assert_eq!(Cell::CLEARED.kind(), CellKind::Cleared);
        assert_ne!(Cell::EMPTY, Cell::CLEARED);
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn test_space_with_color_is_visible() {
        let cell = Cell::new(' ').with_bg(Color::RED);
        assert_eq!(cell.kind(), CellKind::Visible);
        // An unstyled space is indistinguishable from the sentinel.
        assert!(Cell::new(' ').is_cleared());
    }

    #[test]
    fn test_cell_equality() {
        let a = Cell::new('A').with_fg(Color::RED);
        let b = Cell::new('A').with_fg(Color::RED);
        let c = Cell::new('A').with_fg(Color::GREEN);
        let d = Cell::new('A').with_fg(Color::RED).with_attrs(Attributes::BOLD);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_same_style_ignores_glyph() {
        let a = Cell::styled('A', Color::RED, Color::BLACK, Attributes::BOLD);
        let b = Cell::styled('B', Color::RED, Color::BLACK, Attributes::BOLD);
        assert!(a.same_style(&b));
        assert!(!a.same_style(&b.with_attrs(Attributes::empty())));
    }

    #[test]
    fn test_attributes_parse() {
        let attrs: Attributes = "bold|double-underline".parse().unwrap();
        assert_eq!(attrs, Attributes::BOLD | Attributes::DOUBLE_UNDERLINE);
        assert_eq!("".parse::<Attributes>().unwrap(), Attributes::empty());
    }

    #[test]
    fn test_attributes_unknown_name() {
        let err = "bold|blink".parse::<Attributes>().unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute(name) if name == "blink"));
    }

    #[test]
    fn test_display_glyph_is_single_column() {
        assert_eq!(Cell::new('a').display_glyph(), 'a');
        assert_eq!(Cell::new('─').display_glyph(), '─');
        assert_eq!(Cell::CLEARED.display_glyph(), ' ');
        assert_eq!(Cell::new('日').display_glyph(), Cell::REPLACEMENT);
        assert_eq!(Cell::new('\t').display_glyph(), Cell::REPLACEMENT);
        assert_eq!(Cell::new('\x1b').display_glyph(), Cell::REPLACEMENT);
        assert_eq!(Cell::new('\u{301}').display_glyph(), Cell::REPLACEMENT);
        let nul = Cell::styled('\0', Color::RED, Color::Unset, Attributes::empty());
        assert_eq!(nul.display_glyph(), Cell::REPLACEMENT);
    }

    #[test]
    fn test_attributes_parse_name() {
        assert_eq!(Attributes::parse_name(" Bold").unwrap(), Attributes::BOLD);
        assert_eq!(
            Attributes::parse_name("double-underline").unwrap(),
            Attributes::DOUBLE_UNDERLINE
        );
        assert!(matches!(
            Attributes::parse_name("blink"),
            Err(Error::UnknownAttribute(name)) if name == "blink"
        ));
    }
}
