//! Border table: glyph sets for rectangle borders.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Single,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold,
    /// ┄ ┆ ┌ ┐ └ ┘
    Dashed,
    /// - | + + + +
    Ascii,
    /// █ █ █ █ █ █
    Block,
}

/// The six glyphs that make up a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    /// Top and bottom edges.
    pub horizontal: char,
    /// Left and right edges.
    pub vertical: char,
    /// Upper-left corner.
    pub top_left: char,
    /// Upper-right corner.
    pub top_right: char,
    /// Lower-left corner.
    pub bottom_left: char,
    /// Lower-right corner.
    pub bottom_right: char,
}

const fn glyphs(h: char, v: char, tl: char, tr: char, bl: char, br: char) -> BorderGlyphs {
    BorderGlyphs {
        horizontal: h,
        vertical: v,
        top_left: tl,
        top_right: tr,
        bottom_left: bl,
        bottom_right: br,
    }
}

impl BorderStyle {
    /// Every style, in table order.
    pub const ALL: [Self; 7] = [
        Self::Single,
        Self::Double,
        Self::Rounded,
        Self::Bold,
        Self::Dashed,
        Self::Ascii,
        Self::Block,
    ];

    /// Get the glyph set for this style.
    pub const fn glyphs(self) -> BorderGlyphs {
        match self {
            Self::Single => glyphs('─', '│', '┌', '┐', '└', '┘'),
            Self::Double => glyphs('═', '║', '╔', '╗', '╚', '╝'),
            Self::Rounded => glyphs('─', '│', '╭', '╮', '╰', '╯'),
            Self::Bold => glyphs('━', '┃', '┏', '┓', '┗', '┛'),
            Self::Dashed => glyphs('┄', '┆', '┌', '┐', '└', '┘'),
            Self::Ascii => glyphs('-', '|', '+', '+', '+', '+'),
            Self::Block => glyphs('█', '█', '█', '█', '█', '█'),
        }
    }

    /// Lowercase style name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Rounded => "rounded",
            Self::Bold => "bold",
            Self::Dashed => "dashed",
            Self::Ascii => "ascii",
            Self::Block => "block",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| Error::UnknownBorderStyle(s.to_string()))
    }
}
