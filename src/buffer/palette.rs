//! Color table: the 16-entry console palette.
//!
//! Indices follow the console attribute layout: bit 0 blue, bit 1 green,
//! bit 2 red, bit 3 intensity. Each entry carries the SGR codes the ANSI
//! backend uses in 16-color mode, the named color the native transport
//! writes, and a representative RGB value.

use super::cell::Rgba;
use crossterm::style::Color as TermColor;

/// Intensity bit.
pub const BRIGHT: u8 = 0b1000;
/// Red bit.
pub const RED: u8 = 0b0100;
/// Green bit.
pub const GREEN: u8 = 0b0010;
/// Blue bit.
pub const BLUE: u8 = 0b0001;

/// Default foreground index for unset colors (gray).
pub const DEFAULT_FG: u8 = 7;
/// Default background index for unset colors (black).
pub const DEFAULT_BG: u8 = 0;

/// A console palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// SGR foreground parameter (30-37, 90-97).
    pub fg_sgr: u8,
    /// SGR background parameter (40-47, 100-107).
    pub bg_sgr: u8,
    /// Representative color.
    pub rgb: Rgba,
    /// Named color for the crossterm transport.
    pub term: TermColor,
}

const fn entry(fg_sgr: u8, r: u8, g: u8, b: u8, term: TermColor) -> PaletteEntry {
    PaletteEntry {
        fg_sgr,
        bg_sgr: fg_sgr + 10,
        rgb: Rgba::rgb(r, g, b),
        term,
    }
}

/// The palette, indexed by console color index.
pub static PALETTE: [PaletteEntry; 16] = [
    entry(30, 0, 0, 0, TermColor::Black),
    entry(34, 0, 0, 128, TermColor::DarkBlue),
    entry(32, 0, 128, 0, TermColor::DarkGreen),
    entry(36, 0, 128, 128, TermColor::DarkCyan),
    entry(31, 128, 0, 0, TermColor::DarkRed),
    entry(35, 128, 0, 128, TermColor::DarkMagenta),
    entry(33, 128, 128, 0, TermColor::DarkYellow),
    entry(37, 192, 192, 192, TermColor::Grey),
    entry(90, 128, 128, 128, TermColor::DarkGrey),
    entry(94, 0, 0, 255, TermColor::Blue),
    entry(92, 0, 255, 0, TermColor::Green),
    entry(96, 0, 255, 255, TermColor::Cyan),
    entry(91, 255, 0, 0, TermColor::Red),
    entry(95, 255, 0, 255, TermColor::Magenta),
    entry(93, 255, 255, 0, TermColor::Yellow),
    entry(97, 255, 255, 255, TermColor::White),
];

/// Map an RGB triple to a console index.
///
/// The intensity bit is set when any channel exceeds 128; each color bit is
/// set when its channel exceeds 64.
///
/// A channel above 128 always sets its color bit too, so index 8 (dark grey,
/// SGR 90/100) is never produced: true-color greys land on 0, 7 or 15.
#[inline]
pub const fn console_index(r: u8, g: u8, b: u8) -> u8 {
    let mut index = if r > 128 || g > 128 || b > 128 { BRIGHT } else { 0 };
    if r > 64 {
        index |= RED;
    }
    if g > 64 {
        index |= GREEN;
    }
    if b > 64 {
        index |= BLUE;
    }
    index
}

/// Look up a palette entry; indices wrap into the 16-entry table.
#[inline]
pub fn lookup(index: u8) -> &'static PaletteEntry {
    &PALETTE[(index & 0x0F) as usize]
}
