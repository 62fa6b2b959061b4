//! Renderer configuration.

use crate::backend::RenderMode;
use crate::error::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable that overrides the configured mode selector.
pub const MODE_ENV_VAR: &str = "TERMFRAME_MODE";

/// Default tick interval (20 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// How the backend is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeSelector {
    /// Probe the hosting terminal.
    #[default]
    Auto,
    /// Always use the ANSI stream backend.
    Ansi,
    /// Always use the native cell-array backend.
    Native,
}

impl ModeSelector {
    /// Resolve to a concrete mode, honoring [`MODE_ENV_VAR`] if it is set.
    pub fn resolve(self) -> Result<RenderMode> {
        let selector = match std::env::var(MODE_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => self,
        };
        Ok(selector.resolve_without_env())
    }

    /// Resolve to a concrete mode, probing the terminal for `Auto`.
    pub fn resolve_without_env(self) -> RenderMode {
        match self {
            Self::Auto => RenderMode::detect(),
            Self::Ansi => RenderMode::Ansi,
            Self::Native => RenderMode::Native,
        }
    }
}

impl FromStr for ModeSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "ansi" => Ok(Self::Ansi),
            "native" => Ok(Self::Native),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Color precision used by the ANSI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorDepth {
    /// 24-bit `38;2`/`48;2` sequences.
    #[default]
    TrueColor,
    /// 16-color SGR codes from the console palette.
    Palette16,
}

/// Configuration for the [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    /// Nominal time between scheduler ticks.
    pub tick_interval: Duration,
    /// Backend selection.
    pub mode: ModeSelector,
    /// Color precision for the ANSI backend.
    pub color_depth: ColorDepth,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to hide the cursor while rendering.
    pub hide_cursor: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            mode: ModeSelector::Auto,
            color_depth: ColorDepth::TrueColor,
            alternate_screen: true,
            hide_cursor: true,
        }
    }
}

impl RendererConfig {
    /// Set the tick interval.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the mode selector.
    #[must_use]
    pub const fn with_mode(mut self, mode: ModeSelector) -> Self {
        self.mode = mode;
        self
    }

    /// Set the color depth.
    #[must_use]
    pub const fn with_color_depth(mut self, depth: ColorDepth) -> Self {
        self.color_depth = depth;
        self
    }

    /// Enable or disable the alternate screen.
    #[must_use]
    pub const fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    /// Enable or disable cursor hiding.
    #[must_use]
    pub const fn with_hide_cursor(mut self, hide: bool) -> Self {
        self.hide_cursor = hide;
        self
    }
}
