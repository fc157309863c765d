//! History and strobe styling.
//!
//! Provides distinct colors for the history entry kinds and maps light
//! states to strobe panel colors.

use crate::model::EntryKind;
use crate::transmit::LightSignal;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output of the text areas.
///
/// Disabled when the `NO_COLOR` environment variable is set. The strobe
/// panel is always colored since the colors carry the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` (any value disables colors).
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting, for tests.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== EntryStyles =====

/// Styles for each history entry kind and the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStyles {
    system: Style,
    user: Style,
    error: Style,
    separator: Style,
}

impl EntryStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles for an explicit color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                system: Style::default().fg(Color::Yellow),
                user: Style::default().fg(Color::Cyan),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                separator: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                system: Style::default(),
                user: Style::default(),
                error: Style::default().add_modifier(Modifier::BOLD),
                separator: Style::default(),
            }
        }
    }

    /// Style for lines of an entry of `kind`.
    pub fn for_kind(&self, kind: EntryKind) -> Style {
        match kind {
            EntryKind::System => self.system,
            EntryKind::User => self.user,
            EntryKind::Error => self.error,
        }
    }

    /// Style of the separator row.
    pub fn separator(&self) -> Style {
        self.separator
    }
}

impl Default for EntryStyles {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal color of a strobe state.
pub fn signal_color(signal: LightSignal) -> Color {
    let rgb = signal.color();
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
