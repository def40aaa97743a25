//! Colours for the terminal UI in dark and light variants.
//!
//! Besides the usual chrome colours, the theme carries one colour per well
//! state so both plate panels and the legend stay consistent.

use ratatui::style::Color;

use crate::config::ThemeMode;
use crate::services::WellState;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Chrome
    /// Borders, titles and emphasis
    pub primary: Color,
    /// Related-well highlight and key hints
    pub accent: Color,
    /// Confirmations
    pub success: Color,
    /// Errors and overfull wells
    pub error: Color,
    /// Warnings (skipped rows, off-grid wells)
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Labels and row/column headers
    pub text_secondary: Color,
    /// Help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Focused cell background
    pub highlight_bg: Color,
    /// Panels and dialogs
    pub surface: Color,

    // Wells
    /// Well with no transfers
    pub well_empty: Color,
    /// Well with transfers within the ceiling
    pub well_used: Color,
    /// Well over the ceiling
    pub well_overfull: Color,

    /// Border of the focused plate panel
    pub active: Color,
    /// Border of the other plate panel
    pub inactive: Color,
}

impl Theme {
    /// Picks a theme from the OS dark/light setting, dark on failure.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for the configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Dark theme for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
            surface: Color::Rgb(30, 30, 30),

            well_empty: Color::Rgb(60, 60, 60),
            well_used: Color::Gray,
            well_overfull: Color::Red,

            active: Color::Yellow,
            inactive: Color::Gray,
        }
    }

    /// Light theme for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
            surface: Color::Rgb(245, 245, 245),

            well_empty: Color::Rgb(225, 225, 225),
            well_used: Color::Rgb(128, 128, 128),
            well_overfull: Color::Red,

            active: Color::Rgb(180, 100, 0),
            inactive: Color::Rgb(180, 180, 180),
        }
    }

    /// Cell colour for a well state.
    #[must_use]
    pub const fn well_color(&self, state: WellState) -> Color {
        match state {
            WellState::Empty => self.well_empty,
            WellState::Used => self.well_used,
            WellState::Overfull => self.well_overfull,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
