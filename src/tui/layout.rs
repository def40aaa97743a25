//! Screen layout shared by rendering and mouse hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::PlateSide;

/// Width of the details panel on the right.
pub const DETAILS_WIDTH: u16 = 44;

/// Areas of the main screen.
///
/// Computed purely from the terminal size so the mouse handler sees the same
/// rectangles the last frame was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Title bar
    pub title: Rect,
    /// Source plate panel
    pub source: Rect,
    /// Destination plate panel
    pub dest: Rect,
    /// Hover details panel
    pub details: Rect,
    /// Status bar
    pub status: Rect,
}

impl AppLayout {
    /// Splits the full terminal area.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(10),   // Plates and details
                Constraint::Length(4), // Status bar
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(DETAILS_WIDTH)])
            .split(rows[1]);

        let plates = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main[0]);

        Self {
            title: rows[0],
            source: plates[0],
            dest: plates[1],
            details: main[1],
            status: rows[2],
        }
    }

    /// Panel of one plate.
    #[must_use]
    pub const fn plate(&self, side: PlateSide) -> Rect {
        match side {
            PlateSide::Source => self.source,
            PlateSide::Destination => self.dest,
        }
    }
}
