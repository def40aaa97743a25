//! Plate widget: one microplate drawn as a grid of coloured well cells.
//!
//! Each row is drawn as a right-aligned row label followed by one cell per
//! column, every cell preceded by a single space:
//!
//! ```text
//!      1  2  3
//!   A ██ ██ ██
//!   B ██ ██ ██
//! ```
//!
//! Large plates scroll so the cursor stays visible.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::AppState;
use crate::models::{row_label, PlateSide, WellCoordinate};
use crate::services::{PlateGrid, PlateView};

/// Columns taken by the row label, including its trailing space.
pub const LABEL_WIDTH: u16 = 3;
/// Characters per cell.
pub const CELL_WIDTH: u16 = 2;
/// Cell plus the space before it.
pub const CELL_STRIDE: u16 = CELL_WIDTH + 1;

/// Visible part of a plate inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Panel area inside the border
    pub inner: Rect,
    /// First visible grid row
    pub start_row: usize,
    /// First visible grid column
    pub start_col: usize,
    /// Number of visible rows
    pub rows: usize,
    /// Number of visible columns
    pub cols: usize,
}

impl Viewport {
    /// Fits a `grid_rows` × `grid_cols` plate into `area`, scrolled so that
    /// `cursor` is visible.
    #[must_use]
    pub fn new(area: Rect, grid_rows: usize, grid_cols: usize, cursor: WellCoordinate) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        // One line for the column header
        let rows = (inner.height.saturating_sub(1) as usize).min(grid_rows);
        let cols = (inner.width.saturating_sub(LABEL_WIDTH) / CELL_STRIDE) as usize;
        let cols = cols.min(grid_cols);

        Self {
            inner,
            start_row: scroll_start(cursor.row, rows, grid_rows),
            start_col: scroll_start(cursor.col, cols, grid_cols),
            rows,
            cols,
        }
    }

    /// Grid cell under a terminal position, if any.
    #[must_use]
    pub fn cell_at(&self, x: u16, y: u16) -> Option<WellCoordinate> {
        let inner = self.inner;
        if x < inner.x || y < inner.y || x >= inner.right() || y >= inner.bottom() {
            return None;
        }

        let dy = (y - inner.y) as usize;
        // Header line
        if dy == 0 || dy > self.rows {
            return None;
        }

        let dx = x - inner.x;
        if dx < LABEL_WIDTH {
            return None;
        }
        let offset = dx - LABEL_WIDTH;
        // The gap before each cell belongs to no well
        if offset % CELL_STRIDE == 0 {
            return None;
        }
        let col = (offset / CELL_STRIDE) as usize;
        if col >= self.cols {
            return None;
        }

        Some(WellCoordinate::new(
            self.start_row + dy - 1,
            self.start_col + col,
        ))
    }

    /// Whether the whole plate fits.
    #[must_use]
    pub const fn shows_all(&self, grid_rows: usize, grid_cols: usize) -> bool {
        self.rows == grid_rows && self.cols == grid_cols
    }
}

/// First index to show so that `cursor` is inside a window of `visible`.
fn scroll_start(cursor: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        (cursor + 1 - visible).min(total - visible)
    }
}

/// Plate widget
pub struct PlateWidget;

impl PlateWidget {
    /// Viewport of one plate for the current state, if grids are available.
    #[must_use]
    pub fn viewport(state: &AppState, area: Rect, side: PlateSide) -> Option<Viewport> {
        let grid = state.grids()?.grid(side);
        Some(Viewport::new(
            area,
            grid.rows(),
            grid.cols(),
            state.cursors.get(side),
        ))
    }

    /// Render one plate panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, side: PlateSide) {
        let theme = &state.theme;
        let focused = state.focus == side;
        let border_color = if focused { theme.active } else { theme.inactive };

        let Some(grids) = state.grids() else {
            let message = match &state.view {
                PlateView::NoData(reason) => reason.to_string(),
                PlateView::Ready(_) => String::new(),
            };
            let placeholder = Paragraph::new(vec![
                Line::from(Span::styled(message, Style::default().fg(theme.text_muted))),
                Line::from(Span::styled(
                    "Press o to open a picklist",
                    Style::default().fg(theme.text_muted),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {side} "))
                    .border_style(Style::default().fg(border_color))
                    .style(Style::default().bg(theme.background)),
            );
            f.render_widget(placeholder, area);
            return;
        };

        let grid = grids.grid(side);
        let viewport = Viewport::new(area, grid.rows(), grid.cols(), state.cursors.get(side));
        let plate_name = state
            .session
            .selection()
            .map_or("", |selection| selection.plate(side));

        let mut title = format!(
            " {side}: {plate_name} ({}×{}, ceiling {:.1} nl) ",
            grid.rows(),
            grid.cols(),
            grid.ceiling_nl()
        );
        if !viewport.shows_all(grid.rows(), grid.cols()) {
            title = format!(
                "{title}[rows {}-{}, cols {}-{}] ",
                label_or_blank(viewport.start_row),
                label_or_blank(viewport.start_row + viewport.rows.saturating_sub(1)),
                viewport.start_col + 1,
                viewport.start_col + viewport.cols
            );
        }

        let lines = Self::grid_lines(state, grid, side, &viewport);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.background));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn grid_lines(
        state: &AppState,
        grid: &PlateGrid,
        side: PlateSide,
        viewport: &Viewport,
    ) -> Vec<Line<'static>> {
        let theme = &state.theme;
        let cursor = state.cursors.get(side);
        let focused = state.focus == side;
        let header_style = Style::default().fg(theme.text_secondary);

        let mut lines = Vec::with_capacity(viewport.rows + 1);

        // Column numbers
        let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
        for col in viewport.start_col..viewport.start_col + viewport.cols {
            header.push(Span::styled(format!(" {:>2}", col + 1), header_style));
        }
        lines.push(Line::from(header));

        for row in viewport.start_row..viewport.start_row + viewport.rows {
            let mut spans = vec![Span::styled(
                format!("{:>2} ", label_or_blank(row)),
                header_style,
            )];

            for col in viewport.start_col..viewport.start_col + viewport.cols {
                let coord = WellCoordinate::new(row, col);
                let Some(well_state) = grid.state(row, col) else {
                    continue;
                };

                let bg = if state.is_highlighted(side, coord) {
                    theme.accent
                } else {
                    theme.well_color(well_state)
                };
                let mut style = Style::default().bg(bg).fg(theme.text);
                let text = if focused && coord == cursor {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    "[]"
                } else {
                    "  "
                };

                spans.push(Span::raw(" "));
                spans.push(Span::styled(text, style));
            }

            lines.push(Line::from(spans));
        }

        lines
    }
}

fn label_or_blank(row: usize) -> String {
    row_label(row).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Rect {
        // Inner area starts at (11, 6)
        Rect::new(10, 5, 40, 12)
    }

    #[test]
    fn test_viewport_fits_small_plate() {
        let viewport = Viewport::new(panel(), 8, 10, WellCoordinate::default());
        assert_eq!(viewport.rows, 8);
        assert_eq!(viewport.cols, 10);
        assert!(viewport.shows_all(8, 10));
        assert_eq!(viewport.start_row, 0);
    }

    #[test]
    fn test_viewport_scrolls_to_cursor() {
        // Inner 38 × 10: 9 rows, (38 - 3) / 3 = 11 columns
        let viewport = Viewport::new(panel(), 16, 24, WellCoordinate::new(15, 23));
        assert_eq!(viewport.rows, 9);
        assert_eq!(viewport.cols, 11);
        assert_eq!(viewport.start_row, 7);
        assert_eq!(viewport.start_col, 13);
        assert!(!viewport.shows_all(16, 24));
    }

    #[test]
    fn test_cell_at_maps_cells() {
        let viewport = Viewport::new(panel(), 16, 24, WellCoordinate::default());
        // Row A is one line below the header, first cell after label and gap
        assert_eq!(viewport.cell_at(15, 7), Some(WellCoordinate::new(0, 0)));
        assert_eq!(viewport.cell_at(16, 7), Some(WellCoordinate::new(0, 0)));
        assert_eq!(viewport.cell_at(18, 8), Some(WellCoordinate::new(1, 1)));
    }

    #[test]
    fn test_cell_at_outside_cells() {
        let viewport = Viewport::new(panel(), 16, 24, WellCoordinate::default());
        // Header
        assert_eq!(viewport.cell_at(15, 6), None);
        // Row label
        assert_eq!(viewport.cell_at(12, 7), None);
        // Gap between cells
        assert_eq!(viewport.cell_at(17, 7), None);
        // Border and beyond
        assert_eq!(viewport.cell_at(10, 7), None);
        assert_eq!(viewport.cell_at(100, 7), None);
    }

    #[test]
    fn test_cell_at_respects_scroll() {
        let viewport = Viewport::new(panel(), 16, 24, WellCoordinate::new(15, 23));
        assert_eq!(viewport.cell_at(15, 7), Some(WellCoordinate::new(7, 13)));
    }

    #[test]
    fn test_cell_at_past_last_column() {
        let viewport = Viewport::new(panel(), 2, 2, WellCoordinate::default());
        // Third cell position does not exist on a 2 × 2 plate
        assert_eq!(viewport.cell_at(21, 7), None);
        // Third row does not exist either
        assert_eq!(viewport.cell_at(15, 9), None);
    }
}
