//! Details panel: the hovered well, its transfers and the colour legend.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::AppState;
use crate::models::name_to_coord;
use crate::services::hover::format_volume;
use crate::services::{HoverResult, WellState};

/// Details panel widget
pub struct DetailsPanel;

impl DetailsPanel {
    /// Render the details panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let mut lines: Vec<Line> = Vec::new();

        match &state.hover_result {
            Some(result) => Self::push_hover_lines(&mut lines, state, result),
            None => lines.push(Line::from(Span::styled(
                "Move the cursor or the mouse over a well",
                Style::default().fg(theme.text_muted),
            ))),
        }

        Self::push_warnings(&mut lines, state);

        lines.push(Line::from(""));
        lines.push(Self::legend(state));

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Well Details ")
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(panel, area);
    }

    fn push_hover_lines(lines: &mut Vec<Line<'static>>, state: &AppState, result: &HoverResult) {
        let theme = &state.theme;
        let label = Style::default().fg(theme.text_secondary);

        let plate = state
            .session
            .selection()
            .map_or_else(String::new, |s| s.plate(result.side).to_string());
        lines.push(Line::from(vec![
            Span::styled(
                result.well.clone(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} {plate}", result.side), label),
        ]));

        let well_state = state.grids().and_then(|grids| {
            let coord = name_to_coord(&result.well).ok()?;
            grids.grid(result.side).state(coord.row, coord.col)
        });
        let ceiling = state.session.ceilings().for_side(result.side);
        let (state_text, state_color) = match well_state {
            Some(WellState::Overfull) => ("overfull", theme.error),
            Some(WellState::Used) => ("used", theme.success),
            Some(WellState::Empty) | None => ("empty", theme.text_muted),
        };

        lines.push(Line::from(vec![
            Span::styled("Total: ", label),
            Span::styled(
                format!("{} nl", format_volume(result.total_volume_nl)),
                Style::default().fg(theme.text),
            ),
            Span::styled(format!(" ({state_text})"), Style::default().fg(state_color)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Ceiling: ", label),
            Span::styled(format!("{ceiling:.1} nl"), Style::default().fg(theme.text)),
        ]));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Transfers:", label)));
        for summary in &result.summary_lines {
            lines.push(Line::from(Span::styled(
                format!("  {summary}"),
                Style::default().fg(theme.text),
            )));
        }

        if !result.related_wells.is_empty() {
            let names: Vec<&str> = result.related_wells.iter().map(|w| w.well.as_str()).collect();
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(format!("Related {} wells: ", result.side.opposite()), label),
                Span::styled(names.join(", "), Style::default().fg(theme.accent)),
            ]));
        }
    }

    fn push_warnings(lines: &mut Vec<Line<'static>>, state: &AppState) {
        let theme = &state.theme;
        let warning = Style::default().fg(theme.warning);

        if !state.skipped_rows.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} picklist row(s) skipped", state.skipped_rows.len()),
                warning,
            )));
        }

        if let Some(grids) = state.grids() {
            for grid in [&grids.source, &grids.dest] {
                let off_grid = grid.off_grid_wells();
                if off_grid.is_empty() {
                    continue;
                }
                let names: Vec<&str> = off_grid.iter().map(|w| w.well.as_str()).collect();
                lines.push(Line::from(Span::styled(
                    format!("{} wells off the grid: {}", grid.side(), names.join(", ")),
                    warning,
                )));
            }
        }
    }

    fn legend(state: &AppState) -> Line<'static> {
        let theme = &state.theme;
        let swatch = |color| Span::styled("  ", Style::default().bg(color));
        let text = |label: &'static str| Span::styled(label, Style::default().fg(theme.text_muted));

        Line::from(vec![
            swatch(theme.well_color(WellState::Empty)),
            text(" empty  "),
            swatch(theme.well_color(WellState::Used)),
            text(" used  "),
            swatch(theme.well_color(WellState::Overfull)),
            text(" overfull  "),
            swatch(theme.accent),
            text(" related"),
        ])
    }
}
