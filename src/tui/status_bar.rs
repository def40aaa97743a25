//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help_registry::contexts;
use super::{AppState, PopupType, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        // First line: error, status message, or hints
        let first_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(state.status_message.clone())
        } else {
            Self::hints_line(state, theme)
        };

        let status = Paragraph::new(vec![first_line, Self::help_line(state, theme)])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Help context for the current popup
    #[must_use]
    pub const fn current_context(state: &AppState) -> &'static str {
        match state.active_popup {
            Some(PopupType::HelpOverlay) => contexts::HELP,
            Some(PopupType::Settings) => contexts::SETTINGS,
            Some(PopupType::OpenPicklist) => contexts::OPEN_PICKLIST,
            None => contexts::MAIN,
        }
    }

    /// Top-priority hints as `key action` pairs
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints = state
            .help
            .format_status_bar_hints(Self::current_context(state), 5);

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(action, Style::default().fg(theme.text_muted)));
        }

        Line::from(spans)
    }

    /// Bottom line: "Help: key: action | ... | ?: Help"
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context_name = Self::current_context(state);
        let in_main = context_name == contexts::MAIN;

        let mut spans: Vec<Span<'static>> = vec![Span::styled(
            "Help: ",
            Style::default().fg(theme.primary),
        )];

        let hints = state.help.get_status_bar_hints(context_name);
        let max_hints = if in_main { 6 } else { 5 };
        for (i, binding) in hints.into_iter().take(max_hints).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            let key = if binding.alt_keys.is_empty() {
                binding.keys.join(",")
            } else {
                format!("{}/{}", binding.keys.join(","), binding.alt_keys.join(","))
            };
            let action = binding.hint.clone().unwrap_or_else(|| binding.action.clone());
            spans.push(Span::styled(key, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action));
        }

        if in_main {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("?", Style::default().fg(theme.accent)));
            spans.push(Span::raw(": Help"));
        }

        Line::from(spans)
    }
}
