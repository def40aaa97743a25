//! Prompt for the path of a picklist CSV to open.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::PathBuf;

use super::component::Component;
use super::Theme;

/// Events emitted by the path prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPromptEvent {
    /// Path to load
    Submitted(PathBuf),
    /// Prompt dismissed
    Cancelled,
}

/// Path prompt state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPromptState {
    /// Text typed so far
    pub input: String,
}

impl PathPromptState {
    /// Prompt pre-filled with `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            input: initial.into(),
        }
    }

    /// Typed path with a leading `~` expanded, or `None` when blank.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        let input = self.input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(rest) = input.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(rest));
            }
        }
        Some(PathBuf::from(input))
    }
}

impl Component for PathPromptState {
    type Event = PathPromptEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Enter => self.path().map(PathPromptEvent::Submitted),
            KeyCode::Esc => Some(PathPromptEvent::Cancelled),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            // Ctrl+U clears the line like a shell
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Instructions
            ])
            .split(area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.input.as_str(), Style::default().fg(theme.text)),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Open Picklist ")
                .border_style(Style::default().fg(theme.primary)),
        );
        f.render_widget(input, chunks[0]);

        let instructions = Paragraph::new("Enter: Load | Ctrl+U: Clear | Esc: Cancel")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center);
        f.render_widget(instructions, chunks[1]);
    }
}
