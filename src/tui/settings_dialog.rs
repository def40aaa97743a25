//! Plate settings dialog: dimensions and well ceilings for both plates.

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::component::Component;
use super::Theme;
use crate::config::{CeilingConfig, Config, PlateConfig};

/// Editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    /// Source plate rows
    SourceRows,
    /// Source plate columns
    SourceCols,
    /// Destination plate rows
    DestRows,
    /// Destination plate columns
    DestCols,
    /// Source well ceiling (nl)
    SourceCeiling,
    /// Destination well ceiling (nl)
    DestCeiling,
}

impl SettingsField {
    /// All fields in display order.
    pub const ALL: [Self; 6] = [
        Self::SourceRows,
        Self::SourceCols,
        Self::DestRows,
        Self::DestCols,
        Self::SourceCeiling,
        Self::DestCeiling,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SourceRows => "Source rows",
            Self::SourceCols => "Source columns",
            Self::DestRows => "Destination rows",
            Self::DestCols => "Destination columns",
            Self::SourceCeiling => "Source ceiling (nl)",
            Self::DestCeiling => "Destination ceiling (nl)",
        }
    }

    /// Ceilings accept a decimal point, dimensions do not.
    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::SourceCeiling | Self::DestCeiling)
    }
}

/// Events emitted by the settings dialog
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    /// Validated settings to apply
    Applied(PlateConfig, CeilingConfig),
    /// Dialog dismissed without changes
    Cancelled,
}

/// Settings dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialogState {
    values: [String; 6],
    /// Index of the selected field
    pub selected: usize,
    /// Validation error from the last apply attempt
    pub error_message: Option<String>,
}

impl SettingsDialogState {
    /// Dialog pre-filled with the given settings.
    #[must_use]
    pub fn new(plates: &PlateConfig, ceilings: &CeilingConfig) -> Self {
        Self {
            values: [
                plates.source_rows.to_string(),
                plates.source_cols.to_string(),
                plates.dest_rows.to_string(),
                plates.dest_cols.to_string(),
                ceilings.source_nl.to_string(),
                ceilings.dest_nl.to_string(),
            ],
            selected: 0,
            error_message: None,
        }
    }

    /// Currently selected field.
    #[must_use]
    pub const fn selected_field(&self) -> SettingsField {
        SettingsField::ALL[self.selected]
    }

    /// Text typed for a field.
    #[must_use]
    pub fn value(&self, field: SettingsField) -> &str {
        &self.values[Self::index(field)]
    }

    fn index(field: SettingsField) -> usize {
        SettingsField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }

    /// Select the next field, wrapping around
    pub const fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SettingsField::ALL.len();
    }

    /// Select the previous field, wrapping around
    pub const fn select_previous(&mut self) {
        self.selected = (self.selected + SettingsField::ALL.len() - 1) % SettingsField::ALL.len();
    }

    /// Types a character into the selected field; anything but digits (and
    /// one decimal point for ceilings) is ignored.
    pub fn push_char(&mut self, c: char) {
        let field = self.selected_field();
        let value = &mut self.values[self.selected];
        let accepted = c.is_ascii_digit() || (c == '.' && field.is_decimal() && !value.contains('.'));
        if accepted {
            value.push(c);
            self.error_message = None;
        }
    }

    /// Deletes the last character of the selected field
    pub fn backspace(&mut self) {
        self.values[self.selected].pop();
        self.error_message = None;
    }

    /// Parses and validates the fields on top of `base`.
    pub fn apply_to(&self, base: &Config) -> Result<Config> {
        let whole = |field: SettingsField| -> Result<usize> {
            self.value(field)
                .parse()
                .with_context(|| format!("{} must be a whole number", field.label()))
        };
        let decimal = |field: SettingsField| -> Result<f64> {
            self.value(field)
                .parse()
                .with_context(|| format!("{} must be a number", field.label()))
        };

        let mut config = base.clone();
        config.plates = PlateConfig {
            source_rows: whole(SettingsField::SourceRows)?,
            source_cols: whole(SettingsField::SourceCols)?,
            dest_rows: whole(SettingsField::DestRows)?,
            dest_cols: whole(SettingsField::DestCols)?,
        };
        config.ceilings = CeilingConfig {
            source_nl: decimal(SettingsField::SourceCeiling)?,
            dest_nl: decimal(SettingsField::DestCeiling)?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Component for SettingsDialogState {
    type Event = SettingsEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.select_next();
                None
            }
            KeyCode::Char(c) => {
                self.push_char(c);
                None
            }
            KeyCode::Backspace => {
                self.backspace();
                None
            }
            KeyCode::Enter => match self.apply_to(&Config::default()) {
                Ok(config) => Some(SettingsEvent::Applied(config.plates, config.ceilings)),
                Err(e) => {
                    self.error_message = Some(format!("{e:#}"));
                    None
                }
            },
            KeyCode::Esc => Some(SettingsEvent::Cancelled),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Plate Settings ")
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(6),    // Fields
                Constraint::Length(2), // Validation error
                Constraint::Length(1), // Instructions
            ])
            .split(inner);

        let lines: Vec<Line> = SettingsField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.selected;
                let label_style = if selected {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_secondary)
                };
                let cursor = if selected { "_" } else { "" };
                Line::from(vec![
                    Span::styled(if selected { "> " } else { "  " }, label_style),
                    Span::styled(format!("{:<26}", field.label()), label_style),
                    Span::styled(
                        format!("{}{cursor}", self.values[i]),
                        Style::default().fg(theme.text),
                    ),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[0]);

        if let Some(error) = &self.error_message {
            let error = Paragraph::new(error.as_str())
                .style(Style::default().fg(theme.error))
                .wrap(Wrap { trim: true });
            f.render_widget(error, chunks[1]);
        }

        let instructions = Paragraph::new("↑↓: Field | Enter: Apply | Esc: Cancel")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center);
        f.render_widget(instructions, chunks[2]);
    }
}
