//! Help overlay widget listing every keybinding by context.
//!
//! The content is generated from the embedded help registry, so it always
//! matches the bindings shown in the status bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::help_registry::{contexts, HelpRegistry};
use super::Theme;

/// Width of the key column.
const KEY_COLUMN: usize = 22;

/// Scroll position of the help overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    /// Total number of content lines
    total_lines: usize,
}

impl HelpOverlayState {
    /// State for content of `total_lines` lines, scrolled to the top.
    #[must_use]
    pub const fn new(total_lines: usize) -> Self {
        Self {
            scroll_offset: 0,
            total_lines,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to the bottom.
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(1);
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self, visible_height: usize) {
        self.scroll_offset =
            (self.scroll_offset + visible_height).min(self.total_lines.saturating_sub(1));
    }

    /// Scroll up by a page.
    pub const fn page_up(&mut self, visible_height: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(visible_height);
    }
}

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    /// Help content: one section per context.
    #[must_use]
    pub fn content(registry: &HelpRegistry, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} - Help", registry.app_name()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for name in contexts::ORDERED {
            let Some(context) = registry.get_context(name) else {
                continue;
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!("═══ {} ═══", context.name.to_uppercase()),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", context.description),
                    Style::default().fg(theme.text_muted),
                ),
            ]));

            for binding in registry.get_bindings(name) {
                let (keys, action) = HelpRegistry::format_binding_for_help(binding);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {keys:<KEY_COLUMN$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(action, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    /// Number of content lines.
    #[must_use]
    pub fn line_count(registry: &HelpRegistry) -> usize {
        Self::content(registry, &Theme::dark()).len()
    }

    /// Render the help overlay
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        registry: &HelpRegistry,
        state: &HelpOverlayState,
        theme: &Theme,
    ) {
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = Self::content(registry, theme);
        let visible_height = content_area.height.saturating_sub(2) as usize;

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            )
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .scroll((state.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state = ScrollbarState::new(state.total_lines.saturating_sub(visible_height))
            .position(state.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
