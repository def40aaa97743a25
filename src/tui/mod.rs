//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event routing and the
//! Ratatui widgets for the two plates, the details panel and the dialogs.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Terminal coordinates are u16, grid indices usize
#![allow(clippy::cast_possible_truncation)]

pub mod component;
pub mod details;
pub mod handlers;
pub mod help_overlay;
pub mod help_registry;
pub mod layout;
pub mod path_prompt;
pub mod plate;
pub mod settings_dialog;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{CeilingConfig, Config, PlateConfig};
use crate::constants::APP_NAME;
use crate::models::{coord_to_name, name_to_coord, PlateError, PlateSide, WellCoordinate};
use crate::parser::{load_picklist, SkippedRow};
use crate::services::{
    HoverEvent, HoverResult, HoverState, HoveredWell, PicklistSession, PlateGrids, PlateView,
};
use crate::shortcuts::ShortcutRegistry;

pub use component::Component;
pub use details::DetailsPanel;
pub use help_overlay::{HelpOverlay, HelpOverlayState};
pub use help_registry::HelpRegistry;
pub use layout::AppLayout;
pub use path_prompt::PathPromptState;
pub use plate::{PlateWidget, Viewport};
pub use settings_dialog::SettingsDialogState;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Keybinding help
    HelpOverlay,
    /// Plate dimensions and ceilings
    Settings,
    /// Path prompt for loading a picklist
    OpenPicklist,
}

/// Cursor position on each plate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlateCursors {
    /// Cursor on the source plate
    pub source: WellCoordinate,
    /// Cursor on the destination plate
    pub dest: WellCoordinate,
}

impl PlateCursors {
    /// Cursor on one side.
    #[must_use]
    pub const fn get(&self, side: PlateSide) -> WellCoordinate {
        match side {
            PlateSide::Source => self.source,
            PlateSide::Destination => self.dest,
        }
    }

    fn set(&mut self, side: PlateSide, coord: WellCoordinate) {
        match side {
            PlateSide::Source => self.source = coord,
            PlateSide::Destination => self.dest = coord,
        }
    }
}

/// Application state for the TUI.
pub struct AppState {
    // Core data
    /// Loaded picklist and plate selection
    pub session: PicklistSession,
    /// File the picklist was loaded from
    pub picklist_path: Option<PathBuf>,
    /// Rows the loader rejected
    pub skipped_rows: Vec<SkippedRow>,
    /// Grids for the current selection, recomputed on every change
    pub view: PlateView,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Plate the cursor is on
    pub focus: PlateSide,
    /// Cursor per plate
    pub cursors: PlateCursors,
    /// Hover state machine
    pub hover: HoverState,
    /// Details of the hovered well
    pub hover_result: Option<HoverResult>,
    /// Wells currently painted as related to the hovered well
    pub highlighted: HashSet<(PlateSide, WellCoordinate)>,
    /// Terminal area of the last frame, for mouse hit-testing
    pub screen: Rect,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Settings dialog fields
    pub settings_dialog: SettingsDialogState,
    /// Path prompt input
    pub path_prompt: PathPromptState,
    /// Help overlay scroll position
    pub help_overlay: HelpOverlayState,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // System resources
    /// Persisted configuration (without per-run overrides)
    pub config: Config,
    /// Keybinding help
    pub help: HelpRegistry,
    /// Key to action mapping
    pub shortcuts: ShortcutRegistry,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state with no picklist loaded.
    ///
    /// `plates` and `ceilings` are the effective settings for this run, which
    /// may differ from `config` when overridden on the command line.
    pub fn new(config: Config, plates: PlateConfig, ceilings: CeilingConfig) -> Result<Self> {
        let help = HelpRegistry::load()?;
        let theme = Theme::from_mode(config.ui.theme_mode);
        let settings_dialog = SettingsDialogState::new(&plates, &ceilings);

        Ok(Self {
            session: PicklistSession::new(plates, ceilings),
            picklist_path: None,
            skipped_rows: Vec::new(),
            view: PlateView::NoData(PlateError::EmptyTable),
            theme,
            focus: PlateSide::Source,
            cursors: PlateCursors::default(),
            hover: HoverState::Idle,
            hover_result: None,
            highlighted: HashSet::new(),
            screen: Rect::default(),
            active_popup: None,
            settings_dialog,
            path_prompt: PathPromptState::default(),
            help_overlay: HelpOverlayState::default(),
            status_message: String::new(),
            error_message: None,
            config,
            help,
            shortcuts: ShortcutRegistry::new(),
            should_quit: false,
        })
    }

    /// Loads a picklist and shows its first plate pair.
    pub fn open_picklist(&mut self, path: &Path) -> Result<()> {
        let loaded = load_picklist(path)?;
        let records = loaded.table.len();
        let skipped = loaded.skipped.len();

        self.session.load(loaded.table);
        self.picklist_path = Some(path.to_path_buf());
        self.skipped_rows = loaded.skipped;
        self.focus = PlateSide::Source;
        self.cursors = PlateCursors::default();
        self.refresh_view();

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        if skipped > 0 {
            self.set_status(format!(
                "Loaded {records} transfers from {name} ({skipped} rows skipped)"
            ));
        } else {
            self.set_status(format!("Loaded {records} transfers from {name}"));
        }
        Ok(())
    }

    /// Loads the current picklist again.
    pub fn reload_picklist(&mut self) -> Result<()> {
        let path = self
            .picklist_path
            .clone()
            .context("No picklist to reload")?;
        let selection = self.session.selection().cloned();
        self.open_picklist(&path)?;

        // Keep the plate pair when it still exists
        if let Some(selection) = selection {
            for side in [PlateSide::Source, PlateSide::Destination] {
                let plate = selection.plate(side);
                if let Err(e) = self.session.select_plate(side, plate) {
                    tracing::debug!(%side, plate, error = %e, "plate gone after reload");
                }
            }
            self.refresh_view();
        }
        Ok(())
    }

    /// Records the open picklist in the persisted config.
    pub fn remember_picklist(&mut self) {
        if self.picklist_path == self.config.ui.last_picklist {
            return;
        }
        self.config.ui.last_picklist.clone_from(&self.picklist_path);
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %format!("{e:#}"), "could not remember picklist");
        }
    }

    /// Recomputes the grids and resets the hover.
    pub fn refresh_view(&mut self) {
        self.view = match self.session.view() {
            Ok(view) => view,
            Err(err) => {
                self.set_error(err.to_string());
                PlateView::NoData(err)
            }
        };
        self.hover = HoverState::Idle;
        self.hover_result = None;
        self.highlighted.clear();

        if let Some(grids) = self.grids() {
            let clamp = |coord: WellCoordinate, side| {
                let grid = grids.grid(side);
                WellCoordinate::new(
                    coord.row.min(grid.rows().saturating_sub(1)),
                    coord.col.min(grid.cols().saturating_sub(1)),
                )
            };
            let cursors = PlateCursors {
                source: clamp(self.cursors.source, PlateSide::Source),
                dest: clamp(self.cursors.dest, PlateSide::Destination),
            };
            self.cursors = cursors;
            self.hover_cursor();
        }
    }

    /// Grids for the current selection, if any.
    #[must_use]
    pub const fn grids(&self) -> Option<&PlateGrids> {
        match &self.view {
            PlateView::Ready(grids) => Some(grids),
            PlateView::NoData(_) => None,
        }
    }

    /// Moves the cursor on the focused plate, staying inside the grid.
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let Some(grids) = self.grids() else {
            return;
        };
        let grid = grids.grid(self.focus);
        let cursor = self.cursors.get(self.focus);
        let step = |value: usize, delta: isize, len: usize| {
            value
                .saturating_add_signed(delta)
                .min(len.saturating_sub(1))
        };
        let next = WellCoordinate::new(
            step(cursor.row, d_row, grid.rows()),
            step(cursor.col, d_col, grid.cols()),
        );
        self.cursors.set(self.focus, next);
        self.hover_cursor();
    }

    /// Moves the cursor to the first or last column of its row.
    pub fn jump_to_column(&mut self, last: bool) {
        let Some(grids) = self.grids() else {
            return;
        };
        let cols = grids.grid(self.focus).cols();
        let cursor = self.cursors.get(self.focus);
        let col = if last { cols.saturating_sub(1) } else { 0 };
        self.cursors.set(self.focus, WellCoordinate::new(cursor.row, col));
        self.hover_cursor();
    }

    /// Moves focus to the other plate.
    pub fn switch_focus(&mut self) {
        self.focus = self.focus.opposite();
        self.hover_cursor();
    }

    /// Puts the cursor on a cell and hovers it.
    pub fn hover_cell(&mut self, side: PlateSide, coord: WellCoordinate) {
        self.focus = side;
        self.cursors.set(side, coord);
        self.hover_cursor();
    }

    /// Hovers the well under the focused cursor.
    pub fn hover_cursor(&mut self) {
        let coord = self.cursors.get(self.focus);
        match coord_to_name(coord.row, coord.col) {
            Ok(well) => self.hover_well(Some(HoveredWell {
                well,
                side: self.focus,
            })),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Ends the current hover.
    pub fn clear_hover(&mut self) {
        self.hover_well(None);
    }

    /// Feeds an enter (`Some`) or leave (`None`) event to the hover machine.
    pub fn hover_well(&mut self, target: Option<HoveredWell>) {
        let PlateView::Ready(grids) = &self.view else {
            return;
        };
        let Ok(ctx) = self.session.hover_context(grids) else {
            return;
        };

        let event = target.map_or(HoverEvent::Leave, HoverEvent::Enter);
        let (next, update) = std::mem::take(&mut self.hover).apply(event, &ctx);

        for restore in &update.restore {
            if let Ok(coord) = name_to_coord(&restore.well.well) {
                self.highlighted.remove(&(restore.well.side, coord));
            }
        }

        match update.hovered {
            Some(result) => {
                // Only wells on the grid get a restore when the hover ends
                self.highlighted.extend(
                    result
                        .related_wells
                        .iter()
                        .filter(|w| matches!(grids.grid(w.side).state_of(&w.well), Ok(Some(_))))
                        .filter_map(|w| name_to_coord(&w.well).ok().map(|c| (w.side, c))),
                );
                self.hover_result = Some(result);
            }
            None => self.hover_result = None,
        }
        self.hover = next;
    }

    /// Whether a cell is painted as related to the hovered well.
    #[must_use]
    pub fn is_highlighted(&self, side: PlateSide, coord: WellCoordinate) -> bool {
        self.highlighted.contains(&(side, coord))
    }

    /// Selects the next or previous plate on one side.
    pub fn cycle_plate(&mut self, side: PlateSide, forward: bool) {
        match self.session.cycle_plate(side, forward) {
            Ok(name) => {
                self.refresh_view();
                tracing::debug!(side = %side, plate = %name, "plate cycled");
                self.set_status(format!("{side} plate: {name}"));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Applies new plate settings for this run and persists them.
    pub fn apply_plate_settings(&mut self, plates: PlateConfig, ceilings: CeilingConfig) {
        self.session.set_plate_settings(plates, ceilings);
        self.config.plates = plates;
        self.config.ceilings = ceilings;
        self.refresh_view();

        match self.config.save() {
            Ok(()) => self.set_status("Plate settings saved"),
            Err(e) => self.set_error(format!("Failed to save settings: {e:#}")),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        tracing::warn!(%error, "shown to user");
        self.error_message = Some(error);
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Opens the help overlay.
    pub fn open_help_overlay(&mut self) {
        self.help_overlay = HelpOverlayState::new(HelpOverlay::line_count(&self.help));
        self.active_popup = Some(PopupType::HelpOverlay);
    }

    /// Opens the settings dialog with the current settings.
    pub fn open_settings(&mut self) {
        self.settings_dialog =
            SettingsDialogState::new(self.session.plates(), self.session.ceilings());
        self.active_popup = Some(PopupType::Settings);
    }

    /// Opens the picklist path prompt.
    pub fn open_path_prompt(&mut self) {
        let initial = self
            .picklist_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.path_prompt = PathPromptState::new(initial);
        self.active_popup = Some(PopupType::OpenPicklist);
    }

    /// Closes the active popup.
    pub fn close_popup(&mut self) {
        self.active_popup = None;
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        state.screen = Rect::new(0, 0, size.width, size.height);

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? && handle_event(state, event::read()?)? {
            break;
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let layout = AppLayout::new(f.area());

    render_title_bar(f, layout.title, state);
    PlateWidget::render(f, layout.source, state, PlateSide::Source);
    PlateWidget::render(f, layout.dest, state, PlateSide::Destination);
    DetailsPanel::render(f, layout.details, state);
    StatusBar::render(f, layout.status, state, &state.theme);

    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Title bar: file, plate pair and time estimates
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut spans = vec![Span::styled(
        format!(" {APP_NAME}"),
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(path) = &state.picklist_path {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        spans.push(Span::styled(
            format!(" - {name}"),
            Style::default().fg(theme.text),
        ));
    }

    if let Some(selection) = state.session.selection() {
        let estimates = state.session.estimates();
        spans.push(Span::styled(
            format!("  [{selection}]"),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::styled(
            format!(
                "  pair {}  |  all transfers {}",
                estimates.current_pair, estimates.total
            ),
            Style::default().fg(theme.text_secondary),
        ));
    }

    let title_widget = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match popup_type {
        PopupType::HelpOverlay => {
            let area = centered_rect(80, 85, f.area());
            HelpOverlay::render(f, area, &state.help, &state.help_overlay, &state.theme);
        }
        PopupType::Settings => {
            let area = centered_rect(50, 60, f.area());
            state.settings_dialog.render(f, area, &state.theme);
        }
        PopupType::OpenPicklist => {
            let area = centered_rect(70, 25, f.area());
            state.path_prompt.render(f, area, &state.theme);
        }
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Routes one terminal event. Returns `true` to quit.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<bool> {
    match event {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => handle_key_event(state, key),
        Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse),
        // Resize and focus changes are picked up on the next draw
        _ => Ok(false),
    }
}

/// Handle keyboard input events. Returns `true` to quit.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // Error overlay swallows input until dismissed
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        return Ok(false);
    }

    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::WellState;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn picklist_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn state_with(content: &str) -> (AppState, NamedTempFile) {
        let file = picklist_file(content);
        let mut state = AppState::new(
            Config::new(),
            PlateConfig::default(),
            CeilingConfig::default(),
        )
        .unwrap();
        state.open_picklist(file.path()).unwrap();
        (state, file)
    }

    const SCENARIO: &str = "\
Source Plate Name,Source Well,Destination Plate Name,Destination Well,Transfer Volume
sp1,A1,dp1,B2,26000
sp1,A1,dp1,B2,26000
sp1,C3,dp1,D4,100
";

    #[test]
    fn test_open_picklist_hovers_cursor() {
        let (state, _file) = state_with(SCENARIO);
        let grids = state.grids().unwrap();
        assert_eq!(grids.source.state_of("A1").unwrap(), Some(WellState::Overfull));

        let result = state.hover_result.as_ref().unwrap();
        assert_eq!(result.well, "A1");
        assert_eq!(result.summary_lines, vec!["dp1: B2 - 26000.0 nl (*2)"]);
        assert!(state.is_highlighted(PlateSide::Destination, WellCoordinate::new(1, 1)));
        assert!(state.status_message.contains("Loaded 3 transfers"));
    }

    #[test]
    fn test_moving_cursor_leaves_previous_well() {
        let (mut state, _file) = state_with(SCENARIO);
        state.move_cursor(2, 2);

        assert_eq!(state.cursors.source, WellCoordinate::new(2, 2));
        assert_eq!(state.hover_result.as_ref().unwrap().well, "C3");
        assert!(!state.is_highlighted(PlateSide::Destination, WellCoordinate::new(1, 1)));
        assert!(state.is_highlighted(PlateSide::Destination, WellCoordinate::new(3, 3)));
        assert_eq!(state.highlighted.len(), 1);
    }

    #[test]
    fn test_cursor_stays_inside_grid() {
        let (mut state, _file) = state_with(SCENARIO);
        state.move_cursor(-1, -1);
        assert_eq!(state.cursors.source, WellCoordinate::new(0, 0));
        state.move_cursor(100, 100);
        assert_eq!(state.cursors.source, WellCoordinate::new(15, 23));
        state.jump_to_column(false);
        assert_eq!(state.cursors.source, WellCoordinate::new(15, 0));
    }

    #[test]
    fn test_clear_hover_restores_highlights() {
        let (mut state, _file) = state_with(SCENARIO);
        assert!(!state.highlighted.is_empty());
        state.clear_hover();
        assert!(state.highlighted.is_empty());
        assert!(state.hover_result.is_none());
        assert_eq!(state.hover, HoverState::Idle);
    }

    #[test]
    fn test_off_grid_related_well_is_not_highlighted() {
        let file = picklist_file(
            "Source Well,Destination Well,Transfer Volume\nA1,Q1,100\nA2,B1,100\n",
        );
        let plates = PlateConfig {
            dest_rows: 8,
            ..PlateConfig::default()
        };
        let mut state = AppState::new(Config::new(), plates, CeilingConfig::default()).unwrap();
        state.open_picklist(file.path()).unwrap();

        // Q1 is row 16 on an 8-row plate: listed, but never painted
        let result = state.hover_result.as_ref().unwrap();
        assert_eq!(result.summary_lines, vec!["dp1: Q1 - 100.0 nl"]);
        assert!(state.highlighted.is_empty());

        state.move_cursor(0, 1);
        assert!(state.is_highlighted(PlateSide::Destination, WellCoordinate::new(1, 0)));
        state.move_cursor(0, -1);
        state.clear_hover();
        assert!(state.highlighted.is_empty());
    }

    #[test]
    fn test_reload_drops_vanished_plate() {
        let (mut state, file) = state_with(
            "Source Plate Name,Source Well,Destination Plate Name,Destination Well,Transfer Volume\n\
             sp1,A1,dp1,A1,100\nsp2,B2,dp1,C3,200\n",
        );
        state.cycle_plate(PlateSide::Source, true);
        assert_eq!(state.session.selection().unwrap().source, "sp2");

        std::fs::write(
            file.path(),
            "Source Plate Name,Source Well,Destination Plate Name,Destination Well,Transfer Volume\n\
             sp1,A1,dp1,A1,100\n",
        )
        .unwrap();
        state.reload_picklist().unwrap();

        let selection = state.session.selection().unwrap();
        assert_eq!(selection.source, "sp1");
        assert_eq!(selection.dest, "dp1");
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_handle_event_routes_mouse_and_keys() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

        let (mut state, _file) = state_with(SCENARIO);
        state.screen = Rect::new(0, 0, 160, 60);

        let layout = AppLayout::new(state.screen);
        let viewport =
            PlateWidget::viewport(&state, layout.plate(PlateSide::Destination), PlateSide::Destination)
                .unwrap();
        // B2 on the destination plate
        let x = viewport.inner.x + 3 + 3 + 1;
        let y = viewport.inner.y + 1 + 1;
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!handle_event(&mut state, moved).unwrap());
        assert_eq!(state.focus, PlateSide::Destination);
        assert_eq!(state.hover_result.as_ref().unwrap().well, "B2");
        assert!(state.is_highlighted(PlateSide::Source, WellCoordinate::new(0, 0)));

        let down = Event::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert!(!handle_event(&mut state, down).unwrap());
        assert_eq!(state.cursors.dest, WellCoordinate::new(2, 1));
        assert!(state.highlighted.is_empty());

        assert!(!handle_event(&mut state, Event::Resize(100, 40)).unwrap());

        let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(handle_event(&mut state, quit).unwrap());
        assert!(state.should_quit);
    }

    #[test]
    fn test_switch_focus_hovers_other_plate() {
        let (mut state, _file) = state_with(SCENARIO);
        state.switch_focus();
        state.move_cursor(1, 1);
        let result = state.hover_result.as_ref().unwrap();
        assert_eq!(result.side, PlateSide::Destination);
        assert_eq!(result.well, "B2");
        assert!(state.is_highlighted(PlateSide::Source, WellCoordinate::new(0, 0)));
    }

    #[test]
    fn test_unsupported_rows_shows_error() {
        let (mut state, _file) = state_with(SCENARIO);
        let plates = PlateConfig {
            source_rows: 60,
            ..PlateConfig::default()
        };
        state.session.set_plate_settings(plates, CeilingConfig::default());
        state.refresh_view();
        assert!(state.grids().is_none());
        assert!(state.error_message.as_ref().unwrap().contains("60"));
    }

    #[test]
    fn test_open_missing_picklist_fails() {
        let mut state = AppState::new(
            Config::new(),
            PlateConfig::default(),
            CeilingConfig::default(),
        )
        .unwrap();
        assert!(state.open_picklist(Path::new("/nonexistent.csv")).is_err());
        assert!(state.grids().is_none());
    }
}
