//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::tui::component::Component;
use crate::tui::path_prompt::PathPromptEvent;
use crate::tui::settings_dialog::SettingsEvent;
use crate::tui::{AppState, PopupType};

/// Routes input to the active popup.
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::HelpOverlay) => handle_help_overlay_input(state, key),
        Some(PopupType::Settings) => handle_settings_input(state, key),
        Some(PopupType::OpenPicklist) => handle_path_prompt_input(state, key),
        None => Ok(false),
    }
}

/// Handle input for help overlay
pub fn handle_help_overlay_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') => state.close_popup(),
        KeyCode::Up | KeyCode::Char('k') => state.help_overlay.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => state.help_overlay.scroll_down(),
        // Approximate visible height
        KeyCode::PageUp => state.help_overlay.page_up(20),
        KeyCode::PageDown => state.help_overlay.page_down(20),
        KeyCode::Home => state.help_overlay.scroll_to_top(),
        KeyCode::End => state.help_overlay.scroll_to_bottom(),
        _ => {}
    }
    Ok(false)
}

/// Handle input for the plate settings dialog
pub fn handle_settings_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.settings_dialog.handle_input(key) {
        Some(SettingsEvent::Applied(plates, ceilings)) => {
            state.close_popup();
            state.apply_plate_settings(plates, ceilings);
        }
        Some(SettingsEvent::Cancelled) => {
            state.close_popup();
            state.set_status("Cancelled");
        }
        None => {}
    }
    Ok(false)
}

/// Handle input for the open-picklist prompt
pub fn handle_path_prompt_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.path_prompt.handle_input(key) {
        Some(PathPromptEvent::Submitted(path)) => {
            state.close_popup();
            match state.open_picklist(&path) {
                Ok(()) => state.remember_picklist(),
                Err(e) => state.set_error(format!("{e:#}")),
            }
        }
        Some(PathPromptEvent::Cancelled) => {
            state.close_popup();
            state.set_status("Cancelled");
        }
        None => {}
    }
    Ok(false)
}
