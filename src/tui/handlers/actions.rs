//! Action dispatch for the main view.

use anyhow::Result;

use crate::models::PlateSide;
use crate::shortcuts::Action;
use crate::tui::AppState;

/// Runs an action. Returns `true` when the application should quit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    match action {
        // Cursor
        Action::NavigateUp => state.move_cursor(-1, 0),
        Action::NavigateDown => state.move_cursor(1, 0),
        Action::NavigateLeft => state.move_cursor(0, -1),
        Action::NavigateRight => state.move_cursor(0, 1),
        Action::JumpToFirst => state.jump_to_column(false),
        Action::JumpToLast => state.jump_to_column(true),
        Action::SwitchPlate => state.switch_focus(),

        // Plate pair
        Action::NextSourcePlate => state.cycle_plate(PlateSide::Source, true),
        Action::PreviousSourcePlate => state.cycle_plate(PlateSide::Source, false),
        Action::NextDestPlate => state.cycle_plate(PlateSide::Destination, true),
        Action::PreviousDestPlate => state.cycle_plate(PlateSide::Destination, false),

        // Files & settings
        Action::OpenPicklist => state.open_path_prompt(),
        Action::ReloadPicklist => handle_reload(state),
        Action::OpenSettings => state.open_settings(),

        // General
        Action::ToggleHelp => state.open_help_overlay(),
        Action::Cancel => {
            state.clear_hover();
            state.set_status("");
        }
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
    }
    Ok(false)
}

fn handle_reload(state: &mut AppState) {
    if state.picklist_path.is_none() {
        state.set_status("No picklist to reload");
        return;
    }
    if let Err(e) = state.reload_picklist() {
        state.set_error(format!("Failed to reload picklist: {e:#}"));
    }
}
