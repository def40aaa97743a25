//! Mouse input: hovering wells with the pointer.

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::models::{coord_to_name, PlateSide, WellCoordinate};
use crate::tui::{AppLayout, AppState, PlateWidget};

/// Handle a mouse event
///
/// Pointer motion (or a left click, for terminals that do not report motion)
/// over a well hovers it; moving off the wells ends the hover.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) -> Result<bool> {
    if state.active_popup.is_some() || state.error_message.is_some() {
        return Ok(false);
    }

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left) => {
            match cell_under_pointer(state, mouse.column, mouse.row) {
                Some((side, coord)) => {
                    let already_hovered = state.hover.hovered().is_some_and(|hovered| {
                        hovered.side == side
                            && coord_to_name(coord.row, coord.col).is_ok_and(|w| w == hovered.well)
                    });
                    if !already_hovered {
                        state.hover_cell(side, coord);
                    }
                }
                None => {
                    if state.hover.hovered().is_some() {
                        state.clear_hover();
                    }
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Plate cell at a terminal position, using the layout of the last frame.
#[must_use]
pub fn cell_under_pointer(state: &AppState, x: u16, y: u16) -> Option<(PlateSide, WellCoordinate)> {
    let layout = AppLayout::new(state.screen);
    [PlateSide::Source, PlateSide::Destination]
        .into_iter()
        .find_map(|side| {
            let viewport = PlateWidget::viewport(state, layout.plate(side), side)?;
            viewport.cell_at(x, y).map(|coord| (side, coord))
        })
}
