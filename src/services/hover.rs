//! Hover resolution: which wells relate to the well under the pointer.
//!
//! Hovering a well summarises every transfer it takes part in on its own
//! plate, and lists the wells on the opposite plate of the selected pair that
//! should be highlighted. Leaving the well returns those same wells paired
//! with the state the grid model gives them, so the presentation can repaint
//! them without keeping any colour state of its own.

use serde::Serialize;

use crate::models::{PlateSelection, PlateSide, TransferRecord};
use crate::services::plate_grid::{PlateGrid, WellState};
use crate::services::TransferTable;

/// A well on the opposite plate related to the hovered well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelatedWell {
    /// Well name
    pub well: String,
    /// Plate side the well is on
    pub side: PlateSide,
}

/// Result of hovering a well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverResult {
    /// Hovered well name
    pub well: String,
    /// Side of the hovered well
    pub side: PlateSide,
    /// Total volume of the summarised transfers in nanoliters
    pub total_volume_nl: u64,
    /// Deduplicated summary lines (or the single "no transfers" line)
    pub summary_lines: Vec<String>,
    /// Wells to highlight on the opposite plate of the selected pair, first-seen order
    pub related_wells: Vec<RelatedWell>,
}

impl HoverResult {
    /// Summary lines joined with newlines.
    #[must_use]
    pub fn summary_text(&self) -> String {
        self.summary_lines.join("\n")
    }

    /// Whether the well takes part in any transfer on its plate.
    #[must_use]
    pub fn has_transfers(&self) -> bool {
        self.total_volume_nl > 0
    }
}

/// A related well and the state it returns to when the hover ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellRestore {
    /// The well to repaint
    pub well: RelatedWell,
    /// Base state from the grid model
    pub state: WellState,
}

/// Resolves the hover summary and highlight set for a well.
///
/// The summary covers all transfers of `well` on the selected plate of `side`,
/// whatever plate is on the other end. Only transfers whose other end is the
/// selected opposite plate contribute to `related_wells`.
#[must_use]
pub fn on_hover(
    table: &TransferTable,
    well: &str,
    side: PlateSide,
    selection: &PlateSelection,
) -> HoverResult {
    let other = side.opposite();
    let transfers = table.filter_by_well(well, side, selection.plate(side));
    let total_volume_nl = TransferTable::total_volume(transfers.iter().copied());

    let summary_lines = if transfers.is_empty() {
        vec![no_transfers_line(side).to_string()]
    } else {
        collapse_duplicate_lines(transfers.iter().map(|t| summary_line(t, other)))
    };

    let mut related_wells: Vec<RelatedWell> = Vec::new();
    for transfer in transfers
        .iter()
        .filter(|t| t.plate(other) == selection.plate(other))
    {
        let related = transfer.well(other);
        if !related_wells.iter().any(|w| w.well == related) {
            related_wells.push(RelatedWell {
                well: related.to_string(),
                side: other,
            });
        }
    }

    HoverResult {
        well: well.to_string(),
        side,
        total_volume_nl,
        summary_lines,
        related_wells,
    }
}

/// Resolves which wells to repaint when the pointer leaves `well`.
///
/// Uses the exact plate pair of the selection. Each related well is paired
/// with its state in `opposite_grid`; wells that do not map onto that grid
/// have no cell to repaint and are left out.
#[must_use]
pub fn on_leave(
    table: &TransferTable,
    well: &str,
    side: PlateSide,
    selection: &PlateSelection,
    opposite_grid: &PlateGrid,
) -> Vec<WellRestore> {
    let other = side.opposite();
    let mut restores: Vec<WellRestore> = Vec::new();
    for transfer in table.filter_by_plate_pair(&selection.source, &selection.dest) {
        if transfer.well(side) != well {
            continue;
        }
        let related = transfer.well(other);
        if restores.iter().any(|r| r.well.well == related) {
            continue;
        }
        if let Ok(Some(state)) = opposite_grid.state_of(related) {
            restores.push(WellRestore {
                well: RelatedWell {
                    well: related.to_string(),
                    side: other,
                },
                state,
            });
        }
    }
    restores
}

/// Collapses repeated lines into one line suffixed with `(*N)`.
///
/// Output order is the order in which each distinct line first appears.
pub fn collapse_duplicate_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counted: Vec<(String, usize)> = Vec::new();
    for line in lines {
        let line = line.into();
        match counted.iter_mut().find(|(seen, _)| *seen == line) {
            Some((_, count)) => *count += 1,
            None => counted.push((line, 1)),
        }
    }

    counted
        .into_iter()
        .map(|(line, count)| {
            if count > 1 {
                format!("{line} (*{count})")
            } else {
                line
            }
        })
        .collect()
}

/// Formats a volume the way summaries display it (`26000.0`).
#[must_use]
pub fn format_volume(volume_nl: u64) -> String {
    format!("{:.1}", volume_nl as f64)
}

fn summary_line(transfer: &TransferRecord, other: PlateSide) -> String {
    format!(
        "{}: {} - {} nl",
        transfer.plate(other),
        transfer.well(other),
        format_volume(transfer.volume_nl)
    )
}

const fn no_transfers_line(side: PlateSide) -> &'static str {
    match side {
        PlateSide::Source => "No transfers from this well.",
        PlateSide::Destination => "No transfers to this well.",
    }
}

/// A hovered well, identified by name and side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoveredWell {
    /// Well name
    pub well: String,
    /// Plate side
    pub side: PlateSide,
}

/// Pointer events delivered to the hover state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered a well cell
    Enter(HoveredWell),
    /// Pointer left the hovered cell
    Leave,
}

/// Hover state: nothing hovered, or one well hovered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No well under the pointer
    #[default]
    Idle,
    /// A well is under the pointer
    Hovered(HoveredWell),
}

/// Inputs the state machine reads from; never mutated.
#[derive(Debug, Clone, Copy)]
pub struct HoverContext<'a> {
    /// Loaded transfers
    pub table: &'a TransferTable,
    /// Selected plate pair
    pub selection: &'a PlateSelection,
    /// Grid for the selected source plate
    pub source_grid: &'a PlateGrid,
    /// Grid for the selected destination plate
    pub dest_grid: &'a PlateGrid,
}

impl HoverContext<'_> {
    const fn grid(&self, side: PlateSide) -> &PlateGrid {
        match side {
            PlateSide::Source => self.source_grid,
            PlateSide::Destination => self.dest_grid,
        }
    }
}

/// What the presentation should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverUpdate {
    /// Wells to repaint with their base state
    pub restore: Vec<WellRestore>,
    /// New hover details to show, if a well is now hovered
    pub hovered: Option<HoverResult>,
}

impl HoverState {
    /// Applies an event and returns the next state with the resulting update.
    ///
    /// Entering a new well while another is hovered first leaves the old one,
    /// so events stay well-ordered per cell.
    #[must_use]
    pub fn apply(self, event: HoverEvent, ctx: &HoverContext<'_>) -> (Self, HoverUpdate) {
        let mut update = HoverUpdate::default();

        if let Self::Hovered(current) = &self {
            let re_entering = matches!(&event, HoverEvent::Enter(next) if next == current);
            if !re_entering {
                update.restore = on_leave(
                    ctx.table,
                    &current.well,
                    current.side,
                    ctx.selection,
                    ctx.grid(current.side.opposite()),
                );
            }
        }

        match event {
            HoverEvent::Enter(next) => {
                update.hovered = Some(on_hover(ctx.table, &next.well, next.side, ctx.selection));
                (Self::Hovered(next), update)
            }
            HoverEvent::Leave => (Self::Idle, update),
        }
    }

    /// The hovered well, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<&HoveredWell> {
        match self {
            Self::Idle => None,
            Self::Hovered(well) => Some(well),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::plate_grid::compute_grid;

    fn scenario_table() -> TransferTable {
        TransferTable::from_records(vec![
            TransferRecord::new("sp1", "A1", "dp1", "B2", 26000),
            TransferRecord::new("sp1", "A1", "dp1", "B2", 26000),
        ])
    }

    fn multi_plate_table() -> TransferTable {
        TransferTable::from_records(vec![
            TransferRecord::new("stock", "A1", "assay1", "B2", 100),
            TransferRecord::new("stock", "A1", "assay2", "C3", 50),
            TransferRecord::new("stock", "A1", "assay1", "D4", 100),
            TransferRecord::new("dmso", "A1", "assay1", "E5", 25),
        ])
    }

    fn grids(table: &TransferTable, selection: &PlateSelection) -> (PlateGrid, PlateGrid) {
        let src = compute_grid(
            16,
            24,
            table.filter_by_plate(PlateSide::Source, &selection.source),
            PlateSide::Source,
            25000.0,
        )
        .unwrap();
        let dst = compute_grid(
            16,
            24,
            table.filter_by_plate(PlateSide::Destination, &selection.dest),
            PlateSide::Destination,
            50000.0,
        )
        .unwrap();
        (src, dst)
    }

    #[test]
    fn test_hover_scenario_source_well() {
        let table = scenario_table();
        let selection = PlateSelection::new("sp1", "dp1");
        let result = on_hover(&table, "A1", PlateSide::Source, &selection);

        assert_eq!(result.summary_text(), "dp1: B2 - 26000.0 nl (*2)");
        assert_eq!(result.total_volume_nl, 52000);
        assert_eq!(
            result.related_wells,
            vec![RelatedWell {
                well: "B2".into(),
                side: PlateSide::Destination
            }]
        );
    }

    #[test]
    fn test_hover_destination_well_lists_sources() {
        let table = scenario_table();
        let selection = PlateSelection::new("sp1", "dp1");
        let result = on_hover(&table, "B2", PlateSide::Destination, &selection);
        assert_eq!(result.summary_lines, vec!["sp1: A1 - 26000.0 nl (*2)"]);
        assert_eq!(result.related_wells[0].side, PlateSide::Source);
    }

    #[test]
    fn test_hover_without_transfers() {
        let table = scenario_table();
        let selection = PlateSelection::new("sp1", "dp1");

        let src = on_hover(&table, "C7", PlateSide::Source, &selection);
        assert_eq!(src.summary_text(), "No transfers from this well.");
        assert!(src.related_wells.is_empty());
        assert!(!src.has_transfers());

        let dst = on_hover(&table, "C7", PlateSide::Destination, &selection);
        assert_eq!(dst.summary_text(), "No transfers to this well.");
    }

    #[test]
    fn test_hover_summary_spans_plates_but_highlight_uses_pair() {
        let table = multi_plate_table();
        let selection = PlateSelection::new("stock", "assay1");
        let result = on_hover(&table, "A1", PlateSide::Source, &selection);

        assert_eq!(
            result.summary_lines,
            vec![
                "assay1: B2 - 100.0 nl",
                "assay2: C3 - 50.0 nl",
                "assay1: D4 - 100.0 nl",
            ]
        );
        let related: Vec<&str> = result.related_wells.iter().map(|w| w.well.as_str()).collect();
        assert_eq!(related, vec!["B2", "D4"]);
        assert_eq!(result.total_volume_nl, 250);
    }

    #[test]
    fn test_collapse_duplicate_lines_first_seen_order() {
        let lines = collapse_duplicate_lines(["x", "y", "x", "x"]);
        assert_eq!(lines, vec!["x (*3)", "y"]);
    }

    #[test]
    fn test_collapse_no_duplicates() {
        let lines = collapse_duplicate_lines(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(lines, vec!["b", "a"]);
    }

    #[test]
    fn test_on_leave_restores_grid_states() {
        let table = multi_plate_table();
        let selection = PlateSelection::new("stock", "assay1");
        let (_, dst) = grids(&table, &selection);

        let restores = on_leave(&table, "A1", PlateSide::Source, &selection, &dst);
        let wells: Vec<&str> = restores.iter().map(|r| r.well.well.as_str()).collect();
        assert_eq!(wells, vec!["B2", "D4"]);
        for restore in &restores {
            assert_eq!(
                Some(restore.state),
                dst.state_of(&restore.well.well).unwrap()
            );
        }
    }

    #[test]
    fn test_on_leave_uses_exact_pair() {
        let table = multi_plate_table();
        let selection = PlateSelection::new("dmso", "assay1");
        let (_, dst) = grids(&table, &selection);

        let restores = on_leave(&table, "A1", PlateSide::Source, &selection, &dst);
        assert_eq!(restores.len(), 1);
        assert_eq!(restores[0].well.well, "E5");
        assert_eq!(restores[0].state, WellState::Used);
    }

    #[test]
    fn test_state_machine_enter_leave() {
        let table = scenario_table();
        let selection = PlateSelection::new("sp1", "dp1");
        let (src, dst) = grids(&table, &selection);
        let ctx = HoverContext {
            table: &table,
            selection: &selection,
            source_grid: &src,
            dest_grid: &dst,
        };

        let a1 = HoveredWell {
            well: "A1".into(),
            side: PlateSide::Source,
        };
        let (state, update) = HoverState::Idle.apply(HoverEvent::Enter(a1.clone()), &ctx);
        assert_eq!(state, HoverState::Hovered(a1));
        assert!(update.restore.is_empty());
        assert_eq!(update.hovered.unwrap().related_wells.len(), 1);

        let (state, update) = state.apply(HoverEvent::Leave, &ctx);
        assert_eq!(state, HoverState::Idle);
        assert!(update.hovered.is_none());
        assert_eq!(update.restore.len(), 1);
        assert_eq!(update.restore[0].state, WellState::Overfull);

        let (state, update) = state.apply(HoverEvent::Leave, &ctx);
        assert_eq!(state, HoverState::Idle);
        assert_eq!(update, HoverUpdate::default());
    }

    #[test]
    fn test_state_machine_moving_between_wells_leaves_first() {
        let table = scenario_table();
        let selection = PlateSelection::new("sp1", "dp1");
        let (src, dst) = grids(&table, &selection);
        let ctx = HoverContext {
            table: &table,
            selection: &selection,
            source_grid: &src,
            dest_grid: &dst,
        };

        let a1 = HoveredWell {
            well: "A1".into(),
            side: PlateSide::Source,
        };
        let b2 = HoveredWell {
            well: "B2".into(),
            side: PlateSide::Destination,
        };
        let (state, _) = HoverState::Idle.apply(HoverEvent::Enter(a1.clone()), &ctx);

        // Re-entering the same well does not restore anything
        let (state, update) = state.apply(HoverEvent::Enter(a1), &ctx);
        assert!(update.restore.is_empty());

        let (state, update) = state.apply(HoverEvent::Enter(b2.clone()), &ctx);
        assert_eq!(state.hovered(), Some(&b2));
        assert_eq!(update.restore.len(), 1);
        assert_eq!(update.restore[0].well.side, PlateSide::Destination);
        assert_eq!(update.hovered.unwrap().summary_lines, vec!["sp1: A1 - 26000.0 nl (*2)"]);
    }
}
