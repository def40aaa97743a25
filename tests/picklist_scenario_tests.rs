//! Integration tests: loading a picklist file and walking through the plate
//! model the way the viewer does.

mod fixtures;

use fixtures::*;
use picklist_viewer::config::{CeilingConfig, PlateConfig};
use picklist_viewer::models::{coord_to_name, name_to_coord, PlateError, PlateSide};
use picklist_viewer::parser::load_picklist;
use picklist_viewer::services::hover::HoverContext;
use picklist_viewer::services::{
    compute_grid, HoverEvent, HoverState, HoveredWell, PicklistSession, PlateView, RelatedWell,
    WellState,
};

fn session_for(content: &str) -> PicklistSession {
    let (path, _temp) = create_temp_picklist(content);
    let loaded = load_picklist(&path).expect("picklist should load");
    let mut session = PicklistSession::new(PlateConfig::default(), CeilingConfig::default());
    session.load(loaded.table);
    session
}

fn ready(session: &PicklistSession) -> picklist_viewer::services::PlateGrids {
    match session.view().expect("view") {
        PlateView::Ready(grids) => grids,
        PlateView::NoData(reason) => panic!("expected grids, got {reason}"),
    }
}

#[test]
fn test_overfull_scenario() {
    let session = session_for(&scenario_picklist());
    let grids = ready(&session);

    assert_eq!(grids.source.state_of("A1").unwrap(), Some(WellState::Overfull));
    assert_eq!(grids.dest.state_of("B2").unwrap(), Some(WellState::Overfull));
    assert_eq!(grids.source.count(WellState::Overfull), 1);
    assert_eq!(grids.dest.count(WellState::Used), 0);

    let hover = session.hover("A1", PlateSide::Source).unwrap();
    assert_eq!(hover.total_volume_nl, 52_000);
    assert_eq!(hover.summary_lines, vec!["dp1: B2 - 26000.0 nl (*2)"]);
    assert_eq!(
        hover.related_wells,
        vec![RelatedWell {
            well: "B2".to_string(),
            side: PlateSide::Destination,
        }]
    );

    let estimates = session.estimates();
    assert_eq!(estimates.total.to_string(), "0 min 7 sec");
    assert_eq!(estimates.current_pair, estimates.total);
}

#[test]
fn test_quantization_drops_zero_volume_rows() {
    let content = picklist(&[
        ("sp1", "C5", "dp1", "A1", "10"),
        ("sp1", "C5", "dp1", "A2", "20"),
        ("sp1", "C5", "dp1", "A3", "30"),
    ]);
    let (path, _temp) = create_temp_picklist(&content);
    let loaded = load_picklist(&path).unwrap();

    assert_eq!(loaded.table.len(), 2);
    assert_eq!(loaded.table.dropped_zero_volume(), 1);

    let mut session = PicklistSession::new(PlateConfig::default(), CeilingConfig::default());
    session.load(loaded.table);
    let hover = session.hover("C5", PlateSide::Source).unwrap();
    assert_eq!(hover.total_volume_nl, 50);
    // The 10 nl row never reached the table, so A1 is not related
    assert!(!hover.related_wells.iter().any(|w| w.well == "A1"));
}

#[test]
fn test_cycling_plates_changes_grids() {
    let mut session = session_for(&multi_plate_picklist());
    assert_eq!(
        session.plate_names(PlateSide::Source).unwrap(),
        vec!["sp1", "sp2"]
    );

    let grids = ready(&session);
    assert_eq!(grids.source.state_of("A1").unwrap(), Some(WellState::Used));
    assert_eq!(grids.source.state_of("B1").unwrap(), Some(WellState::Empty));

    assert_eq!(session.cycle_plate(PlateSide::Source, true).unwrap(), "sp2");
    let grids = ready(&session);
    assert_eq!(grids.source.state_of("B1").unwrap(), Some(WellState::Used));
    assert_eq!(grids.source.state_of("A1").unwrap(), Some(WellState::Empty));

    // Back around to the first plate
    assert_eq!(session.cycle_plate(PlateSide::Source, true).unwrap(), "sp1");
}

#[test]
fn test_hover_machine_leave_restores_fresh_grid_states() {
    let session = session_for(&multi_plate_picklist());
    let grids = ready(&session);
    let ctx: HoverContext<'_> = session.hover_context(&grids).unwrap();

    let enter = HoverEvent::Enter(HoveredWell {
        well: "A1".to_string(),
        side: PlateSide::Source,
    });
    let (state, update) = HoverState::Idle.apply(enter, &ctx);
    let hovered = update.hovered.unwrap();
    assert!(!hovered.related_wells.is_empty());

    let (state, update) = state.apply(HoverEvent::Leave, &ctx);
    assert_eq!(state, HoverState::Idle);
    assert!(update.hovered.is_none());

    let selection = session.selection().unwrap();
    let fresh = compute_grid(
        16,
        24,
        session
            .table()
            .filter_by_plate(PlateSide::Destination, &selection.dest),
        PlateSide::Destination,
        CeilingConfig::default().dest_nl,
    )
    .unwrap();
    for restore in &update.restore {
        let coord = name_to_coord(&restore.well.well).unwrap();
        assert_eq!(Some(restore.state), fresh.state(coord.row, coord.col));
    }
}

#[test]
fn test_too_many_rows_rejected() {
    let mut session = session_for(&scenario_picklist());
    session.set_plate_settings(
        PlateConfig {
            dest_rows: 60,
            ..PlateConfig::default()
        },
        CeilingConfig::default(),
    );
    assert_eq!(
        session.view().unwrap_err(),
        PlateError::UnsupportedRowCount { rows: 60 }
    );
}

#[test]
fn test_empty_picklist_has_no_data() {
    let session = session_for(&format!("{HEADER}\n"));
    assert_eq!(
        session.view().unwrap(),
        PlateView::NoData(PlateError::EmptyTable)
    );
    assert!(session.hover("A1", PlateSide::Source).is_none());
}

#[test]
fn test_well_names_round_trip_on_large_plates() {
    for row in [0, 25, 26, 51] {
        for col in [0, 47] {
            let name = coord_to_name(row, col).unwrap();
            let coord = name_to_coord(&name).unwrap();
            assert_eq!((coord.row, coord.col), (row, col), "{name}");
        }
    }
    assert_eq!(coord_to_name(26, 11).unwrap(), "AA12");
}
