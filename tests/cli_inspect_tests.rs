//! End-to-end tests for `picklist-viewer inspect` command.

mod fixtures;

use fixtures::*;
use tempfile::TempDir;

#[test]
fn test_inspect_scenario_json() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(&["inspect", path.to_str().unwrap(), "--json"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed without --strict. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result = stdout_json(&output);
    assert_eq!(result["records"], 2);
    assert_eq!(result["dropped_zero_volume"], 0);

    let source = &result["plates"][0];
    assert_eq!(source["side"], "source");
    assert_eq!(source["plate"], "sp1");
    assert_eq!(source["rows"], 16);
    assert_eq!(source["cols"], 24);
    assert_eq!(source["overfull_wells"], 1);
    assert_eq!(source["overfull"][0]["well"], "A1");
    assert_eq!(source["overfull"][0]["volume_nl"], 52000);

    let dest = &result["plates"][1];
    assert_eq!(dest["side"], "destination");
    assert_eq!(dest["overfull"][0]["well"], "B2");

    assert_eq!(result["estimates"]["total"], "0 min 7 sec");
    assert_eq!(result["estimates"]["total_seconds"], 7);
}

#[test]
fn test_inspect_strict_fails_on_overfull() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(&["inspect", path.to_str().unwrap(), "--strict"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 overfull well(s)"), "stderr: {stderr}");
}

#[test]
fn test_inspect_strict_passes_with_raised_ceilings() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &[
            "inspect",
            path.to_str().unwrap(),
            "--strict",
            "--source-ceiling",
            "60000",
            "--dest-ceiling",
            "60000",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Overfull wells: 0"));
}

#[test]
fn test_inspect_reports_off_grid_and_skipped_rows() {
    let config_dir = TempDir::new().unwrap();
    let content = picklist(&[
        ("sp1", "A1", "dp1", "P24", "100"),
        ("sp1", "Q1", "dp1", "A1", "100"),
        ("sp1", "A1?", "dp1", "A1", "100"),
    ]);
    let (path, _temp) = create_temp_picklist(&content);

    let output = isolated_command(
        &[
            "inspect",
            path.to_str().unwrap(),
            "--source-rows",
            "8",
            "--source-cols",
            "12",
            "--json",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);
    assert_eq!(result["records"], 2);
    assert_eq!(result["skipped_rows"].as_array().unwrap().len(), 1);
    assert_eq!(result["skipped_rows"][0]["line"], 4);

    let source = &result["plates"][0];
    assert_eq!(source["rows"], 8);
    assert_eq!(source["off_grid"][0]["well"], "Q1");
    // Destination stays 16 x 24, so P24 fits
    assert_eq!(result["plates"][1]["off_grid"].as_array().unwrap().len(), 0);
}

#[test]
fn test_inspect_unknown_plate() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&multi_plate_picklist());

    let output = isolated_command(
        &["inspect", path.to_str().unwrap(), "--dest-plate", "dp9"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Destination plate 'dp9' not found"), "stderr: {stderr}");
}

#[test]
fn test_inspect_selected_pair() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&multi_plate_picklist());

    let output = isolated_command(
        &[
            "inspect",
            path.to_str().unwrap(),
            "--source-plate",
            "sp2",
            "--dest-plate",
            "dp2",
            "--json",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);
    assert_eq!(result["plates"][0]["plate"], "sp2");
    assert_eq!(result["plates"][0]["used_wells"], 1);
    // dp2 receives from sp2:B1 and sp1:A1
    assert_eq!(result["plates"][1]["used_wells"], 2);
}

#[test]
fn test_inspect_too_many_rows() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &["inspect", path.to_str().unwrap(), "--dest-rows", "53"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("53"), "stderr: {stderr}");
}

#[test]
fn test_inspect_missing_file() {
    let config_dir = TempDir::new().unwrap();

    let output = isolated_command(
        &["inspect", "/nonexistent/picklist.csv"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open picklist"), "stderr: {stderr}");
}
