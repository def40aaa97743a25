//! End-to-end tests for `picklist-viewer hover` command.

mod fixtures;

use fixtures::*;
use tempfile::TempDir;

#[test]
fn test_hover_source_well_json() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &["hover", path.to_str().unwrap(), "--well", "A1", "--json"],
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
    let result = stdout_json(&output);
    assert_eq!(result["well"], "A1");
    assert_eq!(result["side"], "source");
    assert_eq!(result["total_volume_nl"], 52000);
    assert_eq!(
        result["summary_lines"],
        serde_json::json!(["dp1: B2 - 26000.0 nl (*2)"])
    );
    assert_eq!(result["related_wells"][0]["well"], "B2");
    assert_eq!(result["related_wells"][0]["side"], "destination");
    assert_eq!(result["related_wells"].as_array().unwrap().len(), 1);
}

#[test]
fn test_hover_destination_well_plain() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &[
            "hover",
            path.to_str().unwrap(),
            "--well",
            "B2",
            "--side",
            "destination",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Destination well B2 on dp1"), "stdout: {stdout}");
    assert!(stdout.contains("sp1: A1 - 26000.0 nl (*2)"), "stdout: {stdout}");
    assert!(stdout.contains("Related source wells: A1"), "stdout: {stdout}");
}

#[test]
fn test_hover_unused_well() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &["hover", path.to_str().unwrap(), "--well", "H12", "--json"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);
    assert_eq!(result["total_volume_nl"], 0);
    assert_eq!(
        result["summary_lines"],
        serde_json::json!(["No transfers from this well."])
    );
    assert_eq!(result["related_wells"].as_array().unwrap().len(), 0);
}

#[test]
fn test_hover_respects_plate_pair() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&multi_plate_picklist());

    let output = isolated_command(
        &[
            "hover",
            path.to_str().unwrap(),
            "--well",
            "A1",
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
    // Only D4 sits on dp2; A1 on dp1 is not part of the pair
    let related: Vec<&str> = result["related_wells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["well"].as_str().unwrap())
        .collect();
    assert_eq!(related, vec!["D4"]);
}

#[test]
fn test_hover_malformed_well_names() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    for well in ["Z0", "a1", "A", "ABC1"] {
        let output = isolated_command(
            &["hover", path.to_str().unwrap(), "--well", well],
            config_dir.path(),
        )
        .output()
        .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1), "well {well}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Malformed well name"), "stderr: {stderr}");
    }
}

#[test]
fn test_hover_invalid_side_rejected_by_parser() {
    let config_dir = TempDir::new().unwrap();
    let (path, _temp) = create_temp_picklist(&scenario_picklist());

    let output = isolated_command(
        &["hover", path.to_str().unwrap(), "--well", "A1", "--side", "middle"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert!(!output.status.success());
}
