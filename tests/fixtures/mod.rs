//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Column header in the order the liquid handler exports it.
pub const HEADER: &str =
    "Source Plate Name,Source Well,Destination Plate Name,Destination Well,Transfer Volume";

/// Two identical 26000 nl transfers sp1:A1 -> dp1:B2.
///
/// With the default ceilings (25000 / 50000 nl) both wells end up overfull.
pub fn scenario_picklist() -> String {
    picklist(&[
        ("sp1", "A1", "dp1", "B2", "26000"),
        ("sp1", "A1", "dp1", "B2", "26000"),
    ])
}

/// Two source plates and two destination plates, nothing overfull.
pub fn multi_plate_picklist() -> String {
    picklist(&[
        ("sp1", "A1", "dp1", "A1", "100"),
        ("sp1", "A2", "dp1", "A1", "200"),
        ("sp2", "B1", "dp2", "C3", "50"),
        ("sp1", "A1", "dp2", "D4", "75"),
    ])
}

/// Builds a picklist CSV from (source plate, source well, dest plate, dest well, volume).
pub fn picklist(rows: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for (sp, sw, dp, dw, volume) in rows {
        csv.push_str(&format!("{sp},{sw},{dp},{dw},{volume}\n"));
    }
    csv
}

/// Writes `content` to `name` inside `dir`.
pub fn write_picklist_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write picklist");
    path
}

/// Writes `content` to a fresh temp directory.
///
/// The returned `TempDir` must be kept alive while the file is used.
pub fn create_temp_picklist(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_picklist_file(temp_dir.path(), "picklist.csv", content);
    (path, temp_dir)
}

/// Path to the picklist-viewer binary
pub fn picklist_viewer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_picklist-viewer")
}

/// Command with its own config directory, so tests never see user settings.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(picklist_viewer_bin());
    cmd.env("PICKLIST_VIEWER_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Parses stdout as JSON, panicking with stderr on failure.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Should parse JSON output ({e}). stdout: {stdout} stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}
