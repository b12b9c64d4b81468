// Integration tests for the mgrid binary.
//
// Every test points --settings at a temp file so the user's real settings
// are never touched.
//
// Run with: cargo test -p moneygrid-cli --test cli_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn mgrid(settings: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mgrid"));
    cmd.arg("--settings").arg(settings);
    cmd.env_remove("MGRID_SETTINGS");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn settings_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("settings.json")
}

fn run(settings: &Path, args: &[&str]) -> Output {
    mgrid(settings).args(args).output().expect("run mgrid")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn show_json(settings: &Path) -> serde_json::Value {
    let output = run(settings, &["show", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    serde_json::from_str(stdout(&output).trim()).expect("show --json emits one JSON document")
}

// ===========================================================================
// show
// ===========================================================================

#[test]
fn show_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);

    let doc = show_json(&path);
    assert_eq!(doc["settings"]["cellWeight"], 50);
    assert_eq!(doc["settings"]["rowsCount"], 10);
    assert_eq!(doc["settings"]["columnsCount"], 20);
    assert_eq!(doc["rows"].as_array().unwrap().len(), 10);
    assert_eq!(doc["counts"]["empty"], 200);
    // Reading never creates the file
    assert!(!path.exists());
}

#[test]
fn show_plain_prints_glyph_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    std::fs::write(
        &path,
        r#"{"cellWeight":50,"rowsCount":1,"columnsCount":4,"has":20,"toSpend":80}"#,
    )
    .unwrap();

    let output = run(&path, &["show", "--plain"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "!!..");
}

#[test]
fn show_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    std::fs::write(&path, "{ definitely not json").unwrap();

    let output = run(&path, &["show", "--json"]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(doc["settings"]["cellWeight"], 50);
    // Fallback is logged at warn
    assert!(stderr(&output).contains("Using default settings"));
}

#[test]
fn show_rejects_plain_with_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&settings_path(&dir), &["show", "--plain", "--json"]);
    assert_eq!(output.status.code(), Some(2));
}

// ===========================================================================
// set / reset
// ===========================================================================

#[test]
fn set_updates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);

    let output = run(&path, &["set", "--has", "100", "--to-spend", "60"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Has: 0 -> 100"));

    let doc = show_json(&path);
    assert_eq!(doc["settings"]["has"], 100);
    assert_eq!(doc["settings"]["toSpend"], 60);
    assert_eq!(doc["rows"][0][0], "toBeSpent");
    assert_eq!(doc["rows"][0][1], "toBeSpent");
    assert_eq!(doc["rows"][0][2], "empty");
}

#[test]
fn set_reports_every_bad_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);

    let output = run(&path, &["set", "--rows", "51", "--has", "-5", "--cell-weight", "2.5"]);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("Cell Weight: Value must be a valid integer"), "{}", err);
    assert!(err.contains("Rows Count: Value must be less than or equal to 50"), "{}", err);
    assert!(err.contains("Has: Value must be greater than or equal to 0"), "{}", err);
    assert!(!path.exists(), "rejected edits must not be saved");
}

#[test]
fn set_checks_amounts_against_new_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    assert!(run(&path, &["set", "--has", "5000"]).status.success());

    // Shrinking the grid below the held amount is refused
    let output = run(&path, &["set", "--rows", "1", "--columns", "4"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Has: Value must be less than or equal to 200"));
    assert_eq!(show_json(&path)["settings"]["rowsCount"], 10);
}

#[test]
fn set_without_changes_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&settings_path(&dir), &["set"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn reset_restores_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    assert!(run(&path, &["set", "--cell-weight", "10", "--has", "30"]).status.success());

    let output = run(&path, &["reset"]);
    assert!(output.status.success());
    let doc = show_json(&path);
    assert_eq!(doc["settings"]["cellWeight"], 50);
    assert_eq!(doc["settings"]["has"], 0);
}

// ===========================================================================
// path / view
// ===========================================================================

#[test]
fn path_prints_settings_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    let output = run(&path, &["path"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), path.display().to_string());
}

#[test]
fn settings_path_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    let output = Command::new(env!("CARGO_BIN_EXE_mgrid"))
        .env("MGRID_SETTINGS", &path)
        .arg("path")
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), path.display().to_string());
}

#[test]
fn view_refuses_without_terminal() {
    let dir = tempfile::tempdir().unwrap();
    // Captured stdout is a pipe, not a tty
    let output = run(&settings_path(&dir), &["view"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("needs a terminal"));
}
