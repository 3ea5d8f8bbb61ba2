//! CLI contract tests
//!
//! Runs the built binary against canvas files in a temp directory and checks
//! exit codes and JSON output.

use std::path::Path;
use std::process::Command;

fn metcalfe_bin() -> &'static str {
    env!("CARGO_BIN_EXE_metcalfe")
}

const CANVAS: &str = r#"{
  "name": "two services",
  "nodes": [
    {"id": "a", "name": "Chat", "value": 100, "activeRate": 1},
    {"id": "b", "name": "Pay", "value": 100, "activeRate": 1},
    {"id": "c", "name": "Maps", "value": 100, "activeRate": 1}
  ],
  "connections": [
    {"id": "c1", "sourceId": "a", "targetId": "b", "synergy": "standard"}
  ]
}"#;

fn setup_canvas() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.json");
    std::fs::write(&path, CANVAS).unwrap();
    (dir, path)
}

/// Run in `dir` so no stray config file is picked up
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(metcalfe_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("METCALFE_INTEGRATION")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run metcalfe");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Invalid JSON")
}

// ============================================================================
// value
// ============================================================================

#[test]
fn value_json_matches_the_formula() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(dir.path(), &["value", path.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["name"], "two services");
    assert_eq!(v["integration"], "simple");
    assert_eq!(v["standaloneValue"], 30_000.0);
    assert_eq!(v["connectedValue"], 50_000.0);
    assert!(v.get("groups").is_none());
}

#[test]
fn value_explain_lists_groups() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(
        dir.path(),
        &["value", path.to_str().unwrap(), "--explain", "-f", "json", "-i", "full"],
    );
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["integration"], "full");
    assert_eq!(v["groups"].as_array().unwrap().len(), 2);
    assert_eq!(v["connectedValue"], 70_000.0);
}

#[test]
fn integration_from_environment() {
    let (dir, path) = setup_canvas();
    let output = Command::new(metcalfe_bin())
        .args(["value", path.to_str().unwrap(), "-f", "json"])
        .current_dir(dir.path())
        .env("METCALFE_INTEGRATION", "moderate")
        .output()
        .expect("Failed to run metcalfe");
    assert!(output.status.success());
    let v = parse_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(v["integration"], "moderate");
}

#[test]
fn value_text_output() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(dir.path(), &["value", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Network Value"));
    assert!(stdout.contains("1.7x"));
}

#[test]
fn value_from_toml_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.toml");
    std::fs::write(
        &path,
        r#"
[[nodes]]
id = "a"
value = 100.0
activeRate = 1.0

[[nodes]]
id = "b"
value = 100.0
activeRate = 1.0

[[connections]]
id = "c1"
sourceId = "a"
targetId = "b"
synergy = "excellent"
"#,
    )
    .unwrap();
    let (code, stdout, _) = run(
        dir.path(),
        &["value", path.to_str().unwrap(), "-i", "full", "-f", "json"],
    );
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["multiplier"], 4.5);
}

#[test]
fn value_from_preset() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["value", "--preset", "phone", "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert!(v["multiplier"].as_f64().unwrap() > 1.0);
}

// ============================================================================
// input errors
// ============================================================================

#[test]
fn missing_source_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["value"]);
    assert_ne!(code, 0);
}

#[test]
fn unknown_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["value", "--preset", "myspace"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("myspace"));
}

#[test]
fn unknown_synergy_in_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"nodes": [{"id": "a", "value": 1}, {"id": "b", "value": 1}],
            "connections": [{"id": "c1", "sourceId": "a", "targetId": "b", "synergy": "stellar"}]}"#,
    )
    .unwrap();
    let (code, _, stderr) = run(dir.path(), &["value", path.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("bad.json"));
}

#[test]
fn invalid_integration_flag_fails() {
    let (dir, path) = setup_canvas();
    let (code, _, _) = run(dir.path(), &["value", path.to_str().unwrap(), "-i", "total"]);
    assert_ne!(code, 0);
}

// ============================================================================
// other commands
// ============================================================================

#[test]
fn groups_json() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(dir.path(), &["groups", path.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    let groups = v["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["nodeIds"], serde_json::json!(["a", "b"]));
    assert_eq!(groups[1]["nodeIds"], serde_json::json!(["c"]));
}

#[test]
fn compare_json_has_three_levels() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(dir.path(), &["compare", path.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    let levels: Vec<&str> = v["levels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["integration"].as_str().unwrap())
        .collect();
    assert_eq!(levels, vec!["simple", "moderate", "full"]);
}

#[test]
fn stats_json() {
    let (dir, path) = setup_canvas();
    let (code, stdout, _) = run(dir.path(), &["stats", path.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["nodeCount"], 3);
    assert_eq!(v["groupCount"], 2);
    assert_eq!(v["isolatedNodes"], 1);
}

#[test]
fn presets_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["presets", "-f", "json"]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v.as_array().unwrap().len(), 4);
}

#[test]
fn export_preset_round_trips_through_value() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("line.json");
    let (code, _, _) = run(
        dir.path(),
        &["export-preset", "line", "-o", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(out.exists());

    let (_, from_file, _) = run(dir.path(), &["value", out.to_str().unwrap(), "-f", "json"]);
    let (_, from_preset, _) = run(dir.path(), &["value", "--preset", "line", "-f", "json"]);
    let a = parse_json(&from_file);
    let b = parse_json(&from_preset);
    assert_eq!(a["connectedValue"], b["connectedValue"]);
    assert_eq!(a["multiplier"], b["multiplier"]);
}

// ============================================================================
// config
// ============================================================================

#[test]
fn init_writes_config_used_by_later_runs() {
    let (dir, path) = setup_canvas();
    let (code, _, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("metcalfe.toml").exists());

    // Defaults from the written file give the same result as no config
    let (code, stdout, _) = run(dir.path(), &["value", path.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["connectedValue"], 50_000.0);
}

#[test]
fn project_config_supplies_defaults_and_coefficients() {
    let (dir, path) = setup_canvas();
    std::fs::write(
        dir.path().join("metcalfe.toml"),
        r#"
[coefficients.integration]
moderate = 2.0

[defaults]
integration = "moderate"
format = "json"
"#,
    )
    .unwrap();
    let (code, stdout, _) = run(dir.path(), &["value", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["integration"], "moderate");
    // {a,b}: 200² × 1.0 × 2.0, {c}: 100²
    assert_eq!(v["connectedValue"], 90_000.0);
}

#[test]
fn explicit_bad_config_fails() {
    let (dir, path) = setup_canvas();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[coefficients.synergy]\ngood = -1.0\n").unwrap();
    let (code, _, stderr) = run(
        dir.path(),
        &["--config", config.to_str().unwrap(), "value", path.to_str().unwrap()],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("custom.toml"));
}
