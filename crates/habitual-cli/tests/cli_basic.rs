//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory and
//! checks the JSON it prints.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .env("HABITUAL_DATA_DIR", data_dir)
        .env_remove("HABITUAL_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_onboard_creates_protocol() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["onboard", "--name", "Ana"]);
    assert_eq!(out["profile"]["name"], "Ana");
    let ids: Vec<&str> = out["habits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(&ids[..4], &["sleep_7h", "hydration", "environment", "sunlight"]);

    let (code, _, stderr) = run_cli(dir.path(), &["onboard", "--name", "Ana"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--force"));
}

#[test]
fn test_log_and_score() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["habit", "add", "sleep_7h"]);
    run_json(dir.path(), &["habit", "add", "reading"]);

    let out = run_json(dir.path(), &["log", "done", "sleep_7h", "--date", "2024-05-06"]);
    assert_eq!(out["entry"]["sleep_7h"], true);

    let day = run_json(dir.path(), &["score", "day", "--date", "2024-05-06"]);
    assert_eq!(day["score"], 75);
    assert_eq!(day["totalWeight"], 4);

    let streak = run_json(dir.path(), &["score", "streak", "--date", "2024-05-06"]);
    assert_eq!(streak["streak"], 1);

    let out = run_json(dir.path(), &["log", "undo", "sleep_7h", "--date", "2024-05-06"]);
    assert!(out["entry"].is_null());
    let day = run_json(dir.path(), &["score", "day", "--date", "2024-05-06"]);
    assert_eq!(day["score"], 0);
}

#[test]
fn test_log_rejects_unknown_habit_and_bad_mood() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["log", "done", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown habit: nope"));

    let (code, _, stderr) = run_cli(dir.path(), &["log", "mood", "7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"));

    let (code, _, stderr) = run_cli(dir.path(), &["score", "day", "--date", "2024-13-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid date"));
}

#[test]
fn test_habit_edits() {
    let dir = tempfile::tempdir().unwrap();
    let created = run_json(
        dir.path(),
        &["habit", "create", "Walk the dog", "--frequency", "weekly", "--target", "3"],
    );
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("custom_"));

    let up = run_json(dir.path(), &["habit", "target", &id, "up"]);
    assert_eq!(up["targetCount"], 4);

    let disabled = run_json(dir.path(), &["habit", "disable", &id]);
    assert_eq!(disabled["enabled"], false);

    let list = run_json(dir.path(), &["habit", "list", "--enabled"]);
    assert_eq!(list.as_array().unwrap().len(), 0);

    run_json(dir.path(), &["habit", "remove", &id]);
    let (code, _, _) = run_cli(dir.path(), &["habit", "remove", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "analytics.window_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "7");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "analytics.window_days", "14"]);
    assert_eq!(code, 0);
    let list = run_json(dir.path(), &["config", "list"]);
    assert_eq!(list["analytics.window_days"], "14");

    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_backup_export_import() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    run_json(src.path(), &["habit", "add", "reading"]);
    run_json(src.path(), &["log", "done", "reading", "--date", "2024-05-06"]);

    let file = src.path().join("backup.json");
    run_json(src.path(), &["backup", "export", "--output", file.to_str().unwrap()]);

    let out = run_json(dst.path(), &["backup", "import", file.to_str().unwrap()]);
    assert_eq!(out["habits"], 1);
    assert_eq!(out["days"], 1);

    let shown = run_json(dst.path(), &["log", "show", "--date", "2024-05-06"]);
    assert_eq!(shown["2024-05-06"]["reading"], true);
}

#[test]
fn test_leaderboard_rank() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("friends.json");
    std::fs::write(
        &file,
        r#"[{"id":"a","name":"bea","score":80,"streak":2},
            {"id":"b","name":"Al","score":80,"streak":2},
            {"id":"c","name":"Cy","score":140,"streak":0}]"#,
    )
    .unwrap();

    let ranked = run_json(dir.path(), &["leaderboard", "rank", file.to_str().unwrap()]);
    let ranked = ranked.as_array().unwrap();
    assert_eq!(ranked[0]["name"], "Cy");
    assert_eq!(ranked[0]["score"], 100);
    assert_eq!(ranked[1]["name"], "Al");
    assert_eq!(ranked[1]["rank"], 2);
    assert_eq!(ranked[2]["rank"], 2);
}

#[test]
fn test_coach_requires_profile() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["coach", "prompt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("onboard"));

    run_json(dir.path(), &["onboard", "--name", "Ana"]);
    let out = run_json(dir.path(), &["coach", "prompt", "--date", "2024-05-06"]);
    assert!(out["prompt"].as_str().unwrap().contains("Ana"));
}
