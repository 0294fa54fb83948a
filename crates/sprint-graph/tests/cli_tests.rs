//! Integration tests for the sprint-graph CLI.

use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{fixtures_dir, run_sprint_graph_in_dir};

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_sprint_graph_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("plan"));
}

#[rstest]
fn test_resolve_without_config_uses_defaults(temp_dir: TempDir) {
    let output = run_sprint_graph_in_dir(
        temp_dir.path(),
        &["--json", "resolve", &fixture("sprint.json")],
    );
    let json = stdout_json(&output);

    let issues = json["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0]["uri"], "https://jira.example.com/browse/MOB-1");
    assert_eq!(issues[0]["qa"]["key"], "MOB-3");
    assert_eq!(issues[0]["testCase"]["outOfSet"], true);
    assert!(json["requestTimestamp"].is_string());
}

#[rstest]
fn test_resolve_text_output(temp_dir: TempDir) {
    let output = run_sprint_graph_in_dir(temp_dir.path(), &["resolve", &fixture("sprint.json")]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MOB-1 [Task] Login screen"));
    assert!(stdout.contains("qa: MOB-3 QA: verify login"));
    assert!(stdout.contains("(out of sprint)"));
}

#[rstest]
fn test_resolve_missing_file_fails(temp_dir: TempDir) {
    let output = run_sprint_graph_in_dir(temp_dir.path(), &["resolve", "absent.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read absent.json"));
}

#[rstest]
fn test_sprint_command(temp_dir: TempDir) {
    let config = fixture("sprint.yaml");
    let data_dir = fixtures_dir().display().to_string();
    let output = run_sprint_graph_in_dir(
        temp_dir.path(),
        &["--json", "--config", &config, "sprint", "--data-dir", &data_dir],
    );
    let json = stdout_json(&output);

    assert_eq!(json["issues"][0]["uri"], "https://tracker.test/browse/MOB-1");
    assert_eq!(json["issues"][0]["childrenStoryPoints"], 2.0);
}

#[rstest]
fn test_plan_command(temp_dir: TempDir) {
    let config = fixture("sprint.yaml");
    let data_dir = fixtures_dir().display().to_string();
    let output = run_sprint_graph_in_dir(
        temp_dir.path(),
        &["--json", "--config", &config, "plan", "--data-dir", &data_dir],
    );
    let json = stdout_json(&output);

    assert_eq!(json["maxStoryPoints"], 12.0);
    assert_eq!(json["users"]["alice"]["plannedIssues"][0]["key"], "MOB-10");
    assert_eq!(json["users"]["bob"]["lostIssues"][0]["key"], "MOB-5");
}

#[rstest]
fn test_query_command(temp_dir: TempDir) {
    let config = fixture("sprint.yaml");
    let output = run_sprint_graph_in_dir(temp_dir.path(), &["--json", "--config", &config, "query"]);
    let json = stdout_json(&output);

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|query| query["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["sprint", "planned", "lost"]);
    assert!(json[1]["jql"].as_str().unwrap().starts_with("Sprint = 42"));
}

#[rstest]
fn test_missing_config_fails(temp_dir: TempDir) {
    let output = run_sprint_graph_in_dir(temp_dir.path(), &["sprint"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sprint.yaml"));
}
