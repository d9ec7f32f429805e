//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tabata-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timeline_debug_json() {
    let (stdout, _, code) = run_cli(&["timeline", "--debug", "--json"]);
    assert_eq!(code, 0, "timeline failed");
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = entries.as_array().unwrap();
    // Debug config: 1 prepare + 3 work + 2 rest.
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["phase"], "prepare");
    assert_eq!(entries[0]["sequential_number"], 1);
    assert!(entries[0]["work_interval"].is_null());
    assert_eq!(entries[5]["phase"], "work");
    assert_eq!(entries[5]["work_interval"], 3);
}

#[test]
fn test_timeline_human_output() {
    let (stdout, _, code) = run_cli(&["timeline", "--debug"]);
    assert_eq!(code, 0, "timeline failed");
    assert!(stdout.contains("Prepare"));
    assert!(stdout.contains("6 entries"));
}

#[test]
fn test_exercises_seeded_json() {
    let (stdout, _, code) = run_cli(&["exercises", "--debug", "--seed", "7", "--json"]);
    assert_eq!(code, 0, "exercises failed");
    let labels: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(labels.len(), 3);
    for pair in labels.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }

    // Same seed, same assignment.
    let (again, _, _) = run_cli(&["exercises", "--debug", "--seed", "7", "--json"]);
    let again: Vec<String> = serde_json::from_str(&again).unwrap();
    assert_eq!(labels, again);
}

#[test]
fn test_config_show_debug() {
    let (stdout, _, code) = run_cli(&["config", "show", "--debug", "--json"]);
    assert_eq!(code, 0, "config show failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["prepare_duration"], 3);
    assert_eq!(config["work_duration"], 3);
    assert_eq!(config["rest_duration"], 2);
    assert_eq!(config["total_intervals"], 3);
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_run_debug_session_completes() {
    let (stdout, _, code) = run_cli(&["run", "--debug", "--no-audio", "--tick-ms", "1"]);
    assert_eq!(code, 0, "run failed");
    assert!(stdout.contains("Session complete."));
    // All three work intervals are announced.
    assert!(stdout.contains("(interval 1)"));
    assert!(stdout.contains("(interval 3)"));
}

#[test]
fn test_run_debug_session_json_events() {
    let (stdout, _, code) = run_cli(&[
        "run", "--debug", "--json", "--no-audio", "--tick-ms", "1",
    ]);
    assert_eq!(code, 0, "run --json failed");
    assert!(stdout.contains("\"type\":\"SessionStarted\""));
    assert!(stdout.contains("\"type\":\"PhaseChanged\""));
    assert!(stdout.contains("\"type\":\"SessionCompleted\""));
    // One snapshot per tick: debug session is 16 seconds long.
    let snapshots = stdout
        .lines()
        .filter(|l| l.contains("\"type\":\"StateSnapshot\""))
        .count();
    assert_eq!(snapshots, 17); // Initial render + 16 ticks.
}

#[test]
fn test_run_zero_countdown_exits_immediately() {
    // An already-zero countdown has nothing to tick; the command must
    // finish right away instead of re-rendering forever.
    let (stdout, _, code) = run_cli(&[
        "run", "--countdown", "0", "--no-audio", "--tick-ms", "1",
    ]);
    assert_eq!(code, 0, "run --countdown 0 failed");
    assert!(stdout.contains("Countdown finished."));
    // A single render, not an unbounded stream of them.
    assert!(stdout.lines().count() <= 3);
}

#[test]
fn test_run_zero_countdown_json_emits_finish_event() {
    let (stdout, _, code) = run_cli(&[
        "run", "--countdown", "0", "--json", "--no-audio", "--tick-ms", "1",
    ]);
    assert_eq!(code, 0, "run --countdown 0 --json failed");
    assert!(stdout.contains("\"type\":\"CountdownFinished\""));
}

#[test]
fn test_run_debug_session_emits_every_countdown_cue() {
    // Terminal-bell cues land in stdout. Debug config (3s prepare,
    // 3s work x3, 2s rest x2): prepare contributes 2 periodic cues,
    // each work phase 3 (entered inside the 3/2/1 window), each rest 2,
    // for 15 periodic cues plus 6 transition cues.
    let (stdout, _, code) = run_cli(&["run", "--debug", "--tick-ms", "1"]);
    assert_eq!(code, 0, "run with audio failed");
    assert_eq!(stdout.matches('\x07').count(), 21);
}

#[test]
fn test_run_countdown_freezes_at_zero() {
    let (stdout, _, code) = run_cli(&[
        "run", "--countdown", "3", "--no-audio", "--tick-ms", "1",
    ]);
    assert_eq!(code, 0, "run --countdown failed");
    assert!(stdout.contains("Countdown finished."));
    assert!(!stdout.contains("Session complete."));
}
