//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temporary
//! directory so config and profile files never touch the real ones.

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sprintloop"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("SPRINTLOOP_ENV")
        .env_remove("SPRINTLOOP_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_routine_list() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["routine", "list"]);
    assert!(out.contains("7-4-2-1-1"));
    assert!(out.contains("20-minute"));
}

#[test]
fn test_routine_show_json() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["routine", "show", "7-4-2-1-1", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let phases = json["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 31);
    assert_eq!(phases[0]["kind"], "READY");
    assert_eq!(phases[30]["kind"], "DONE");
}

#[test]
fn test_routine_simulate_emits_json_lines() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["routine", "simulate", "20-minute"]);
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "WorkoutStarted");
    assert_eq!(events.last().unwrap()["type"], "WorkoutFinished");
    assert_eq!(events.last().unwrap()["label"], "WORKOUT COMPLETE");
    // One event per phase after READY, DONE included.
    assert_eq!(events.len(), 34);
}

#[test]
fn test_unknown_routine_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["routine", "show", "tabata"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown routine"));
}

#[test]
fn test_routine_show_breaks_down_by_kind() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["routine", "show", "20-minute"]);
    assert!(out.contains("  REST    04:40"), "{out}");
    assert!(!out.contains("DONE    00:00"));
}

#[test]
fn test_config_get_and_set() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_ok(&home, &["config", "get", "loop.work_secs"]).trim(), "30");
    run_ok(&home, &["config", "set", "loop.work_secs", "45"]);
    assert_eq!(run_ok(&home, &["config", "get", "loop.work_secs"]).trim(), "45");
    assert!(home.path().join(".config/sprintloop/config.toml").exists());
}

#[test]
fn test_config_set_echoes_effective_loop() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["config", "set", "loop.work_secs", "0"]);
    assert!(out.contains("work 30s"), "{out}");
    assert_eq!(run_ok(&home, &["config", "get", "loop.work_secs"]).trim(), "0");
}

#[test]
fn test_config_list_shows_file() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["config", "list"]);
    assert!(out.contains("config.toml"));
    assert!(out.contains("[loop]"));
    assert!(out.contains("loop runs work 30s / rest 2s"));
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["config", "get", "loop.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: loop.nope"), "{stderr}");
}

#[test]
fn test_unreadable_config_is_not_overwritten() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/sprintloop");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    let bytes = b"default_routine = \"7-4-2-1-1\"\n# caf\xe9\n";
    std::fs::write(&path, bytes).unwrap();

    let (_, stderr, code) = run_cli(&home, &["config", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to read configuration"), "{stderr}");
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_config_rejects_bad_value() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&home, &["config", "set", "loop.rest_secs", "two"]);
    assert_ne!(code, 0);
}

#[test]
fn test_profile_week_wraps_and_persists() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_ok(&home, &["profile", "week", "prev"]).trim(), "week 6");
    assert_eq!(run_ok(&home, &["profile", "week", "next"]).trim(), "week 1");
    run_ok(&home, &["profile", "week", "set", "3"]);
    assert!(run_ok(&home, &["profile", "show"]).contains("WEEK 3"));

    let (_, _, code) = run_cli(&home, &["profile", "week", "set", "9"]);
    assert_ne!(code, 0);
}

#[test]
fn test_plan_shows_weights() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["plan", "monday"]);
    assert!(out.contains("MONDAY"));
    assert!(out.contains("Hack Squat (3x8) @ 76 lbs"));
    assert!(out.contains("sprintloop run 20-minute"));
    assert!(out.contains("sprintloop hold 60 --side-plank"));
}

#[test]
fn test_plan_unknown_day() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["plan", "someday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown weekday 'someday'"), "{stderr}");
}

#[test]
fn test_exercise_lookup() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["exercise", "bird", "dog"]);
    assert!(out.contains("BIRD DOG"));
    assert!(out.contains("Punch heel back"));

    let (_, stderr, code) = run_cli(&home, &["exercise", "deadlift"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown exercise: deadlift"), "{stderr}");
}

#[test]
fn test_hold_runs_to_completion_without_stdin() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["hold", "1", "--silent"]);
    assert!(out.contains("TIMER  1s"), "{out}");
    assert!(out.contains("DONE"));
}
