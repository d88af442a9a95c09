use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

/// Helper to create an isolated HOME with an optional rc file
fn setup_test_env(rc: Option<&str>) -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    if let Some(rc) = rc {
        let config_dir = temp_dir.path().join(".paperdesk");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("rc"), rc).unwrap();
    }
    (temp_dir, guard)
}

fn get_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paperdesk").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

fn write_payload(temp_dir: &TempDir, name: &str, body: &str) -> String {
    let path = temp_dir.path().join(name);
    fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

const PROGRESS: &str = r#"{
    "submission_status": "finished",
    "submission_time": "2024-01-02 10:00:00",
    "initial_review_status": "processing",
    "initial_review_time": "2024-01-03 09:00:00",
    "publication_status": null
}"#;

#[test]
fn test_timeline_text_output() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["timeline", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("收稿  已完成"))
        .stdout(predicate::str::contains("2024-01-02 10:00"))
        .stdout(predicate::str::contains("初审  处理中"))
        .stdout(predicate::str::contains("等待完成"))
        .stdout(predicate::str::contains("出版"))
        .stdout(predicate::str::contains("指派专家").not())
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_timeline_json_output() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    let output = get_cmd(&temp_dir)
        .args(["timeline", &file, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stages = stages.as_array().unwrap();
    assert_eq!(stages.len(), 9);
    assert_eq!(stages[0]["key"], "submission");
    assert_eq!(stages[0]["status"], "finished");
    assert_eq!(stages[0]["statusText"], "已完成");
    assert_eq!(stages[0]["color"], "green");
    assert_eq!(stages[0]["time"], "2024-01-02 10:00:00");
    assert_eq!(stages[8]["key"], "publication");
    assert!(stages[8]["time"].is_null());
}

#[test]
fn test_timeline_reads_stdin_and_fills_submission_date() {
    let (temp_dir, _guard) = setup_test_env(None);

    let output = get_cmd(&temp_dir)
        .args(["timeline", "-", "--json", "--submission-date", "2023-12-30 08:00:00"])
        .write_stdin("{}")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stages[0]["time"], "2023-12-30 08:00:00");
    assert!(stages[1]["time"].is_null());
}

#[test]
fn test_timeline_empty_stdin_is_empty_payload() {
    let (temp_dir, _guard) = setup_test_env(None);

    get_cmd(&temp_dir)
        .args(["timeline"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("收稿  处理中"));
}

#[test]
fn test_locale_from_rc_and_flag() {
    let (temp_dir, _guard) = setup_test_env(Some("locale=en\n"));
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["timeline", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission  Finished"))
        .stdout(predicate::str::contains("Pending"));

    get_cmd(&temp_dir)
        .args(["--locale", "zh", "timeline", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("收稿"));
}

#[test]
fn test_time_format_from_rc() {
    let (temp_dir, _guard) = setup_test_env(Some("time.format=%d/%m/%Y\n"));
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["timeline", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("02/01/2024"));
}

#[test]
fn test_color_always() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["--color", "always", "timeline", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[32m"));
}

#[test]
fn test_invalid_rc_is_user_error() {
    let (temp_dir, _guard) = setup_test_env(Some("locale=klingon\n"));

    get_cmd(&temp_dir)
        .args(["status-text", "finished"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("locale"));
}

#[test]
fn test_current_stage() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["current-stage", &file])
        .assert()
        .success()
        .stdout("初审\n");
}

#[test]
fn test_last_updated() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "progress.json", PROGRESS);

    get_cmd(&temp_dir)
        .args(["last-updated", &file])
        .assert()
        .success()
        .stdout("2024-01-03 09:00\n");

    let empty = write_payload(&temp_dir, "empty.json", r#"{"review_time": "someday"}"#);
    get_cmd(&temp_dir)
        .args(["last-updated", &empty])
        .assert()
        .success()
        .stdout("未知\n");

    get_cmd(&temp_dir)
        .args(["last-updated", &empty, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""lastUpdatedAt":null"#));
}

#[test]
fn test_status_text() {
    let (temp_dir, _guard) = setup_test_env(None);

    get_cmd(&temp_dir).args(["status-text", "processing"]).assert().success().stdout("处理中\n");
    get_cmd(&temp_dir).args(["status-text", "on_hold"]).assert().success().stdout("on_hold\n");
    get_cmd(&temp_dir).args(["status-text"]).assert().success().stdout("未知\n");
    get_cmd(&temp_dir)
        .args(["--locale", "en", "status-text", "finished"])
        .assert()
        .success()
        .stdout("Finished\n");
}

#[test]
fn test_missing_file_is_user_error() {
    let (temp_dir, _guard) = setup_test_env(None);

    get_cmd(&temp_dir)
        .args(["timeline", "/nonexistent/progress.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("Failed to read input"));
}

#[test]
fn test_invalid_json_is_user_error() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "broken.json", "{not json");

    get_cmd(&temp_dir)
        .args(["timeline", &file])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_non_object_payload_renders_defaults() {
    let (temp_dir, _guard) = setup_test_env(None);
    let file = write_payload(&temp_dir, "list.json", "[1, 2, 3]");

    get_cmd(&temp_dir)
        .args(["current-stage", &file])
        .assert()
        .success()
        .stdout("收稿\n");
}

#[test]
fn test_version_flag() {
    let (temp_dir, _guard) = setup_test_env(None);

    get_cmd(&temp_dir)
        .args(["--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
