//! Integration tests for the nerview binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PREDICTION: &str = r#"{
    "text": "John has diabetes.",
    "entities": [
        {"text": "diabetes", "label": "DISEASE", "start": 9, "end": 17, "score": 0.713},
        {"text": "John", "label": "PERSON", "start": 0, "end": 4, "score": 0.98}
    ]
}"#;

/// Command with an isolated (empty) config directory.
fn nerview(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nerview").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_highlight_inline_from_stdin() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["highlight", "--format", "inline"])
        .write_stdin(PREDICTION)
        .assert()
        .success()
        .stdout("[PERSON: John] has [DISEASE: diabetes].\n");
}

#[test]
fn test_highlight_human_from_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("prediction.json");
    std::fs::write(&path, PREDICTION).unwrap();

    nerview(&home)
        .args(["highlight", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entity Summary"))
        .stdout(predicate::str::contains("\"diabetes\" 71.3%"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_highlight_json_output() {
    let home = TempDir::new().unwrap();
    let assert = nerview(&home)
        .args(["highlight", "--format", "json"])
        .write_stdin(PREDICTION)
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let segments = out["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0]["kind"], "entity");
    assert_eq!(segments[0]["label"], "PERSON");
    assert_eq!(segments[1]["kind"], "plain");
    assert_eq!(out["summary"]["DISEASE"], 1);
    assert!(out["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_highlight_text_and_entities_flags() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args([
            "highlight",
            "--text",
            "Take aspirin daily",
            "--entities",
            r#"[{"text":"aspirin","label":"DRUG","start":5,"end":12},
                {"text":"aspirin","label":"DOSAGE","start":5,"end":12}]"#,
            "--format",
            "inline",
        ])
        .assert()
        .success()
        .stdout("Take [DRUG, DOSAGE: aspirin] daily\n");
}

#[test]
fn test_highlight_min_score_filters() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["highlight", "--format", "inline", "--min-score", "0.9"])
        .write_stdin(PREDICTION)
        .assert()
        .success()
        .stdout("[PERSON: John] has diabetes.\n");
}

#[test]
fn test_highlight_rejects_out_of_bounds() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["highlight", "--text", "John", "--entities"])
        .arg(r#"[{"text":"John","label":"PERSON","start":0,"end":9}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid span"));
}

#[test]
fn test_highlight_text_only_needs_locate() {
    let home = TempDir::new().unwrap();
    let entities = r#"[{"text":"paris","label":"GPE"}]"#;

    nerview(&home)
        .args(["highlight", "--text", "Paris in May", "--entities", entities])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--locate"));

    nerview(&home)
        .args([
            "highlight",
            "--locate",
            "--format",
            "inline",
            "--text",
            "Paris in May",
            "--entities",
            entities,
        ])
        .assert()
        .success()
        .stdout("[GPE: Paris] in May\n");
}

#[test]
fn test_summary_counts_labels() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["summary", "--format", "json"])
        .write_stdin(PREDICTION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PERSON\": 1"))
        .stdout(predicate::str::contains("\"DISEASE\": 1"));
}

#[test]
fn test_summary_run_results() {
    let home = TempDir::new().unwrap();
    let run = r#"{"results": [
        {"document_id": 1, "predictions": [
            {"text": "aspirin", "label": "DRUG"},
            {"text": "John", "label": "PERSON"}
        ]},
        {"document_id": 2, "predictions": [{"text": "ibuprofen", "label": "DRUG"}]}
    ]}"#;

    nerview(&home)
        .args(["summary", "--run"])
        .write_stdin(run)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entities, 2 labels, 2 documents"))
        .stdout(predicate::str::contains("DRUG    2"));
}

#[test]
fn test_check_passes_clean_prediction() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .arg("check")
        .write_stdin(PREDICTION)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entities valid"));
}

#[test]
fn test_check_fails_on_issues() {
    let home = TempDir::new().unwrap();
    let bad = r#"{"text": "John", "entities": [
        {"text": "John", "label": "PERSON", "start": 1, "end": 5}
    ]}"#;
    nerview(&home)
        .arg("check")
        .write_stdin(bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("exceeds text length"));
}

#[test]
fn test_color_lists_palette_entry() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["color", "PERSON", "LOCATION"])
        .assert()
        .success()
        .stdout(predicate::str::contains("violet"))
        .stdout(predicate::str::contains("#a855f7"));
}

#[test]
fn test_color_requires_label() {
    let home = TempDir::new().unwrap();
    nerview(&home).arg("color").assert().failure();
}

#[test]
fn test_config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    std::fs::write(&config, "format = \"inline\"\nmin_score = 0.9\n").unwrap();

    nerview(&home)
        .args(["--config"])
        .arg(&config)
        .arg("highlight")
        .write_stdin(PREDICTION)
        .assert()
        .success()
        .stdout("[PERSON: John] has diabetes.\n");
}

#[test]
fn test_invalid_config_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "min_score = 3.0\n").unwrap();

    nerview(&home)
        .args(["highlight", "--config"])
        .arg(&config)
        .write_stdin(PREDICTION)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_score"));
}

#[test]
fn test_missing_config_file_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.toml");

    nerview(&home)
        .args(["highlight", "--config"])
        .arg(&missing)
        .write_stdin(PREDICTION)
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_locate_drops_unlabeled_entities() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args([
            "highlight",
            "--locate",
            "--format",
            "inline",
            "--text",
            "x marks x",
            "--entities",
            r#"[{"text":"x","label":""},{"text":"marks","label":"VERB"}]"#,
        ])
        .assert()
        .success()
        .stdout("x [VERB: marks] x\n");
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("nerview").join("config.toml");

    nerview(&home)
        .args(["config", "--config"])
        .arg(&config)
        .arg("init")
        .assert()
        .success();
    assert!(config.exists());

    nerview(&home)
        .args(["config", "--config"])
        .arg(&config)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    nerview(&home)
        .args(["config", "--config"])
        .arg(&config)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("show_scores = true"));
}

#[test]
fn test_completions_generate() {
    let home = TempDir::new().unwrap();
    nerview(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nerview"));
}
