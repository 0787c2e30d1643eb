use assert_cmd::Command;
use predicates::str::contains;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("dataset-prep").unwrap()
}

fn write_spec(dir: &TempDir, doc: &Value) -> PathBuf {
    let path = dir.path().join("spec.json");
    fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}

#[test]
fn fixes_null_typed_properties_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_spec(
        &dir,
        &json!({
            "openapi": "3.0.0",
            "components": {
                "schemas": {
                    "EntityDefNew": { "properties": { "id": { "type": "null" } } },
                    "Widget": { "properties": { "color": { "enum": [null] } } }
                }
            }
        }),
    );
    let output = dir.path().join("fixed.json");

    cmd()
        .arg("preprocess-spec")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("⚠ Input spec has invalid schemas - attempting fixes..."))
        .stdout(contains("✓ Fixed EntityDefNew.id from literal None to nullable string"))
        .stdout(contains("✓ Fixed Widget.color from literal None to nullable string"))
        .stdout(contains("✓ Output spec is valid"))
        .stdout(contains("✔ Preprocessed spec written to:"));

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written["components"]["schemas"]["EntityDefNew"]["properties"]["id"],
        json!({ "type": "string", "nullable": true })
    );
    assert_eq!(
        written["components"]["schemas"]["Widget"]["properties"]["color"],
        json!({ "type": "string", "nullable": true })
    );
}

#[test]
fn clean_spec_passes_through_structurally_identical() {
    let dir = tempfile::tempdir().unwrap();
    let doc = json!({
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "Ok": { "properties": { "name": { "type": "string" } } }
            }
        }
    });
    let input = write_spec(&dir, &doc);
    let output = dir.path().join("fixed.json");

    cmd()
        .arg("preprocess-spec")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("✓ Input spec appears valid"));

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        serde_json::to_string(&written).unwrap(),
        serde_json::to_string(&doc).unwrap()
    );
}

#[test]
fn input_violations_are_reported_per_property() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_spec(
        &dir,
        &json!({
            "components": {
                "schemas": {
                    "Widget": { "properties": { "color": { "enum": [null] } } }
                }
            }
        }),
    );

    cmd()
        .arg("preprocess-spec")
        .arg(&input)
        .arg(dir.path().join("fixed.json"))
        .assert()
        .success()
        .stdout(contains("✗ Invalid type in Widget.color:"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg("preprocess-spec")
        .arg(dir.path().join("absent.json"))
        .arg(dir.path().join("fixed.json"))
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn invalid_json_input_fails_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();
    let output = dir.path().join("fixed.json");

    cmd()
        .arg("preprocess-spec")
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(contains("not valid JSON"));

    assert!(!output.exists());
}

#[test]
fn wrong_arity_shows_usage() {
    cmd()
        .args(["preprocess-spec", "only-one.json"])
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
