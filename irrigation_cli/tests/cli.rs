use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const REQUEST: &str = r#"{
    "field": [
        {"lat": 0.0, "lng": 0.0},
        {"lat": 0.0, "lng": 0.0009},
        {"lat": 0.0009, "lng": 0.0009},
        {"lat": 0.0009, "lng": 0.0}
    ],
    "spacing": {"plantSpacing": 5.0, "rowSpacing": 10.0, "waterNeed": 2.0},
    "subMains": [
        {"id": "s1", "coordinates": [{"lat": 0.0, "lng": 0.00045}, {"lat": 0.0009, "lng": 0.00045}]}
    ]
}"#;

#[test]
fn area_command() {
    let file = assert_fs::NamedTempFile::new("field.csv").unwrap();
    file.write_str("0.0,0.0\n0.0,0.0009\n0.0009,0.0009\n0.0009,0.0\n")
        .unwrap();

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["area", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Area: 998"));
}

#[test]
fn pipe_length_command() {
    let file = assert_fs::NamedTempFile::new("pipe.csv").unwrap();
    file.write_str("0.0,0.0\n0.0009,0.0\n").unwrap();

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["pipe-length", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Length: 100.07"));
}

#[test]
fn malformed_csv_fails() {
    let file = assert_fs::NamedTempFile::new("pipe.csv").unwrap();
    file.write_str("0.0,0.0\nnorth,east\n").unwrap();

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["pipe-length", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn layout_command_writes_outputs() {
    let dir = assert_fs::TempDir::new().unwrap();
    let request = dir.child("request.json");
    request.write_str(REQUEST).unwrap();
    let output = dir.child("result.json");
    let geojson = dir.child("layout.geojson");

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args([
            "layout",
            request.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
            "--geojson",
            geojson.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Branches: 20"))
        .stdout(predicate::str::contains("Plants: 200"));

    output.assert(predicate::path::exists());
    geojson.assert(predicate::str::contains("FeatureCollection"));

    let text = std::fs::read_to_string(output.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["subMains"][0]["branches"].as_array().unwrap().len(), 20);
    dir.close().unwrap();
}

#[test]
fn stats_command_reads_saved_result() {
    let dir = assert_fs::TempDir::new().unwrap();
    let request = dir.child("request.json");
    request.write_str(REQUEST).unwrap();
    let output = dir.child("result.json");

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args([
            "layout",
            request.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["stats", output.path().to_str().unwrap(), "--projected-stations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average row spacing: 10.0"))
        .stdout(predicate::str::contains("Spacing accuracy: 100.0"));
}

#[test]
fn out_of_range_angle_is_reported() {
    let file = assert_fs::NamedTempFile::new("request.json").unwrap();
    file.write_str(REQUEST).unwrap();

    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["layout", file.path().to_str().unwrap(), "--angle", "200"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Rejected"))
        .stdout(predicate::str::contains("Branches: 0"));
}

#[test]
fn missing_request_fails() {
    Command::cargo_bin("irrigation_cli")
        .unwrap()
        .args(["layout", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}
