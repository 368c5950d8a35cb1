//! Tests for the `lagen` binary

use std::fs;
use std::process::Command;

fn lagen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lagen"))
}

fn golden_header() -> String {
    fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/golden/la.h")).unwrap()
}

#[test]
fn test_generate_to_stdout() {
    let output = lagen().arg("generate").output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), golden_header());
}

#[test]
fn test_logging_stays_off_stdout() {
    let output = lagen().args(["-vvv", "generate"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), golden_header());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("la.h");

    let output = lagen()
        .args(["generate", "--output"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), golden_header());
}

#[test]
fn test_generate_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lagen.toml");
    fs::write(
        &config,
        r#"
            [guards]
            header = "VEC2_H"

            [select]
            sizes = [2]
            types = ["int"]
            ops = ["sum"]
        "#,
    )
    .unwrap();

    let output = lagen()
        .args(["generate", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let header = String::from_utf8(output.stdout).unwrap();
    assert!(header.starts_with("#ifndef VEC2_H\n"));
    assert!(header.contains("V2i v2i_sum(V2i a, V2i b);\n"));
    assert!(!header.contains("v2i_sub"));
    assert!(!header.contains("V2f"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lagen.toml");
    fs::write(&config, "[select]\ntypes = [\"quaternion\"]\n").unwrap();

    let output = lagen()
        .args(["generate", "-c"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown element type 'quaternion'"), "{}", stderr);
}

#[test]
fn test_names() {
    let output = lagen().arg("names").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 63);
    assert_eq!(lines[0], "type\tV2f\tV2f");
    assert_eq!(lines[1], "operation\tv2f_sum\tV2f");
    assert_eq!(lines[5], "constructor\tv2f\tV2f");
    assert_eq!(lines[6], "scalar-constructor\tv2fs\tV2f");
    assert_eq!(lines[62], "scalar-constructor\tv4is\tV4i");
}
