use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn convert_markdown_file_to_adf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Plan\n\n- **ship** it\n- test it\n").unwrap();

    let mut cmd = cargo_bin_cmd!("atl");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input.as_os_str())
        .arg("--to")
        .arg("adf");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["type"], "doc");
    assert_eq!(json["version"], 1);
    assert_eq!(json["content"][0]["type"], "heading");
    assert_eq!(json["content"][1]["type"], "bulletList");
    assert_eq!(
        json["content"][1]["content"][0]["content"][0]["content"][0]["marks"][0]["type"],
        "strong"
    );
}

#[test]
fn convert_reads_markdown_from_stdin() {
    let mut cmd = cargo_bin_cmd!("atl");
    cmd.arg("convert")
        .arg("-")
        .arg("--to")
        .arg("adf")
        .write_stdin("Hello *world*");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"paragraph\""))
        .stdout(predicate::str::contains("\"type\": \"em\""));
}

#[test]
fn convert_storage_to_markdown_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.xhtml");
    let output = dir.path().join("page.md");
    fs::write(
        &input,
        "<h2>Setup</h2><ac:structured-macro ac:name=\"toc\"/><p>Run <code>make</code></p>",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("atl");
    cmd.arg("convert")
        .arg(input.as_os_str())
        .arg("--to")
        .arg("markdown")
        .arg("-o")
        .arg(output.as_os_str());
    cmd.assert().success().stdout(predicate::str::is_empty());

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.starts_with("## Setup"));
    assert!(markdown.contains("[Table of Contents]"));
    assert!(markdown.contains("Run `make`"));
}

#[test]
fn convert_adf_back_to_markdown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("body.json");
    fs::write(
        &input,
        r#"{"type":"doc","version":1,"content":[{"type":"paragraph","content":[{"type":"text","text":"plain"}]}]}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("atl");
    cmd.arg("convert").arg(input.as_os_str()).arg("--to").arg("markdown");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("plain"));
}

#[test]
fn convert_unknown_extension_requires_from() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "text").unwrap();

    let mut cmd = cargo_bin_cmd!("atl");
    cmd.arg("convert").arg(input.as_os_str()).arg("--to").arg("adf");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"error\": \"validation_error\""))
        .stderr(predicate::str::contains("specify --from explicitly"));
}

#[test]
fn convert_missing_input_file_fails() {
    let mut cmd = cargo_bin_cmd!("atl");
    cmd.arg("convert")
        .arg("/nonexistent/notes.md")
        .arg("--to")
        .arg("adf");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}
