use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new("cargo")
        .arg("run")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn inspect_command_prints_normalized_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("deck.md");
    fs::write(&input_path, "# One\n---\n<!-- layout: quote -->\nWords\n-- Someone")
        .expect("Failed to write source file");

    let output = run_command(&["inspect", "-i", input_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"layout\": \"quote\""));
    assert!(stdout.contains("\"quote\": \"Words\""));
}

#[test]
fn render_command_writes_an_html_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("deck.json");
    let output_path = temp_dir.path().join("deck.html");
    fs::write(
        &input_path,
        r#"{"slides": [{"layout": "center", "content": "Made it"}]}"#,
    )
    .expect("Failed to write source file");

    let output = run_command(&[
        "render",
        "-i",
        input_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--source",
        "json",
        "--title",
        "CLI Deck",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_path.exists(), "Output file was not created");

    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html.contains("<title>CLI Deck</title>"));
    assert!(html.contains("data-layout=\"center\""));
    assert!(html.contains("<p>Made it</p>"));
}

#[test]
fn unknown_source_type_fails_with_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("deck.txt");
    fs::write(&input_path, "whatever").expect("Failed to write source file");

    let output = run_command(&[
        "inspect",
        "-i",
        input_path.to_str().unwrap(),
        "--source",
        "yaml",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown source type"));
}
