use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("svgplay_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_svgplay(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svgplay"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run svgplay")
}

#[test]
fn path_data_prints_svg_to_stdout() {
    let dir = TestDir::new("path_stdout");
    let output = run_svgplay(&["-p", "M0,0 L10,0 L5,8 Z"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<svg"), "expected svg root, got: {stdout}");
    assert!(
        stdout.contains("M0.0000,0.0000L10.0000,0.0000L5.0000,8.0000Z"),
        "expected flattened path data, got: {stdout}"
    );
}

#[test]
fn dashed_path_data_splits_sub_paths() {
    let dir = TestDir::new("dashed");
    let output = run_svgplay(&["-p", "M0,0 L20,0", "--dash", "5"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("M10.0000,0.0000"),
        "expected a lifted-pen sub-path at the second dash, got: {stdout}"
    );
    assert!(
        stdout.contains("fill=\"none\"") && stdout.contains("stroke=\"black\""),
        "expected stroke-only paint for dashed data, got: {stdout}"
    );
}

#[test]
fn segments_flag_controls_flattening() {
    let dir = TestDir::new("segments");
    let output = run_svgplay(&["-p", "M0,0 C0,10 10,10 10,0", "--segments", "2"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("M0.0000,0.0000L5.0000,7.5000L10.0000,0.0000"),
        "expected a two-segment flattening, got: {stdout}"
    );
}

#[test]
fn file_input_writes_svg_file() {
    let dir = TestDir::new("file_svg");
    let source_file = dir.path.join("sample.svg");
    fs::write(
        &source_file,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><path d="M0,0 L10,5"/></svg>"#,
    )
    .expect("write sample svg file");

    let output = run_svgplay(&["sample.svg", "-o", "out.svg"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let svg_path = dir.path.join("out.svg");
    assert!(svg_path.is_file(), "expected output file at {svg_path:?}");
    let svg = fs::read_to_string(svg_path).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(
        svg.contains("viewBox=\"0 0 20 10\""),
        "expected declared viewport, got: {svg}"
    );
    assert!(
        svg.contains("L10.0000,5.0000"),
        "expected flattened line, got: {svg}"
    );
}

#[test]
fn invalid_path_data_is_an_error() {
    let dir = TestDir::new("bad_path");
    let output = run_svgplay(&["-p", "M0,0 A5,5 0 0 1 10,10"], &dir.path);

    assert!(!output.status.success(), "expected failure: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error:") && stderr.contains("unknown path command"),
        "expected a tokenizer error on stderr, got: {stderr}"
    );
}

#[test]
fn broken_element_warns_but_document_succeeds() {
    let dir = TestDir::new("warn");
    let source_file = dir.path.join("sample.svg");
    fs::write(
        &source_file,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><path d="M0,0 Q5,5"/><path d="M0,0 L4,4"/></svg>"#,
    )
    .expect("write sample svg file");

    let output = run_svgplay(&["sample.svg"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning:"),
        "expected a dropped-element warning, got: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("L4.0000,4.0000"),
        "expected the good path to survive, got: {stdout}"
    );
}

#[test]
fn missing_input_is_an_error() {
    let dir = TestDir::new("no_input");
    let output = run_svgplay(&[], &dir.path);

    assert!(!output.status.success(), "expected failure: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No input"),
        "expected a missing-input message, got: {stderr}"
    );
}
