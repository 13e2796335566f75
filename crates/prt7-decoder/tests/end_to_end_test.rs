//! End-to-end decoding tests.
//!
//! Drives the full record source -> runtime -> report pipeline with scripted
//! and file-backed sources.

use std::io::Write;

use prt7_decoder::{Config, LineSource, Runtime, RuntimeError, ScriptSource, launch};

const DEMO_REPORT: &str = concat!(
    "Connection established. Waiting for frames...\n",
    "\n",
    "Frame received: [L,H] -> Processing... -> Fragment 'H' decoded as 'H'. Message: [H]\n",
    "Frame received: [L,O] -> Processing... -> Fragment 'O' decoded as 'O'. Message: [H][O]\n",
    "Frame received: [L,L] -> Processing... -> Fragment 'L' decoded as 'L'. Message: [H][O][L]\n",
    "\n",
    "Frame received: [M,2] -> Processing... -> ROTATING WHEEL +2.\n",
    "\n",
    "Frame received: [L,A] -> Processing... -> Fragment 'A' decoded as 'A'. Message: [H][O][L][A]\n",
    "Frame received: [L,Space] -> Processing... -> Fragment ' ' decoded as ' '. Message: [H][O][L][A][ ]\n",
    "Frame received: [L,W] -> Processing... -> Fragment 'W' decoded as 'W'. Message: [H][O][L][A][ ][W]\n",
    "\n",
    "Frame received: [M,-2] -> Processing... -> ROTATING WHEEL -2.\n",
    "\n",
    "Frame received: [L,O] -> Processing... -> Fragment 'O' decoded as 'O'. Message: [H][O][L][A][ ][W][O]\n",
    "Frame received: [L,R] -> Processing... -> Fragment 'R' decoded as 'R'. Message: [H][O][L][A][ ][W][O][R]\n",
    "Frame received: [L,L] -> Processing... -> Fragment 'L' decoded as 'L'. Message: [H][O][L][A][ ][W][O][R][L]\n",
    "Frame received: [L,D] -> Processing... -> Fragment 'D' decoded as 'D'. Message: [H][O][L][A][ ][W][O][R][L][D]\n",
    "\n",
    "---\n",
    "Data stream finished.\n",
    "ASSEMBLED HIDDEN MESSAGE:\n",
    "HOLA WORLD\n",
    "---\n",
);

fn decode(records: &[&str]) -> (String, String) {
    let mut buf = Vec::new();
    let mut source = ScriptSource::new(records.iter().copied());
    let message = Runtime::new(&mut buf).run(&mut source).expect("decode");
    (message, String::from_utf8(buf).expect("utf-8 report"))
}

#[test]
fn hola_world_scenario() {
    let (message, report) = decode(&[
        "L,H", "L,O", "L,L", "M,2", "L,A", "L,Space", "L,W", "M,-2", "L,O", "L,R", "L,L", "L,D",
    ]);

    assert_eq!(message, "HOLA WORLD");
    assert_eq!(report, DEMO_REPORT);
}

#[test]
fn malformed_shift_leaves_wheel_in_place() {
    let mut buf = Vec::new();
    let mut runtime = Runtime::new(&mut buf);

    runtime.step("M,abc").expect("step");
    assert_eq!(runtime.decoder().wheel().offset(), 0);
    assert!(runtime.decoder().message().is_empty());
}

#[test]
fn space_token_adds_exactly_one_space() {
    let mut buf = Vec::new();
    let mut runtime = Runtime::new(&mut buf);

    runtime.step("L,A").expect("step");
    runtime.step("L,Space").expect("step");

    assert_eq!(runtime.decoder().message().len(), 2);
    assert_eq!(runtime.decoder().message().render(), "A ");
}

#[test]
fn malformed_records_are_skipped() {
    let (message, report) = decode(&["X", "L,H", "LY", "", "Z,9", "L;Q", "L,I"]);

    assert_eq!(message, "HI");
    assert!(!report.contains("[X]"));
    assert!(!report.contains("[LY]"));
}

#[test]
fn rotation_never_changes_decoded_output() {
    let (message, _) = decode(&["M,5", "L,A", "M,-40", "L,B", "M,2147483647", "L,Z", "L,Space"]);
    assert_eq!(message, "ABZ ");
}

#[test]
fn empty_stream_reports_empty_message() {
    let (message, report) = decode(&[]);

    assert_eq!(message, "");
    assert!(report.ends_with("ASSEMBLED HIDDEN MESSAGE:\n\n---\n"));
}

#[test]
fn file_source_with_crlf_lines() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "L,H\r\nL,O\r\n\r\nM,3\r\nbad\r\nL,L\r\nL,A").expect("write records");

    let mut source = LineSource::open_file(file.path()).expect("open file");
    let mut buf = Vec::new();
    let message = Runtime::new(&mut buf).run(&mut source).expect("decode");

    assert_eq!(message, "HOLA");
}

#[test]
fn launch_reads_input_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "L,O\nL,K").expect("write records");

    let config = Config { input: Some(file.path().to_path_buf()), ..Config::default() };
    let mut buf = Vec::new();

    assert_eq!(launch(&config, &mut buf).expect("launch"), "OK");
}

#[test]
fn launch_missing_file_is_an_error() {
    let config =
        Config { input: Some("/nonexistent/prt7/records.txt".into()), ..Config::default() };

    let result = launch(&config, Vec::new());
    assert!(matches!(result, Err(RuntimeError::Transport(_))));
}

#[test]
fn launch_demo_matches_reference_report() {
    let config = Config { demo: true, ..Config::default() };
    let mut buf = Vec::new();

    launch(&config, &mut buf).expect("launch");
    let report = String::from_utf8(buf).expect("utf-8 report");

    let expected = format!(
        "Starting PRT-7 decoder. Connecting to demo data...\n{DEMO_REPORT}Releasing resources... System shut down.\n"
    );
    assert_eq!(report, expected);
}
