//! File-based helpers: compiled detectors written to disk and loaded back,
//! input streams read from files, and diagrams saved from the prompt.

use std::io::Cursor;

use bitseq_cli::DetectorArgs;
use bitseq_core::{BitString, Convention, Overlap};
use bitseq_fsm::{Detector, dot, format, simulate};
use tempfile::TempDir;

fn args(mealy: bool, non_overlapping: bool) -> DetectorArgs {
    DetectorArgs {
        mealy,
        non_overlapping,
        failure_array: false,
    }
}

#[test]
fn compiled_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detector.bsqd");

    let built = bitseq_cli::build_detector("1011", &args(true, true)).unwrap();
    std::fs::write(&path, format::write(&built)).unwrap();

    let loaded = bitseq_cli::load_compiled(&path).unwrap();
    assert_eq!(loaded, built);
    assert_eq!(loaded.convention(), Convention::Mealy);
    assert_eq!(loaded.overlap(), Overlap::NonOverlapping);

    let input: BitString = "10110111011".parse().unwrap();
    assert_eq!(simulate::run(&loaded, &input).to_string(), "00010000001");
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.bsqd");
    let err = bitseq_cli::load_compiled(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
    assert!(err.to_string().contains("absent.bsqd"));
}

#[test]
fn corrupt_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.bsqd");
    std::fs::write(&path, b"not a detector at all").unwrap();
    let err = bitseq_cli::load_compiled(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to load compiled detector"));
    assert!(format!("{err:#}").contains("magic"));
}

#[test]
fn truncated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.bsqd");
    let built = bitseq_cli::build_detector("110", &args(false, false)).unwrap();
    let bytes = format::write(&built);
    std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    assert!(bitseq_cli::load_compiled(&path).is_err());
}

#[test]
fn inputs_from_file_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streams.txt");
    std::fs::write(&path, "111\n10101\n").unwrap();

    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let lines = bitseq_cli::read_lines(file).unwrap();
    let inputs = bitseq_cli::parse_inputs(&lines).unwrap();

    let detector = bitseq_cli::build_detector("11", &args(false, false)).unwrap();
    let outputs: Vec<String> = inputs
        .iter()
        .map(|input| simulate::run(&detector, input).to_string())
        .collect();
    assert_eq!(outputs, vec!["011", "00000"]);
}

#[test]
fn blank_line_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streams.txt");
    std::fs::write(&path, "111\n\n10101\n").unwrap();

    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let lines = bitseq_cli::read_lines(file).unwrap();
    let err = bitseq_cli::parse_inputs(&lines).unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "input #2 rejected: input stream cannot be empty"
    );
}

#[test]
fn empty_file_has_no_input_streams() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let lines = bitseq_cli::read_lines(file).unwrap();
    let err = bitseq_cli::parse_inputs(&lines).unwrap_err();
    assert_eq!(err.to_string(), "no input streams");
}

#[test]
fn visualize_and_save_writes_dot_file() {
    let dir = TempDir::new().unwrap();
    let detector = bitseq_cli::build_detector("101", &args(true, true)).unwrap();
    let mut answers = Cursor::new("y\n");
    let mut out = Vec::new();

    let saved = bitseq_cli::visualize_step(&mut answers, &mut out, &detector, true, dir.path())
        .unwrap()
        .unwrap();
    assert_eq!(saved, dir.path().join("fsm_mealy_101_nonoverlap.dot"));
    let written = std::fs::read_to_string(&saved).unwrap();
    assert_eq!(written, dot::to_dot(&detector));

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.starts_with("Visualize FSM? (y/n): digraph fsm {"));
    assert!(transcript.ends_with(&format!("FSM diagram saved as {}\n", saved.display())));
}

#[test]
fn visualize_without_save_prints_only() {
    let dir = TempDir::new().unwrap();
    let detector = bitseq_cli::build_detector("11", &args(false, false)).unwrap();
    let mut out = Vec::new();

    let saved =
        bitseq_cli::visualize_step(&mut Cursor::new("Y\n"), &mut out, &detector, false, dir.path())
            .unwrap();
    assert!(saved.is_none());
    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("S2 [label=\"S2/1\", shape=doublecircle"));
    assert!(transcript.ends_with("Diagram not saved.\n"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn declining_visualization_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let detector = bitseq_cli::build_detector("11", &args(false, false)).unwrap();
    let mut out = Vec::new();

    let saved =
        bitseq_cli::visualize_step(&mut Cursor::new("n\n"), &mut out, &detector, true, dir.path())
            .unwrap();
    assert!(saved.is_none());
    assert_eq!(String::from_utf8(out).unwrap(), "Visualize FSM? (y/n): ");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
