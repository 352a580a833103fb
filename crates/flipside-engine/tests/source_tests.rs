use std::collections::BTreeSet;
use std::path::PathBuf;

use flipside_engine::{PuzzleRecord, PuzzleSource, SourceError, SourceState};

fn record(solution: &str) -> PuzzleRecord {
    PuzzleRecord {
        board_state: "x".repeat(65),
        solution: solution.to_string(),
        moves: "a1 b2".to_string(),
        difficulty: 1,
    }
}

fn write_corpus(name: &str, lines: &[String]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "flipside-source-{name}-{}.jsonl",
        std::process::id()
    ));
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn source_streams_exhausts_and_restarts() {
    let lines: Vec<String> = ["d3", "c4", "f5"]
        .iter()
        .map(|s| serde_json::to_string(&record(s)).unwrap())
        .collect();
    let path = write_corpus("lifecycle", &lines);

    let mut source = PuzzleSource::with_chunk_size(&path, 2).unwrap();
    assert_eq!(source.state(), SourceState::Streaming);

    let mut first_pass = BTreeSet::new();
    first_pass.insert(source.next_puzzle().unwrap().solution);
    first_pass.insert(source.next_puzzle().unwrap().solution);
    assert_eq!(source.state(), SourceState::Streaming);

    first_pass.insert(source.next_puzzle().unwrap().solution);
    assert_eq!(source.state(), SourceState::Exhausted);

    // One full pass served every record exactly once.
    let expected: BTreeSet<String> =
        ["d3", "c4", "f5"].iter().map(|s| s.to_string()).collect();
    assert_eq!(first_pass, expected);

    // Drained: the next request restarts from the top of the file.
    let wrapped = source.next_puzzle().unwrap();
    assert_eq!(source.state(), SourceState::Streaming);
    assert!(expected.contains(&wrapped.solution));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_lines_are_skipped() {
    let lines = vec![
        serde_json::to_string(&record("d3")).unwrap(),
        "not json at all".to_string(),
        serde_json::to_string(&record("c4")).unwrap(),
    ];
    let path = write_corpus("garbage", &lines);

    let mut source = PuzzleSource::open(&path).unwrap();
    let mut seen = BTreeSet::new();
    seen.insert(source.next_puzzle().unwrap().solution);
    seen.insert(source.next_puzzle().unwrap().solution);

    let expected: BTreeSet<String> = ["d3", "c4"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seen, expected);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_corpus_reports_empty_after_a_fresh_pass() {
    let path = write_corpus("empty", &[]);

    let mut source = PuzzleSource::open(&path).unwrap();
    assert!(matches!(
        source.next_puzzle(),
        Err(SourceError::Empty(_))
    ));

    let _ = std::fs::remove_file(&path);
}
