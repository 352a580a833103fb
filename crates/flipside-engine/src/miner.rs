//! Offline puzzle mining: replay completed-game transcripts, rank the
//! candidate moves at qualifying plies, and emit forcing positions as
//! puzzle records.
//!
//! Emission is incremental: every record is serialized and flushed to the
//! sink before the next transcript is touched, so an interrupted run keeps
//! everything already written.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flipside_core::{move_to_notation, parse_notation, serialize, Board};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::difficulty::difficulty_for;
use crate::minimax::{MinimaxSearcher, SearchConfig};

/// Puzzle qualification rule over the top two candidate evaluations, both
/// Black-relative. One interface, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// The top two evaluations carry opposite signs: only one candidate
    /// preserves the winning side, an "only move" position.
    SignSplit,
    /// The absolute difference of the top two exceeds the threshold.
    GapThreshold(f32),
}

impl Selection {
    pub fn qualifies(&self, best: f32, second: f32) -> bool {
        match *self {
            Self::SignSplit => best * second < 0.0,
            Self::GapThreshold(threshold) => (best - second).abs() > threshold,
        }
    }
}

/// One mined puzzle, immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub board_state: String,
    pub solution: String,
    /// Space-joined alternative moves, strongest first.
    pub moves: String,
    pub difficulty: u8,
}

impl PuzzleRecord {
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.moves.split_whitespace()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinerConfig {
    /// Plies before this move number are replayed but never examined.
    pub min_move_number: u32,
    /// Examine every `stride`-th ply past the floor.
    pub stride: u32,
    /// Candidates requested per examined position.
    pub top_n: usize,
    /// Fixed search depth; `None` uses the searcher's depth policy.
    pub depth: Option<u8>,
    pub selection: Selection,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_move_number: 55,
            stride: 1,
            top_n: 4,
            depth: None,
            selection: Selection::GapThreshold(40.0),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("transcript has odd length {0}")]
    OddLength(usize),
    #[error("bad move notation {notation:?} at ply {ply}")]
    Notation { notation: String, ply: u32 },
    #[error("illegal move {notation:?} at ply {ply}")]
    Illegal { notation: String, ply: u32 },
}

#[derive(Debug, Error)]
pub enum MineError {
    #[error("sink i/o: {0}")]
    Io(#[from] io::Error),
    #[error("record serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MineStats {
    pub transcripts: u64,
    pub skipped: u64,
    pub emitted: u64,
}

/// Append-as-you-go JSONL sink: one record per line, flushed per record.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn emit(&mut self, record: &PuzzleRecord) -> Result<(), MineError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

/// Opens `path` for appending, creating it if needed, so a resumed run
/// extends rather than truncates earlier output.
pub fn append_sink(path: &Path) -> Result<JsonlSink<BufWriter<File>>, MineError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(JsonlSink::new(BufWriter::new(file)))
}

pub struct PuzzleMiner {
    config: MinerConfig,
    searcher: MinimaxSearcher,
}

impl PuzzleMiner {
    pub fn new(config: MinerConfig) -> Self {
        Self::with_searcher(config, MinimaxSearcher::new(SearchConfig::default()))
    }

    pub fn with_searcher(config: MinerConfig, searcher: MinimaxSearcher) -> Self {
        Self { config, searcher }
    }

    /// Ranks the position and turns it into a record if the configured
    /// selection rule qualifies it. Positions with fewer than two ranked
    /// candidates never qualify.
    pub fn examine(&mut self, board: &Board) -> Option<PuzzleRecord> {
        let ranked = self
            .searcher
            .find_best_moves(board, self.config.top_n, self.config.depth);
        if ranked.len() < 2 {
            return None;
        }
        if !self.config.selection.qualifies(ranked[0].eval, ranked[1].eval) {
            return None;
        }

        let alternatives: Vec<String> = ranked[1..]
            .iter()
            .map(|candidate| move_to_notation(candidate.coord))
            .collect();

        Some(PuzzleRecord {
            board_state: serialize(board),
            solution: move_to_notation(ranked[0].coord),
            difficulty: difficulty_for(board.move_number(), alternatives.len()),
            moves: alternatives.join(" "),
        })
    }

    /// Replays one concatenated-move transcript from the initial position,
    /// examining each qualifying ply. A malformed transcript aborts with a
    /// typed error; the board work done so far is discarded.
    pub fn mine_transcript(&mut self, transcript: &str) -> Result<Vec<PuzzleRecord>, TranscriptError> {
        let chars: Vec<char> = transcript.trim().chars().collect();
        if chars.len() % 2 != 0 {
            return Err(TranscriptError::OddLength(chars.len()));
        }

        let mut board = Board::new();
        let mut records = Vec::new();

        for (ply, pair) in chars.chunks(2).enumerate() {
            let ply = ply as u32 + 1;
            let notation: String = pair.iter().collect();
            let coord = parse_notation(&notation)
                .map_err(|_| TranscriptError::Notation {
                    notation: notation.clone(),
                    ply,
                })?;
            board
                .apply_move(coord)
                .map_err(|_| TranscriptError::Illegal { notation, ply })?;

            let move_number = board.move_number();
            if move_number >= self.config.min_move_number
                && (move_number - self.config.min_move_number) % self.config.stride.max(1) == 0
            {
                if let Some(record) = self.examine(&board) {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    /// Mines a whole corpus into `sink`. Malformed transcripts are logged
    /// and skipped; the job continues over the remaining records.
    pub fn mine_all<W, I>(&mut self, transcripts: I, sink: &mut JsonlSink<W>) -> Result<MineStats, MineError>
    where
        W: Write,
        I: IntoIterator<Item = String>,
    {
        let mut stats = MineStats::default();

        for (index, transcript) in transcripts.into_iter().enumerate() {
            stats.transcripts += 1;
            match self.mine_transcript(&transcript) {
                Ok(records) => {
                    for record in &records {
                        sink.emit(record)?;
                        stats.emitted += 1;
                    }
                }
                Err(err) => {
                    warn!("skipping transcript {index}: {err}");
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }
}
