//! Iterator over previously mined puzzle records, for the layer that
//! dispenses puzzles to players. Records are served in shuffled chunks so
//! consecutive puzzles do not follow corpus order, and the source restarts
//! from the top of the file once the input is exhausted.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::warn;

use crate::miner::PuzzleRecord;

pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Explicit lifecycle: `Exhausted` means the current pass over the file is
/// consumed; the next request after the buffer drains restarts a fresh
/// pass (back to `Streaming`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Streaming,
    Exhausted,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("puzzle file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("no readable puzzle records in {0:?}")]
    Empty(PathBuf),
}

pub struct PuzzleSource {
    path: PathBuf,
    chunk_size: usize,
    lines: Lines<BufReader<File>>,
    buffer: VecDeque<PuzzleRecord>,
    state: SourceState,
}

impl PuzzleSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let lines = BufReader::new(File::open(&path)?).lines();
        Ok(Self {
            path,
            chunk_size: chunk_size.max(1),
            lines,
            buffer: VecDeque::new(),
            state: SourceState::Streaming,
        })
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Next puzzle, restarting from the top of the file when the current
    /// pass is spent. Fails with `Empty` only if a fresh pass yields no
    /// readable record at all.
    pub fn next_puzzle(&mut self) -> Result<PuzzleRecord, SourceError> {
        if let Some(record) = self.buffer.pop_front() {
            return Ok(record);
        }

        self.refill()?;
        if let Some(record) = self.buffer.pop_front() {
            return Ok(record);
        }

        self.restart()?;
        self.refill()?;
        self.buffer
            .pop_front()
            .ok_or_else(|| SourceError::Empty(self.path.clone()))
    }

    /// Reads up to one chunk of records and shuffles it before serving.
    /// Unreadable lines are skipped with a diagnostic. Hitting end of
    /// input marks the pass `Exhausted`.
    fn refill(&mut self) -> Result<(), SourceError> {
        let mut chunk = Vec::with_capacity(self.chunk_size);
        while chunk.len() < self.chunk_size {
            let Some(line) = self.lines.next() else {
                self.state = SourceState::Exhausted;
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PuzzleRecord>(&line) {
                Ok(record) => chunk.push(record),
                Err(err) => warn!("skipping unreadable puzzle record: {err}"),
            }
        }

        chunk.shuffle(&mut rand::thread_rng());
        self.buffer.extend(chunk);
        Ok(())
    }

    fn restart(&mut self) -> Result<(), SourceError> {
        self.lines = BufReader::new(File::open(&self.path)?).lines();
        self.state = SourceState::Streaming;
        Ok(())
    }
}
