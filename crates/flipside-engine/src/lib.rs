pub mod difficulty;
pub mod heuristic;
pub mod minimax;
pub mod miner;
pub mod source;

pub use difficulty::{difficulty_for, MAX_DIFFICULTY};
pub use heuristic::{Phase, PhaseEval, PhaseTable, PhaseWeights, POSITION_WEIGHTS};
pub use minimax::{DepthPolicy, MinimaxSearcher, SearchConfig};
pub use miner::{
    append_sink, JsonlSink, MineError, MineStats, MinerConfig, PuzzleMiner, PuzzleRecord,
    Selection, TranscriptError,
};
pub use source::{PuzzleSource, SourceError, SourceState, DEFAULT_CHUNK_SIZE};
