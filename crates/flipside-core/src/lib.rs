pub mod board;
pub mod eval;
pub mod notation;
pub mod search;
pub mod state;
pub mod types;

pub use board::{Board, MoveError, BOARD_SIZE, NUM_CELLS};
pub use eval::Evaluator;
pub use notation::{move_to_notation, parse_notation, NotationError};
pub use search::{RankedMove, Searcher};
pub use state::{parse, serialize, ParseError, INITIAL_STATE, STATE_LEN};
pub use types::{Color, Coord, MoveList};
