use crate::board::Board;
use crate::types::Coord;

/// One ranked candidate: the move and its Black-relative evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMove {
    pub coord: Coord,
    pub eval: f32,
}

/// Ranked candidate-move search.
///
/// Results are sorted descending from the mover's perspective; the stored
/// evaluations stay Black-relative. A terminal or moveless position yields
/// an empty list, never an error. `depth: None` lets the implementation
/// pick a depth from its own policy.
pub trait Searcher {
    fn find_best_moves(&mut self, board: &Board, top_n: usize, depth: Option<u8>)
        -> Vec<RankedMove>;
}
