use flipside_core::{Board, Color, Coord, Evaluator};

/// Static cell values: corners dominant, cells adjacent to corners
/// penalized, edges mildly favored.
pub const POSITION_WEIGHTS: [i32; 64] = [
    20, -3, 11, 8, 8, 11, -3, 20, //
    -3, -7, -4, 1, 1, -4, -7, -3, //
    11, -4, 2, 2, 2, 2, -4, 11, //
    8, 1, 2, -3, -3, 2, 1, 8, //
    8, 1, 2, -3, -3, 2, 1, 8, //
    11, -4, 2, 2, 2, 2, -4, 11, //
    -3, -7, -4, 1, 1, -4, -7, -3, //
    20, -3, 11, 8, 8, 11, -3, 20,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

/// Relative importance of the three sub-scores within one phase. The
/// numbers are tunable configuration, not contract.
#[derive(Debug, Clone, Copy)]
pub struct PhaseWeights {
    pub parity: f32,
    pub mobility: f32,
    pub position: f32,
}

/// Phase breakpoints over the move counter, with one weighting per phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTable {
    /// Move numbers below this are `Early`.
    pub early_until: u32,
    /// Move numbers below this (and not early) are `Mid`; the rest `Late`.
    pub mid_until: u32,
    pub early: PhaseWeights,
    pub mid: PhaseWeights,
    pub late: PhaseWeights,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            early_until: 16,
            mid_until: 44,
            early: PhaseWeights {
                parity: 0.05,
                mobility: 0.45,
                position: 0.50,
            },
            mid: PhaseWeights {
                parity: 0.25,
                mobility: 0.35,
                position: 0.40,
            },
            late: PhaseWeights {
                parity: 0.60,
                mobility: 0.15,
                position: 0.25,
            },
        }
    }
}

impl PhaseTable {
    pub fn phase_for(&self, move_number: u32) -> Phase {
        if move_number < self.early_until {
            Phase::Early
        } else if move_number < self.mid_until {
            Phase::Mid
        } else {
            Phase::Late
        }
    }

    pub fn weights(&self, phase: Phase) -> PhaseWeights {
        match phase {
            Phase::Early => self.early,
            Phase::Mid => self.mid,
            Phase::Late => self.late,
        }
    }
}

/// Phase-selected heuristic evaluation, Black-relative.
///
/// Non-terminal positions score as a phase-weighted sum of normalized coin
/// parity, mobility, and positional sub-scores, each in roughly
/// `[-100, 100]`. Terminal positions always return the exact disc
/// differential.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseEval {
    table: PhaseTable,
}

impl PhaseEval {
    pub fn new(table: PhaseTable) -> Self {
        Self { table }
    }

    fn coin_parity(board: &Board) -> f32 {
        let (black, white) = board.counts();
        normalized_differential(f32::from(black), f32::from(white))
    }

    fn mobility(board: &Board) -> f32 {
        let black = board.legal_moves(Color::Black).len() as f32;
        let white = board.legal_moves(Color::White).len() as f32;
        normalized_differential(black, white)
    }

    fn positional(board: &Board) -> f32 {
        let mut black = 0i32;
        let mut white = 0i32;
        for (index, &weight) in POSITION_WEIGHTS.iter().enumerate() {
            if let Some(coord) = Coord::from_index(index) {
                match board.cell(coord) {
                    Some(Color::Black) => black += weight,
                    Some(Color::White) => white += weight,
                    None => {}
                }
            }
        }
        let denom = (black.abs() + white.abs()) as f32;
        if denom == 0.0 {
            0.0
        } else {
            100.0 * (black - white) as f32 / denom
        }
    }
}

fn normalized_differential(mine: f32, theirs: f32) -> f32 {
    if mine + theirs == 0.0 {
        0.0
    } else {
        100.0 * (mine - theirs) / (mine + theirs)
    }
}

impl Evaluator for PhaseEval {
    fn evaluate(&self, board: &Board) -> f32 {
        if board.is_terminal() {
            return board.score() as f32;
        }

        let weights = self.table.weights(self.table.phase_for(board.move_number()));
        weights.parity * Self::coin_parity(board)
            + weights.mobility * Self::mobility(board)
            + weights.position * Self::positional(board)
    }
}
