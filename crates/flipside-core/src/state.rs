use crate::board::{Board, NUM_CELLS};
use crate::types::{Color, Coord};
use thiserror::Error;

/// 64 row-major cell codes plus one trailing turn code.
pub const STATE_LEN: usize = NUM_CELLS + 1;

/// The starting position, Black to move.
pub const INITIAL_STATE: &str =
    "xxxxxxxxxxxxxxxxxxxxxxxxxxxwbxxxxxxbwxxxxxxxxxxxxxxxxxxxxxxxxxxxb";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {STATE_LEN} characters, received {0}")]
    Length(usize),
    #[error("invalid cell code {0:?} at index {1}")]
    InvalidCell(char, usize),
    #[error("invalid turn code {0:?}")]
    InvalidTurn(char),
}

const fn cell_code(cell: Option<Color>) -> char {
    match cell {
        Some(color) => color.to_code(),
        None => 'x',
    }
}

fn cell_from_code(code: char) -> Option<Option<Color>> {
    match code {
        'x' => Some(None),
        _ => Color::from_code(code).map(Some),
    }
}

/// Fixed-length encoding of a board. `parse(serialize(b)) == b` for every
/// reachable board.
pub fn serialize(board: &Board) -> String {
    let mut out = String::with_capacity(STATE_LEN);
    for index in 0..NUM_CELLS {
        if let Some(coord) = Coord::from_index(index) {
            out.push(cell_code(board.cell(coord)));
        }
    }
    out.push(board.turn().to_code());
    out
}

pub fn parse(text: &str) -> Result<Board, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != STATE_LEN {
        return Err(ParseError::Length(chars.len()));
    }

    let mut cells = [None; NUM_CELLS];
    for (index, &code) in chars[..NUM_CELLS].iter().enumerate() {
        cells[index] = cell_from_code(code).ok_or(ParseError::InvalidCell(code, index))?;
    }

    let turn_code = chars[NUM_CELLS];
    let turn = Color::from_code(turn_code).ok_or(ParseError::InvalidTurn(turn_code))?;

    Ok(Board::from_parts(cells, turn))
}
