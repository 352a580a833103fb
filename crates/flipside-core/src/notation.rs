use crate::types::Coord;
use thiserror::Error;

const FILES: &str = "abcdefgh";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move notation")]
    Invalid,
}

/// Two-character algebraic form: file letter then rank digit, e.g. `d3`
/// for row 2, column 3.
pub fn move_to_notation(coord: Coord) -> String {
    let file = FILES.as_bytes()[coord.col as usize] as char;
    let rank = char::from(b'1' + coord.row);
    format!("{file}{rank}")
}

/// Inverse of [`move_to_notation`]; the file letter is case-insensitive.
pub fn parse_notation(input: &str) -> Result<Coord, NotationError> {
    let mut chars = input.chars();
    let file = chars.next().ok_or(NotationError::Invalid)?;
    let rank = chars.next().ok_or(NotationError::Invalid)?;
    if chars.next().is_some() {
        return Err(NotationError::Invalid);
    }

    let col = FILES
        .find(file.to_ascii_lowercase())
        .ok_or(NotationError::Invalid)?;
    let row = rank
        .to_digit(10)
        .filter(|&d| (1..=8).contains(&d))
        .ok_or(NotationError::Invalid)?
        - 1;

    Ok(Coord::new_unchecked(row as u8, col as u8))
}
