//! Reads puzzle files.
//!
//! A puzzle is nine lines of text. Each line's first nine characters are the
//! row's cells, read by position: `1` to `9` is a clue and anything else is a
//! blank. [`ParseMode::Strict`] narrows the accepted blank markers and
//! rejects short rows; [`ParseMode::Lenient`] accepts whatever is there.

use crate::error;
use crate::sudoku::board::{Board, SIZE};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Characters [`ParseMode::Strict`] accepts as a blank cell.
pub const BLANK_MARKERS: [char; 6] = ['0', '.', '_', '-', '*', ' '];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected 9 rows, found {found}")]
    MissingRows { found: usize },

    #[error("unexpected content after the last row on line {line}")]
    ExtraRow { line: usize },

    #[error("line {line} has {length} cells, expected 9")]
    ShortRow { line: usize, length: usize },

    #[error("line {line}, column {column}: {found:?} is neither a digit nor a blank marker")]
    InvalidCharacter {
        line: usize,
        column: usize,
        found: char,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// Parses puzzle text into a [`Board`]. Lines and columns in errors are
/// 1-indexed.
///
/// # Errors
///
/// Any [`FormatError`] allowed by `mode`.
pub fn parse_puzzle(text: &str, mode: ParseMode) -> Result<Board, FormatError> {
    let mut lines = text.lines();
    let mut board = Board::empty();

    for row in 1..=SIZE {
        let Some(line) = lines.next() else {
            return Err(FormatError::MissingRows { found: row - 1 });
        };
        parse_row(&mut board, row, line, mode)?;
    }

    if let Some((index, _)) = lines
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())
    {
        return Err(FormatError::ExtraRow {
            line: SIZE + index + 1,
        });
    }

    Ok(board)
}

fn parse_row(
    board: &mut Board,
    row: usize,
    line: &str,
    mode: ParseMode,
) -> Result<(), FormatError> {
    let cells: Vec<char> = line.chars().take(SIZE).collect();

    if mode == ParseMode::Strict && cells.len() < SIZE {
        return Err(FormatError::ShortRow {
            line: row,
            length: cells.len(),
        });
    }

    for (index, &ch) in cells.iter().enumerate() {
        match ch.to_digit(10) {
            Some(digit @ 1..=9) => board.set(row, index + 1, digit as u8),
            _ if mode == ParseMode::Lenient || BLANK_MARKERS.contains(&ch) => {}
            _ => {
                return Err(FormatError::InvalidCharacter {
                    line: row,
                    column: index + 1,
                    found: ch,
                });
            }
        }
    }
    Ok(())
}

/// Reads and parses the puzzle at `path`.
///
/// # Errors
///
/// [`error::Error::Io`] if the file cannot be read, [`error::Error::Format`] if its
/// contents are not a puzzle.
pub fn parse_puzzle_file(path: &Path, mode: ParseMode) -> error::Result<Board> {
    let text = fs::read_to_string(path).map_err(|source| error::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_puzzle(&text, mode).map_err(|source| error::Error::Format {
        path: path.to_path_buf(),
        source,
    })
}
