//! Errors surfaced to the command line.

use crate::sudoku::parser::FormatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The puzzle file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The puzzle file was read but is not a valid puzzle.
    #[error("{}: {source}", path.display())]
    Format { path: PathBuf, source: FormatError },

    /// The encoded formula could not be written out.
    #[error("failed to export DIMACS to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A directory walk turned up nothing to solve.
    #[error("no puzzle files found under {}", path.display())]
    NotAPuzzle { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_format_error_is_the_source() {
        let err = Error::Format {
            path: PathBuf::from("puzzle.txt"),
            source: FormatError::ExtraRow { line: 10 },
        };
        assert_eq!(
            err.to_string(),
            "puzzle.txt: unexpected content after the last row on line 10"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_a_puzzle_message() {
        let err = Error::NotAPuzzle {
            path: PathBuf::from("puzzles"),
        };
        assert_eq!(err.to_string(), "no puzzle files found under puzzles");
    }
}
