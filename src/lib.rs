//! Sudoku as propositional satisfiability.
//!
//! A 9x9 puzzle is encoded as a CNF formula over 729 variables and decided
//! by one of three procedures: DPLL search with unit propagation, DP
//! splitting, or saturation under resolution.

/// Errors surfaced by the file-facing parts of the crate.
pub mod error;

/// The `sat` module holds the formula types and the three procedures.
pub mod sat;

/// The `sudoku` module holds the grid, its encoding and the puzzle file format.
pub mod sudoku;
