#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku puzzles: the grid, its propositional encoding, and the file format.

pub mod board;
pub mod encoder;
pub mod parser;
