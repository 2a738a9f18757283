//! # sudoku-sat
//!
//! Encodes a 9x9 Sudoku puzzle as CNF and decides it with one or all of
//! three procedures: DPLL, DP splitting, and resolution.
//!
//! ```sh
//! # Solve with DPLL and print the completed grid
//! sudoku-sat --input puzzle.sudoku --method DPLL --print-solution
//!
//! # Run all three procedures and compare their verdicts and timings
//! sudoku-sat --input puzzle.sudoku --compare --resolution-limit 200000
//!
//! # Solve every puzzle in a directory, exporting each formula as DIMACS
//! sudoku-sat --input puzzles/ --method DP --export-dimacs
//! ```
//!
//! Logging goes through `env_logger`: `--debug` enables debug output and
//! `RUST_LOG` overrides the filter entirely.

use clap::Parser;
use command_line::cli::{Cli, run};

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in `--stats`.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
