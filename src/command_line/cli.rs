#![allow(clippy::cast_precision_loss)]

use clap::{CommandFactory, Parser};
use itertools::Itertools;
use log::{error, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_sat::error::{Error, Result};
use sudoku_sat::sat::assignment::Assignment;
use sudoku_sat::sat::cnf::Cnf;
use sudoku_sat::sat::solver::{Method, SatResult, SolutionStats};
use sudoku_sat::sudoku::board::Board;
use sudoku_sat::sudoku::encoder::encode;
use sudoku_sat::sudoku::parser::{ParseMode, parse_puzzle_file};
use tikv_jemalloc_ctl::{epoch, stats};

/// File extensions picked up when `--input` names a directory.
const PUZZLE_EXTENSIONS: [&str; 2] = ["sudoku", "txt"];

/// Solve Sudoku puzzles through their CNF encoding.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug, Default)]
#[command(
    name = "sudoku-sat",
    version,
    about = "Solve Sudoku puzzles with DPLL, DP splitting, or resolution"
)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct Cli {
    /// Puzzle file, or a directory searched for `.sudoku` and `.txt` puzzles.
    #[arg(long, required_unless_present = "completions")]
    pub(crate) input: Option<PathBuf>,

    /// Procedure to run.
    #[arg(long, value_enum, ignore_case = true)]
    pub(crate) method: Option<Method>,

    /// Run every procedure on the same formula and compare them.
    /// Takes precedence over `--method`.
    #[arg(long, default_value_t = false)]
    pub(crate) compare: bool,

    /// Only accept `0 . _ - *` and space as blanks, and require full rows.
    #[arg(long, default_value_t = false)]
    pub(crate) strict: bool,

    /// Give up on resolution once its working set exceeds this many clauses.
    #[arg(long, value_name = "CLAUSES")]
    pub(crate) resolution_limit: Option<usize>,

    /// Print the decoded grid when DPLL finds a model.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Check a DPLL model against the formula and the Sudoku rules.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    /// Print problem and search statistics for each procedure.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Write the encoded formula as DIMACS to `<input>.cnf`.
    #[arg(short, long, default_value_t = false)]
    pub(crate) export_dimacs: bool,

    /// Enable debug logging. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print a completion script for the given shell and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub(crate) completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Procedures to run, or `None` if neither `--method` nor `--compare`
    /// was given.
    pub(crate) fn methods(&self) -> Option<Vec<Method>> {
        if self.compare {
            if let Some(method) = self.method {
                warn!("--compare runs every method; ignoring --method {method}");
            }
            return Some(Method::ALL.to_vec());
        }
        self.method.map(|method| vec![method])
    }

    const fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// What one procedure concluded on one puzzle.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) method: Method,
    pub(crate) result: SatResult,
    pub(crate) elapsed: Duration,
}

/// Entry point of the command line once arguments are parsed.
///
/// # Errors
///
/// Unreadable or malformed puzzles and failed DIMACS exports.
pub(crate) fn run(cli: &Cli) -> Result<()> {
    // clap only accepts a missing --input alongside --completions.
    let (None, Some(input)) = (cli.completions, cli.input.as_deref()) else {
        if let Some(shell) = cli.completions {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
        return Ok(());
    };

    let Some(methods) = cli.methods() else {
        println!("Please specify --method or --compare");
        return Ok(());
    };

    if input.is_dir() {
        solve_dir(input, &methods, cli).map(|_| ())
    } else {
        solve_puzzle(input, &methods, cli).map(|_| ())
    }
}

/// Solves every puzzle file beneath `path`, in file name order.
///
/// A file that fails to parse is reported and skipped.
///
/// # Errors
///
/// [`Error::NotAPuzzle`] if no file under `path` could be solved, or the
/// first failed DIMACS export.
pub(crate) fn solve_dir(
    path: &Path,
    methods: &[Method],
    cli: &Cli,
) -> Result<Vec<(PathBuf, Vec<Outcome>)>> {
    let mut solved = Vec::new();

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(core::result::Result::ok)
    {
        let file_path = entry.path();
        if !entry.file_type().is_file()
            || file_path
                .extension()
                .is_none_or(|ext| !PUZZLE_EXTENSIONS.iter().any(|p| ext == *p))
        {
            continue;
        }

        match solve_puzzle(file_path, methods, cli) {
            Ok(outcomes) => solved.push((file_path.to_path_buf(), outcomes)),
            Err(e @ (Error::Io { .. } | Error::Format { .. })) => {
                error!("skipping {e}");
            }
            Err(e) => return Err(e),
        }
    }

    if solved.is_empty() {
        return Err(Error::NotAPuzzle {
            path: path.to_path_buf(),
        });
    }
    Ok(solved)
}

/// Parses, encodes and solves one puzzle with each of `methods`.
///
/// # Errors
///
/// If the puzzle cannot be read or parsed, or the DIMACS export fails.
pub(crate) fn solve_puzzle(path: &Path, methods: &[Method], cli: &Cli) -> Result<Vec<Outcome>> {
    let time = Instant::now();
    let board = parse_puzzle_file(path, cli.parse_mode())?;
    let cnf = encode(&board);
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    println!("Parsed Sudoku:\n{board}");
    info!("{} clues, parsed and encoded in {parse_time:?}", board.num_clues());

    if cli.export_dimacs {
        let dimacs_path = export_dimacs(path, &cnf)?;
        println!("DIMACS written to: {}", dimacs_path.display());
    }

    let mut outcomes = Vec::with_capacity(methods.len());
    for &method in methods {
        println!("\n[*] Running {method}...");
        let start = Instant::now();
        let (result, solver_stats) = method.run(cnf.clone(), cli.resolution_limit);
        let elapsed = start.elapsed();

        println!("[+] {method}: {result}");
        println!(
            "[!] {method} time taken: {:.4} seconds",
            elapsed.as_secs_f64()
        );

        if let Some(model) = result.model() {
            if cli.verify {
                verify_solution(&cnf, &board, model);
            }
            if cli.print_solution {
                println!("Solution:\n{}", Board::decode(model));
            }
        }

        if cli.stats {
            print_stats(method, elapsed, &cnf, &solver_stats);
        }

        outcomes.push(Outcome {
            method,
            result,
            elapsed,
        });
    }

    if outcomes.len() > 1 {
        print_comparison(&outcomes);
        check_agreement(&outcomes);
    }
    Ok(outcomes)
}

/// Path the DIMACS export of `input` is written to.
pub(crate) fn dimacs_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".cnf");
    PathBuf::from(name)
}

fn export_dimacs(input: &Path, cnf: &Cnf) -> Result<PathBuf> {
    let path = dimacs_path(input);
    std::fs::write(&path, cnf.to_string()).map_err(|source| Error::Export {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Checks a model against both the formula and the grid rules. Prints the
/// outcome; a failure is logged rather than fatal.
pub(crate) fn verify_solution(cnf: &Cnf, puzzle: &Board, model: &Assignment) -> bool {
    let grid = Board::decode(model);
    let ok = cnf.verify(model) && grid.is_valid_solution() && grid.respects(puzzle);
    println!("Verified: {ok:?}");
    if !ok {
        error!("model failed verification");
    }
    ok
}

/// `false` if two procedures reached opposite verdicts. Undecided runs are
/// left out.
pub(crate) fn check_agreement(outcomes: &[Outcome]) -> bool {
    let decided = outcomes
        .iter()
        .filter_map(|o| o.result.decided().map(|sat| (o.method, sat)));

    let mut agree = true;
    for ((a, a_sat), (b, b_sat)) in decided.tuple_combinations() {
        if a_sat != b_sat {
            error!(
                "{a} and {b} disagree: {}",
                if a_sat { "SAT vs UNSAT" } else { "UNSAT vs SAT" }
            );
            agree = false;
        }
    }
    agree
}

/// Memory figures in MiB from jemalloc: allocated, then resident.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics for one run.
pub(crate) fn print_stats(method: Method, elapsed: Duration, cnf: &Cnf, s: &SolutionStats) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("===================[ {method:^10} Search Statistics ]===================");
    match method {
        Method::Dpll | Method::Dp => {
            stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
            stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
            stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
            stat_line("Max depth", s.max_depth);
        }
        Method::Resolution => {
            stat_line_with_rate("Resolvents", s.resolvents, elapsed_secs);
            stat_line("Rounds", s.rounds);
            stat_line("Peak clauses", s.peak_clauses);
        }
    }
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("======================================================================");
}

fn print_comparison(outcomes: &[Outcome]) {
    println!("\n=========================[ Comparison ]===============================");
    for outcome in outcomes {
        stat_line(
            &format!("{} ({})", outcome.method, outcome.result),
            format!("{:.4} s", outcome.elapsed.as_secs_f64()),
        );
    }
    println!("======================================================================");
}
