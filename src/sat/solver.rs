//! Shared solver interface.
//!
//! All three procedures implement [`Solver`]: they take ownership of a
//! formula, decide it with [`Solver::solve`], and report what they did
//! through [`Solver::stats`]. [`Method`] names them for the command line and
//! dispatches to the right one.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::dp::Dp;
use crate::sat::dpll::Dpll;
use crate::sat::resolution::Resolution;
use clap::ValueEnum;
use core::fmt;

pub trait Solver {
    fn new(cnf: Cnf) -> Self
    where
        Self: Sized;

    fn solve(&mut self) -> SatResult;

    fn stats(&self) -> SolutionStats;
}

/// Verdict of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// The formula has a model. DPLL supplies it; DP and resolution only
    /// decide satisfiability and carry `None`.
    Satisfiable(Option<Assignment>),
    Unsatisfiable,
    /// A caller-imposed budget ran out before a verdict was reached.
    Unknown,
}

impl SatResult {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// `Some(true)` for SAT, `Some(false)` for UNSAT, `None` if undecided.
    #[must_use]
    pub const fn decided(&self) -> Option<bool> {
        match self {
            Self::Satisfiable(_) => Some(true),
            Self::Unsatisfiable => Some(false),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(Some(model)) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_model(self) -> Option<Assignment> {
        match self {
            Self::Satisfiable(model) => model,
            _ => None,
        }
    }
}

impl fmt::Display for SatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Satisfiable(_) => "SAT",
            Self::Unsatisfiable => "UNSAT",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Counters collected during a run. Fields a procedure has no notion of stay
/// at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branching literals tried (DPLL) or split assumptions made (DP).
    pub decisions: usize,
    /// Branches closed by a conflict.
    pub conflicts: usize,
    /// Literals assigned by unit propagation.
    pub propagations: usize,
    /// Deepest point of the search stack.
    pub max_depth: usize,
    /// Resolvents computed, including repeats.
    pub resolvents: usize,
    /// Saturation rounds completed by resolution.
    pub rounds: usize,
    /// Largest clause set held at once by resolution.
    pub peak_clauses: usize,
}

/// The three inference procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Method {
    /// Backtracking search with unit propagation.
    #[value(name = "DPLL")]
    Dpll,
    /// Variable splitting without propagation.
    #[value(name = "DP")]
    Dp,
    /// Saturation under binary resolution.
    #[value(name = "Resolution")]
    Resolution,
}

impl Method {
    /// Every method, in the order `--compare` runs them.
    pub const ALL: [Self; 3] = [Self::Dpll, Self::Dp, Self::Resolution];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dpll => "DPLL",
            Self::Dp => "DP",
            Self::Resolution => "Resolution",
        }
    }

    /// Runs this method on `cnf`. `resolution_limit` only applies to
    /// [`Method::Resolution`].
    #[must_use]
    pub fn run(self, cnf: Cnf, resolution_limit: Option<usize>) -> (SatResult, SolutionStats) {
        match self {
            Self::Dpll => run_solver(Dpll::new(cnf)),
            Self::Dp => run_solver(Dp::new(cnf)),
            Self::Resolution => {
                let mut solver = Resolution::new(cnf);
                if let Some(limit) = resolution_limit {
                    solver = solver.with_clause_limit(limit);
                }
                run_solver(solver)
            }
        }
    }
}

fn run_solver<S: Solver>(mut solver: S) -> (SatResult, SolutionStats) {
    let result = solver.solve();
    (result, solver.stats())
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
