//! Splitting procedure without unit propagation.
//!
//! Despite the name this is not the resolution-based variable elimination of
//! Davis and Putnam's 1960 paper. It splits on one variable at a time,
//! simplifying with the positive literal and then the negative one, and only
//! reports whether either branch reaches an empty formula. No model is kept.
//!
//! Variables are split in ascending order. A variable that no longer occurs
//! in the remaining clauses is skipped, since both of its branches would
//! leave the formula unchanged. Like [`crate::sat::dpll`], the search keeps
//! its frames on an explicit stack.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::simplify::simplify;
use crate::sat::solver::{SatResult, SolutionStats, Solver};
use log::{debug, trace};

#[derive(Debug, Clone)]
pub struct Dp {
    cnf: Cnf,
    /// Every variable of the input, ascending.
    symbols: Vec<Variable>,
    stats: SolutionStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Positive,
    Negative,
    Exhausted,
}

#[derive(Debug)]
struct Frame {
    cnf: Cnf,
    var: Variable,
    /// Index into `symbols` of the next candidate for the children.
    cursor: usize,
    phase: Phase,
}

enum Node {
    Satisfied,
    Refuted,
    Split(Frame),
}

impl Solver for Dp {
    fn new(cnf: Cnf) -> Self {
        let symbols = cnf.variables().into_iter().collect();
        Self {
            cnf,
            symbols,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> SatResult {
        self.stats = SolutionStats::default();

        let mut stack = match self.visit(self.cnf.clone(), 0) {
            Node::Satisfied => return self.satisfied(),
            Node::Refuted => return self.refuted(),
            Node::Split(frame) => vec![frame],
        };
        self.stats.max_depth = 1;

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let lit = match frame.phase {
                Phase::Positive => {
                    frame.phase = Phase::Negative;
                    Literal::new(frame.var, true)
                }
                Phase::Negative => {
                    frame.phase = Phase::Exhausted;
                    Literal::new(frame.var, false)
                }
                Phase::Exhausted => {
                    stack.pop();
                    continue;
                }
            };
            self.stats.decisions += 1;
            trace!("split {lit} at depth {depth}");

            let cursor = frame.cursor;
            let Ok(cnf) = simplify(&frame.cnf, lit) else {
                self.stats.conflicts += 1;
                continue;
            };

            match self.visit(cnf, cursor) {
                Node::Satisfied => return self.satisfied(),
                Node::Refuted => self.stats.conflicts += 1,
                Node::Split(child) => {
                    stack.push(child);
                    self.stats.max_depth = self.stats.max_depth.max(stack.len());
                }
            }
        }

        self.refuted()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dp {
    /// Applies the base cases to a fresh node, or picks its split variable.
    fn visit(&self, cnf: Cnf, cursor: usize) -> Node {
        if cnf.is_empty() {
            return Node::Satisfied;
        }
        if cnf.has_empty_clause() {
            return Node::Refuted;
        }

        let present = cnf.variable_set();
        let Some(offset) = self.symbols[cursor..]
            .iter()
            .position(|var| present.contains(var))
        else {
            // Out of variables with clauses still open.
            return Node::Refuted;
        };

        let index = cursor + offset;
        Node::Split(Frame {
            cnf,
            var: self.symbols[index],
            cursor: index + 1,
            phase: Phase::Positive,
        })
    }

    fn satisfied(&self) -> SatResult {
        debug!("DP satisfied the formula after {} splits", self.stats.decisions);
        SatResult::Satisfiable(None)
    }

    fn refuted(&self) -> SatResult {
        debug!(
            "DP refuted the formula after {} splits, {} conflicts",
            self.stats.decisions, self.stats.conflicts
        );
        SatResult::Unsatisfiable
    }
}

/// Decides `cnf` by splitting, returning `true` iff it is satisfiable.
#[must_use]
pub fn dp(cnf: &Cnf) -> bool {
    Dp::new(cnf.clone()).solve().is_sat()
}
