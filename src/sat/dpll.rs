//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) backtracking solver.
//!
//! Every node of the search runs unit propagation to fixpoint on its own copy
//! of the formula and then:
//!
//! 1.  **Conflict:** propagation failed, so the node is closed and the search
//!     backtracks.
//! 2.  **Model:** no clauses remain, so the literals assigned along the path
//!     form a model.
//! 3.  **Branch:** otherwise the first remaining clause is chosen and each of
//!     its literals is tried in turn as a decision. Some literal of that clause
//!     is true in any model, so exhausting them all without success proves the
//!     node unsatisfiable. This is wider than splitting one variable into
//!     true/false, and it visits clauses in encoding order with no heuristic.
//!
//! The search runs on an explicit stack instead of the call stack, so formula
//! size does not bound recursion depth. Each frame owns its simplified formula
//! and assignment; backtracking is popping a frame.

use crate::sat::assignment::Assignment;
use crate::sat::clause::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::propagation::propagate;
use crate::sat::simplify::simplify;
use crate::sat::solver::{SatResult, SolutionStats, Solver};
use log::{debug, trace};

#[derive(Debug, Clone)]
pub struct Dpll {
    cnf: Cnf,
    stats: SolutionStats,
}

/// A node whose first clause is being branched on.
#[derive(Debug)]
struct Frame {
    cnf: Cnf,
    assignment: Assignment,
    choices: LiteralStorage,
    next: usize,
}

enum Node {
    Conflict,
    Model(Assignment),
    Branch(Frame),
}

impl Solver for Dpll {
    fn new(cnf: Cnf) -> Self {
        Self {
            cnf,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> SatResult {
        self.stats = SolutionStats::default();
        let root = Assignment::new(self.cnf.num_vars);

        let mut stack = match self.expand(self.cnf.clone(), root) {
            Node::Conflict => return self.refuted(),
            Node::Model(model) => return self.satisfied(model),
            Node::Branch(frame) => vec![frame],
        };
        self.stats.max_depth = 1;

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let Some(&lit) = frame.choices.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            self.stats.decisions += 1;
            trace!("decide {lit} at depth {depth}");

            let mut assignment = frame.assignment.clone();
            assignment.assign(lit);
            let Ok(cnf) = simplify(&frame.cnf, lit) else {
                self.stats.conflicts += 1;
                continue;
            };

            match self.expand(cnf, assignment) {
                Node::Conflict => {}
                Node::Model(model) => return self.satisfied(model),
                Node::Branch(child) => {
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

impl Dpll {
    /// Propagates a fresh node and classifies it.
    fn expand(&mut self, cnf: Cnf, assignment: Assignment) -> Node {
        let before = assignment.len();
        match propagate(cnf, assignment) {
            Err(conflict) => {
                self.stats.conflicts += 1;
                trace!("{conflict}");
                Node::Conflict
            }
            Ok((cnf, assignment)) => {
                self.stats.propagations += assignment.len() - before;
                match cnf.first() {
                    None => Node::Model(assignment),
                    Some(clause) => Node::Branch(Frame {
                        choices: clause.literals().iter().copied().collect(),
                        cnf,
                        assignment,
                        next: 0,
                    }),
                }
            }
        }
    }

    fn satisfied(&self, model: Assignment) -> SatResult {
        debug!(
            "DPLL found a model of {} literals after {} decisions",
            model.len(),
            self.stats.decisions
        );
        SatResult::Satisfiable(Some(model))
    }

    fn refuted(&self) -> SatResult {
        debug!(
            "DPLL exhausted the search after {} decisions, {} conflicts",
            self.stats.decisions, self.stats.conflicts
        );
        SatResult::Unsatisfiable
    }
}

/// Decides `cnf` by DPLL, returning a model or `None` if it is unsatisfiable.
#[must_use]
pub fn dpll(cnf: &Cnf) -> Option<Assignment> {
    Dpll::new(cnf.clone()).solve().into_model()
}
