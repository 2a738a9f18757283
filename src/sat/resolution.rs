//! Refutation by saturating the clause set under binary resolution.
//!
//! Clauses are handled as sets here: each is sorted and deduplicated before it
//! enters the working set, and the working set holds every clause once. A
//! round resolves every pair of clauses on every complementary literal pair
//! between them. Deriving the empty clause proves the formula unsatisfiable;
//! a round that yields nothing new means the closure is saturated and the
//! formula is satisfiable.
//!
//! Pairs are found through an occurrence index (literal to clause positions)
//! rather than by testing all pairs, which yields the same resolvents. The
//! only pair with an empty resolvent is two complementary units, so those are
//! checked before each round's resolvents are computed.
//!
//! Tautologies are satisfied by every assignment, so tautological input
//! clauses never enter the working set and tautological resolvents are
//! dropped as soon as they are formed.
//!
//! The working set can grow quadratically per round. On a full Sudoku
//! encoding that is far beyond practical limits; [`Resolution::with_clause_limit`]
//! lets the caller bound it.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::solver::{SatResult, SolutionStats, Solver};
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone)]
pub struct Resolution {
    cnf: Cnf,
    clause_limit: Option<usize>,
    stats: SolutionStats,
}

/// The working set: clauses in insertion order, a membership set, and the
/// positions of every literal's occurrences in ascending order.
#[derive(Debug, Default)]
struct ClauseSet {
    clauses: Vec<Clause>,
    members: FxHashSet<Clause>,
    occurrences: FxHashMap<Literal, Vec<usize>>,
}

impl ClauseSet {
    fn insert(&mut self, clause: Clause) -> bool {
        if self.members.contains(&clause) {
            return false;
        }
        let index = self.clauses.len();
        for &lit in &clause {
            self.occurrences.entry(lit).or_default().push(index);
        }
        self.members.insert(clause.clone());
        self.clauses.push(clause);
        true
    }

    fn len(&self) -> usize {
        self.clauses.len()
    }

    fn has_complementary_units(&self) -> bool {
        self.clauses
            .iter()
            .filter_map(Clause::unit)
            .any(|lit| self.members.contains(&Clause::new([lit.negated()])))
    }

    /// Positions after `index` of clauses containing `lit`.
    fn occurrences_after(&self, lit: Literal, index: usize) -> &[usize] {
        match self.occurrences.get(&lit) {
            Some(positions) => {
                let start = positions.partition_point(|&j| j <= index);
                &positions[start..]
            }
            None => &[],
        }
    }
}

enum Round {
    Refuted,
    Saturated,
    Grew(Vec<Clause>),
}

impl Solver for Resolution {
    fn new(cnf: Cnf) -> Self {
        Self {
            cnf,
            clause_limit: None,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> SatResult {
        self.stats = SolutionStats::default();

        if self.cnf.has_empty_clause() {
            debug!("resolution input already contains the empty clause");
            return SatResult::Unsatisfiable;
        }

        let mut working = ClauseSet::default();
        for clause in self.cnf.iter().filter(|clause| !clause.is_tautology()) {
            working.insert(clause.canonical());
        }
        self.stats.peak_clauses = working.len();

        loop {
            match self.round(&working) {
                Round::Refuted => {
                    debug!(
                        "resolution derived the empty clause in round {}",
                        self.stats.rounds
                    );
                    return SatResult::Unsatisfiable;
                }
                Round::Saturated => {
                    debug!(
                        "resolution saturated at {} clauses after {} rounds",
                        working.len(),
                        self.stats.rounds
                    );
                    return SatResult::Satisfiable(None);
                }
                Round::Grew(fresh) => {
                    for clause in fresh {
                        working.insert(clause);
                    }
                    self.stats.peak_clauses = working.len();
                    debug!(
                        "resolution round {} grew the working set to {} clauses",
                        self.stats.rounds,
                        working.len()
                    );
                }
            }

            if self.clause_limit.is_some_and(|limit| working.len() > limit) {
                debug!("resolution stopped at {} clauses", working.len());
                return SatResult::Unknown;
            }
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Resolution {
    /// Gives up with [`SatResult::Unknown`] once the working set holds more
    /// than `limit` clauses.
    #[must_use]
    pub fn with_clause_limit(mut self, limit: usize) -> Self {
        self.clause_limit = Some(limit);
        self
    }

    fn round(&mut self, working: &ClauseSet) -> Round {
        self.stats.rounds += 1;

        if working.has_complementary_units() {
            return Round::Refuted;
        }

        let mut pending = FxHashSet::default();
        let mut fresh = Vec::new();

        for (i, ci) in working.clauses.iter().enumerate() {
            for &lit in ci {
                for &j in working.occurrences_after(lit.negated(), i) {
                    let resolvent = ci.resolve(&working.clauses[j], lit);
                    self.stats.resolvents += 1;

                    if resolvent.is_empty() {
                        return Round::Refuted;
                    }
                    if resolvent.is_tautology() {
                        continue;
                    }
                    if !working.members.contains(&resolvent) && pending.insert(resolvent.clone()) {
                        trace!("resolvent {:?}", resolvent.literals());
                        fresh.push(resolvent);
                    }
                }
            }
        }

        if fresh.is_empty() {
            Round::Saturated
        } else {
            Round::Grew(fresh)
        }
    }
}

/// Decides `cnf` by resolution, returning `true` iff it is satisfiable.
#[must_use]
pub fn resolution(cnf: &Cnf) -> bool {
    Resolution::new(cnf.clone()).solve().is_sat()
}
