#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conjunctive normal form formulas.
//!
//! A [`Cnf`] is an ordered list of clauses. Clauses sit behind [`Arc`] so that
//! simplifying a formula only allocates the clauses it actually shortens; the
//! rest are shared with the parent formula. Every branch of a search owns its
//! own `Cnf` value, so abandoning a branch is just dropping it.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Arc<Clause>>,
    /// Highest variable index mentioned by the formula it was built from.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from anything that iterates over clauses of signed
    /// integers, e.g. `Vec<Vec<i32>>`.
    pub fn new<J, I>(clauses: I) -> Self
    where
        J: IntoIterator<Item = i32>,
        I: IntoIterator<Item = J>,
    {
        Self::from_clauses(
            clauses
                .into_iter()
                .map(|c| Clause::new(c.into_iter().map(Literal::from))),
        )
    }

    pub fn from_clauses(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::from_shared(clauses.into_iter().map(Arc::new).collect())
    }

    pub(crate) fn from_shared(clauses: Vec<Arc<Clause>>) -> Self {
        let num_vars = clauses
            .iter()
            .flat_map(|c| c.iter())
            .map(|l| l.variable() as usize)
            .max()
            .unwrap_or(0);

        Self { clauses, num_vars }
    }

    /// Builds a derived formula that keeps the variable range of its parent.
    pub(crate) const fn derived(clauses: Vec<Arc<Clause>>, num_vars: usize) -> Self {
        Self { clauses, num_vars }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is vacuously satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().map(AsRef::as_ref)
    }

    pub(crate) fn shared(&self) -> &[Arc<Clause>] {
        &self.clauses
    }

    #[must_use]
    pub fn first(&self) -> Option<&Clause> {
        self.clauses.first().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.iter().any(Clause::is_empty)
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.iter().map(Clause::len).sum()
    }

    /// Variables mentioned by the remaining clauses, in ascending order.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.iter()
            .flat_map(|c| c.iter().map(|l| l.variable()))
            .collect()
    }

    /// Unordered set of variables mentioned by the remaining clauses.
    #[must_use]
    pub fn variable_set(&self) -> FxHashSet<Variable> {
        self.iter()
            .flat_map(|c| c.iter().map(|l| l.variable()))
            .collect()
    }

    /// Checks that every clause has at least one literal made true by
    /// `assignment`.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        self.iter()
            .all(|clause| clause.iter().any(|&lit| assignment.contains(lit)))
    }

    pub fn push(&mut self, clause: Clause) {
        self.num_vars = clause
            .iter()
            .map(|l| l.variable() as usize)
            .fold(self.num_vars, usize::max);
        self.clauses.push(Arc::new(clause));
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::from_clauses(iter)
    }
}

/// DIMACS text: a `p cnf` header followed by one zero-terminated clause per line.
impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.len())?;
        for clause in self.iter() {
            for lit in clause {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counts_variables() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![3], vec![-7, 2]]);
        assert_eq!(cnf.len(), 3);
        assert_eq!(cnf.num_vars, 7);
        assert_eq!(cnf.num_literals(), 5);
        assert_eq!(cnf.variables().into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 7]);
    }

    #[test]
    fn test_empty_clause_detection() {
        let mut cnf = Cnf::new(vec![vec![1, 2]]);
        assert!(!cnf.has_empty_clause());
        cnf.push(Clause::empty());
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1]]);

        let mut good = Assignment::new(cnf.num_vars);
        good.assign(Literal::from(-1));
        good.assign(Literal::from(2));
        assert!(cnf.verify(&good));

        let mut bad = Assignment::new(cnf.num_vars);
        bad.assign(Literal::from(1));
        assert!(!cnf.verify(&bad));
    }

    #[test]
    fn test_dimacs_display() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2]]);
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }
}
