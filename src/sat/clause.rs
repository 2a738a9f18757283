#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A clause is a disjunction of literals.
//!
//! Literal order is kept as given: DPLL branches on the literals of the first
//! clause in the order they were written. [`Clause::canonical`] produces the
//! sorted, duplicate-free form used where clauses are compared as sets.

use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;

/// Inline capacity of a clause. Most Sudoku clauses are binary.
pub const INLINE_LITERALS: usize = 4;

pub type LiteralStorage = SmallVec<[Literal; INLINE_LITERALS]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// The empty clause, which no assignment satisfies.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            literals: SmallVec::new_const(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The single literal of a unit clause.
    #[must_use]
    pub fn unit(&self) -> Option<Literal> {
        if self.is_unit() {
            Some(self.literals[0])
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    /// `true` if the clause holds some literal together with its negation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|&lit| self.literals.contains(&lit.negated()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Copy of this clause with every occurrence of `lit` dropped.
    #[must_use]
    pub fn without(&self, lit: Literal) -> Self {
        Self {
            literals: self.literals.iter().copied().filter(|&l| l != lit).collect(),
        }
    }

    /// Sorted, duplicate-free copy of this clause.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self {
            literals: self.literals.iter().copied().sorted_unstable().dedup().collect(),
        }
    }

    /// Resolves `self` and `other` on `pivot`, which must occur in `self`
    /// with its negation in `other`. Only `pivot` is removed from `self` and
    /// only its negation from `other`. The result is canonical.
    #[must_use]
    pub fn resolve(&self, other: &Self, pivot: Literal) -> Self {
        let complement = pivot.negated();
        Self {
            literals: self
                .literals
                .iter()
                .copied()
                .filter(|&l| l != pivot)
                .chain(other.literals.iter().copied().filter(|&l| l != complement))
                .sorted_unstable()
                .dedup()
                .collect(),
        }
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals.into_iter().map(Literal::from))
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied().map(Literal::from))
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(clause: &Clause) -> Vec<i32> {
        clause.iter().map(|l| l.to_i32()).collect()
    }

    #[test]
    fn test_new() {
        let clause = Clause::from(vec![1, 2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(!clause.is_unit());
        assert_eq!(clause[1], Literal::from(2));
    }

    #[test]
    fn test_unit() {
        assert_eq!(Clause::from(vec![-4]).unit(), Some(Literal::from(-4)));
        assert_eq!(Clause::from(vec![-4, 5]).unit(), None);
        assert_eq!(Clause::empty().unit(), None);
    }

    #[test]
    fn test_without_keeps_order() {
        let clause = Clause::from(vec![3, -1, 2, -1]);
        assert_eq!(lits(&clause.without(Literal::from(-1))), vec![3, 2]);
    }

    #[test]
    fn test_canonical() {
        let clause = Clause::from(vec![3, -1, 3, 2]);
        assert_eq!(lits(&clause.canonical()), vec![-1, 2, 3]);
    }

    #[test]
    fn test_resolve() {
        let a = Clause::from(vec![1, 2, 3]);
        let b = Clause::from(vec![-1, 3, 4]);
        assert_eq!(lits(&a.resolve(&b, Literal::from(1))), vec![2, 3, 4]);

        let unit = Clause::from(vec![5]);
        let neg = Clause::from(vec![-5]);
        assert!(unit.resolve(&neg, Literal::from(5)).is_empty());
    }

    #[test]
    fn test_resolve_keeps_the_other_side_of_a_tautology() {
        let tautology = Clause::from(vec![5, -5]);
        let other = Clause::from(vec![2, -5]);
        assert_eq!(lits(&tautology.resolve(&other, Literal::from(5))), vec![-5, 2]);

        let a = Clause::from(vec![2, -5]);
        let b = Clause::from(vec![5, -2]);
        assert_eq!(lits(&a.resolve(&b, Literal::from(-5))), vec![-2, 2]);
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::from(vec![1, -2, 2]).is_tautology());
        assert!(!Clause::from(vec![1, 2]).is_tautology());
    }
}
