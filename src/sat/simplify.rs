#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause simplification under a literal known to be true.
//!
//! This is the one rewriting step every solver in the crate is built from.
//! It never touches its input: it returns a new formula in which
//!
//! - clauses containing the literal are dropped (they are satisfied),
//! - clauses containing its negation lose that literal,
//! - all other clauses are passed through, shared and in their original order.
//!
//! If removing the negation empties a clause, the literal contradicts the
//! formula and the result is a [`Conflict`].

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::sync::Arc;
use thiserror::Error;

/// Asserting the literal empties a clause of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("asserting {0} empties a clause")]
pub struct Conflict(pub Literal);

/// Simplifies `cnf` under the assumption that `lit` is true.
///
/// # Errors
///
/// [`Conflict`] if some clause consists only of occurrences of `-lit`.
pub fn simplify(cnf: &Cnf, lit: Literal) -> Result<Cnf, Conflict> {
    let complement = lit.negated();
    let mut clauses = Vec::with_capacity(cnf.len());

    for clause in cnf.shared() {
        if clause.contains(lit) {
            continue;
        }
        if clause.contains(complement) {
            let shortened = clause.without(complement);
            if shortened.is_empty() {
                return Err(Conflict(lit));
            }
            clauses.push(Arc::new(shortened));
        } else {
            clauses.push(Arc::clone(clause));
        }
    }

    Ok(Cnf::derived(clauses, cnf.num_vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_vecs(cnf: &Cnf) -> Vec<Vec<i32>> {
        cnf.iter()
            .map(|c| c.iter().map(|l| l.to_i32()).collect())
            .collect()
    }

    #[test]
    fn test_removes_satisfied_and_shortens_falsified() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3], vec![4, 5], vec![-1, -2, 1]]);
        let simplified = simplify(&cnf, Literal::from(1)).unwrap();
        assert_eq!(as_vecs(&simplified), vec![vec![3], vec![4, 5]]);
    }

    #[test]
    fn test_conflict_on_emptied_clause() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-2]]);
        assert_eq!(simplify(&cnf, Literal::from(2)), Err(Conflict(Literal::from(2))));
    }

    #[test]
    fn test_input_is_untouched() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3]]);
        let before = cnf.clone();
        let _ = simplify(&cnf, Literal::from(-1)).unwrap();
        assert_eq!(cnf, before);
    }

    #[test]
    fn test_unrelated_clauses_are_shared() {
        let cnf = Cnf::new(vec![vec![7, 8], vec![-1, 3]]);
        let simplified = simplify(&cnf, Literal::from(1)).unwrap();
        assert!(Arc::ptr_eq(&cnf.shared()[0], &simplified.shared()[0]));
        assert!(!Arc::ptr_eq(&cnf.shared()[1], &simplified.shared()[1]));
    }

    #[test]
    fn test_idempotent() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3], vec![-3, 4]]);
        let once = simplify(&cnf, Literal::from(-3)).unwrap();
        let twice = simplify(&once, Literal::from(-3)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_empty_clause_passes_through() {
        let cnf = Cnf::new(vec![vec![], vec![1]]);
        let simplified = simplify(&cnf, Literal::from(2)).unwrap();
        assert!(simplified.has_empty_clause());
    }
}
