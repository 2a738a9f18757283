#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation to fixpoint.
//!
//! Each pass collects the unit clauses of the current formula in clause
//! order and asserts their literals one by one, simplifying after every new
//! assignment. Passes repeat until one assigns nothing new. A unit whose
//! negation is already assigned ends propagation with a [`Conflict`], as does
//! a simplification that empties a clause.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::simplify::{Conflict, simplify};

/// Propagates every unit clause of `cnf`, extending `assignment`.
///
/// # Errors
///
/// [`Conflict`] if two units force opposite values or a propagated literal
/// empties a clause.
pub fn propagate(cnf: Cnf, assignment: Assignment) -> Result<(Cnf, Assignment), Conflict> {
    let mut cnf = cnf;
    let mut assignment = assignment;

    loop {
        let units = unit_literals(&cnf);
        let mut changed = false;

        for lit in units {
            if assignment.contains(lit.negated()) {
                return Err(Conflict(lit));
            }
            if assignment.assign(lit) {
                cnf = simplify(&cnf, lit)?;
                changed = true;
            }
        }

        if !changed {
            return Ok((cnf, assignment));
        }
    }
}

/// Literals of the unit clauses of `cnf`, in clause order.
#[must_use]
pub fn unit_literals(cnf: &Cnf) -> Vec<Literal> {
    cnf.iter().filter_map(|c| c.unit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(clauses: Vec<Vec<i32>>) -> Result<(Cnf, Assignment), Conflict> {
        let cnf = Cnf::new(clauses);
        let assignment = Assignment::new(cnf.num_vars);
        propagate(cnf, assignment)
    }

    #[test]
    fn test_chain_to_fixpoint() {
        let (cnf, assignment) = run(vec![vec![1], vec![-1, 2], vec![-2, 3], vec![3, 4, 5], vec![6, 7]]).unwrap();
        assert_eq!(
            assignment.literals(),
            &[Literal::from(1), Literal::from(2), Literal::from(3)]
        );
        assert_eq!(cnf.len(), 1);
        assert!(unit_literals(&cnf).is_empty());
    }

    #[test]
    fn test_no_units_is_noop() {
        let (cnf, assignment) = run(vec![vec![1, 2], vec![-1, -2]]).unwrap();
        assert_eq!(cnf.len(), 2);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_toy_unsat() {
        // {1, 2}, {-1}, {-2}: -1 forces 2, which empties {-2}.
        assert!(run(vec![vec![1, 2], vec![-1], vec![-2]]).is_err());
    }

    #[test]
    fn test_complementary_units() {
        assert!(run(vec![vec![3], vec![-3]]).is_err());
    }

    #[test]
    fn test_respects_existing_assignment() {
        let cnf = Cnf::new(vec![vec![1], vec![2, 3]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        assignment.assign(Literal::from(-1));
        assert_eq!(propagate(cnf, assignment), Err(Conflict(Literal::from(1))));
    }

    #[test]
    fn test_duplicate_units_assign_once() {
        let (cnf, assignment) = run(vec![vec![4], vec![4], vec![-4, 5, 6]]).unwrap();
        assert_eq!(assignment.len(), 1);
        assert_eq!(cnf.len(), 1);
    }
}
