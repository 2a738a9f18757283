use crate::sat::cnf::Cnf;

// Exhaustive check used as the oracle in property tests.
pub(crate) fn solve_brute_force(cnf: &Cnf) -> bool {
    let num_vars = cnf.num_vars;
    assert!(num_vars <= 16); // just for safety

    let value = |assignment: u32, var: u32| assignment & (1 << (var - 1)) != 0;

    'search: for assignment in 0..1u32 << num_vars {
        'clauses: for clause in cnf.iter() {
            for lit in clause {
                if value(assignment, lit.variable()) == lit.polarity() {
                    continue 'clauses;
                }
            }
            // this clause is falsified, so the assignment is bogus
            continue 'search;
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_sat() {
        assert!(solve_brute_force(&Cnf::new(vec![vec![1, 2], vec![-1]])));
        assert!(solve_brute_force(&Cnf::default()));
    }

    #[test]
    fn solve_unsat() {
        assert!(!solve_brute_force(&Cnf::new(vec![vec![1, 2], vec![-1], vec![-2]])));
        assert!(!solve_brute_force(&Cnf::new(vec![vec![1], vec![]])));
    }
}
