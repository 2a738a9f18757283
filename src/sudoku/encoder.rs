//! Propositional encoding of a 9x9 puzzle.
//!
//! Variable `var(r, c, d) = 81(r - 1) + 9(c - 1) + d` is true iff cell
//! `(r, c)` holds digit `d`, for a total of 729 variables. Clauses come out
//! in a fixed order, which the DPLL branching order depends on:
//!
//! 1. at least one digit per cell, for every cell;
//! 2. at most one digit per cell, for every cell;
//! 3. each digit exactly once per row, then per column, then per block;
//! 4. a unit clause per clue.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sudoku::board::{BLOCK_SIZE, Board, SIZE};
use itertools::Itertools;
use log::debug;

/// Number of variables in the encoding.
pub const NUM_VARIABLES: usize = SIZE * SIZE * SIZE;

/// The proposition "cell `(row, col)` holds `digit`", all 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellDigit {
    pub row: usize,
    pub col: usize,
    pub digit: usize,
}

impl CellDigit {
    #[must_use]
    pub const fn new(row: usize, col: usize, digit: usize) -> Self {
        Self { row, col, digit }
    }

    /// Variable number of this proposition, in `1..=729`.
    #[must_use]
    pub const fn variable(self) -> Variable {
        ((self.row - 1) * SIZE * SIZE + (self.col - 1) * SIZE + self.digit) as Variable
    }

    /// Inverse of [`CellDigit::variable`]; `None` outside `1..=729`.
    #[must_use]
    pub const fn from_variable(var: Variable) -> Option<Self> {
        let var = var as usize;
        if var == 0 || var > NUM_VARIABLES {
            return None;
        }
        let index = var - 1;
        Some(Self {
            row: index / (SIZE * SIZE) + 1,
            col: (index / SIZE) % SIZE + 1,
            digit: index % SIZE + 1,
        })
    }

    /// The positive literal of this proposition.
    #[must_use]
    pub fn literal(self) -> Literal {
        Literal::new(self.variable(), true)
    }
}

/// Encodes `board` so that its models are exactly the completions of the
/// puzzle.
#[must_use]
pub fn encode(board: &Board) -> Cnf {
    let mut clauses = Vec::new();

    cell_clauses(&mut clauses);
    unit_clauses(&mut clauses, row_units());
    unit_clauses(&mut clauses, column_units());
    unit_clauses(&mut clauses, block_units());
    clauses.extend(board.clues().map(|clue| Clause::new([clue.literal()])));

    let mut cnf = Cnf::from_clauses(clauses);
    cnf.num_vars = NUM_VARIABLES;
    debug!(
        "encoded {} clues into {} clauses over {} variables",
        board.num_clues(),
        cnf.len(),
        cnf.num_vars
    );
    cnf
}

fn at_least_one(cells: &[CellDigit]) -> Clause {
    Clause::new(cells.iter().map(|cell| cell.literal()))
}

fn at_most_one(cells: &[CellDigit]) -> impl Iterator<Item = Clause> + '_ {
    cells
        .iter()
        .tuple_combinations()
        .map(|(a, b)| Clause::new([a.literal().negated(), b.literal().negated()]))
}

/// Every cell's at-least-one clause first, then every cell's pairwise
/// at-most-one clauses.
fn cell_clauses(clauses: &mut Vec<Clause>) {
    let cells: Vec<Vec<CellDigit>> = (1..=SIZE)
        .cartesian_product(1..=SIZE)
        .map(|(row, col)| (1..=SIZE).map(|d| CellDigit::new(row, col, d)).collect())
        .collect();

    clauses.extend(cells.iter().map(|cell| at_least_one(cell)));
    for cell in &cells {
        clauses.extend(at_most_one(cell));
    }
}

/// Exactly-one constraints, one group at a time.
fn unit_clauses(clauses: &mut Vec<Clause>, groups: impl Iterator<Item = Vec<CellDigit>>) {
    for group in groups {
        clauses.push(at_least_one(&group));
        clauses.extend(at_most_one(&group));
    }
}

fn row_units() -> impl Iterator<Item = Vec<CellDigit>> {
    (1..=SIZE).cartesian_product(1..=SIZE).map(|(row, digit)| {
        (1..=SIZE)
            .map(|col| CellDigit::new(row, col, digit))
            .collect()
    })
}

fn column_units() -> impl Iterator<Item = Vec<CellDigit>> {
    (1..=SIZE).cartesian_product(1..=SIZE).map(|(col, digit)| {
        (1..=SIZE)
            .map(|row| CellDigit::new(row, col, digit))
            .collect()
    })
}

fn block_units() -> impl Iterator<Item = Vec<CellDigit>> {
    (0..SIZE).cartesian_product(1..=SIZE).map(|(block, digit)| {
        let top = (block / BLOCK_SIZE) * BLOCK_SIZE;
        let left = (block % BLOCK_SIZE) * BLOCK_SIZE;
        (1..=BLOCK_SIZE)
            .cartesian_product(1..=BLOCK_SIZE)
            .map(|(dr, dc)| CellDigit::new(top + dr, left + dc, digit))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Assignment;
    use crate::sudoku::board::EXAMPLE_NINE;
    use crate::sudoku::board::tests::SOLVED_NINE;

    /// Clauses before any clue: 81 cell ALO, 81 * 36 cell AMO, and
    /// 243 groups of 1 ALO plus 36 AMO.
    const STRUCTURAL_CLAUSES: usize = 81 + 81 * 36 + 3 * 81 * 37;

    #[test]
    fn test_variable_numbering() {
        assert_eq!(CellDigit::new(1, 1, 1).variable(), 1);
        assert_eq!(CellDigit::new(1, 1, 9).variable(), 9);
        assert_eq!(CellDigit::new(1, 2, 1).variable(), 10);
        assert_eq!(CellDigit::new(2, 1, 1).variable(), 82);
        assert_eq!(CellDigit::new(9, 9, 9).variable(), 729);
    }

    #[test]
    fn test_variable_inverse() {
        for var in 1..=729 {
            let cell = CellDigit::from_variable(var).unwrap();
            assert_eq!(cell.variable(), var);
        }
        assert_eq!(CellDigit::from_variable(0), None);
        assert_eq!(CellDigit::from_variable(730), None);
    }

    #[test]
    fn test_clause_counts() {
        assert_eq!(STRUCTURAL_CLAUSES, 11_988);
        assert_eq!(encode(&Board::empty()).len(), STRUCTURAL_CLAUSES);

        let cnf = encode(&Board::new(EXAMPLE_NINE));
        assert_eq!(cnf.len(), STRUCTURAL_CLAUSES + 30);
        assert_eq!(cnf.num_vars, NUM_VARIABLES);
    }

    #[test]
    fn test_clause_order() {
        let cnf = encode(&Board::new(EXAMPLE_NINE));
        let clauses: Vec<&Clause> = cnf.iter().collect();

        assert_eq!(*clauses[0], Clause::from(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert_eq!(*clauses[80], Clause::from((721..=729).collect::<Vec<i32>>()));
        assert_eq!(*clauses[81], Clause::from(vec![-1, -2]));

        // First row group: digit 1 across row 1.
        let row_start = 81 + 81 * 36;
        assert_eq!(
            *clauses[row_start],
            Clause::from(vec![1, 10, 19, 28, 37, 46, 55, 64, 73])
        );

        // Clues close the formula, row-major: (1,1)=5 then (1,2)=3.
        assert_eq!(*clauses[STRUCTURAL_CLAUSES], Clause::from(vec![5]));
        assert_eq!(*clauses[STRUCTURAL_CLAUSES + 1], Clause::from(vec![12]));
    }

    #[test]
    fn test_block_units_cover_blocks() {
        let first: Vec<_> = block_units().next().unwrap();
        let cells: Vec<_> = first.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(
            cells,
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
        let last = block_units().last().unwrap();
        assert!(last.iter().all(|c| c.row >= 7 && c.col >= 7 && c.digit == 9));
    }

    #[test]
    fn test_solution_is_a_model() {
        let solution = Board::new(SOLVED_NINE);
        let model: Assignment = (1..=729)
            .map(|var| {
                let cell = CellDigit::from_variable(var).unwrap();
                let holds =
                    solution.digit(cell.row, cell.col).map(usize::from) == Some(cell.digit);
                Literal::new(var, holds)
            })
            .collect();

        assert!(encode(&Board::new(EXAMPLE_NINE)).verify(&model));
        assert!(encode(&solution).verify(&model));

        let mut wrong = EXAMPLE_NINE;
        wrong[0][2] = 1;
        assert!(!encode(&Board::new(wrong)).verify(&model));
    }
}
