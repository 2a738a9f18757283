use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sudoku::encoder::{CellDigit, encode};
use core::fmt;

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of a block.
pub const BLOCK_SIZE: usize = 3;

/// Raw grid, row-major. Values in `1..=9` are digits; anything else is blank.
pub type Grid = [[u8; SIZE]; SIZE];

pub const EXAMPLE_NINE: Grid = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 9x9 Sudoku grid of digits and blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(Grid);

const fn is_digit(value: u8) -> bool {
    matches!(value, 1..=9)
}

impl Board {
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self(grid)
    }

    /// A grid with no clues.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[0; SIZE]; SIZE])
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.0
    }

    /// Digit at 1-indexed `row`, `col`, or `None` for a blank.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is outside `1..=9`.
    #[must_use]
    pub const fn digit(&self, row: usize, col: usize) -> Option<u8> {
        let value = self.0[row - 1][col - 1];
        if is_digit(value) { Some(value) } else { None }
    }

    /// Sets the cell at 1-indexed `row`, `col`. Zero clears it.
    pub const fn set(&mut self, row: usize, col: usize, value: u8) {
        self.0[row - 1][col - 1] = value;
    }

    /// Filled cells in row-major order.
    pub fn clues(&self) -> impl Iterator<Item = CellDigit> + '_ {
        (1..=SIZE).flat_map(move |row| {
            (1..=SIZE).filter_map(move |col| {
                self.digit(row, col)
                    .map(|d| CellDigit::new(row, col, usize::from(d)))
            })
        })
    }

    #[must_use]
    pub fn num_clues(&self) -> usize {
        self.clues().count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.num_clues() == SIZE * SIZE
    }

    /// `true` if every cell is filled and each row, column and block holds
    /// every digit exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        let all_digits = |cells: &mut dyn Iterator<Item = (usize, usize)>| {
            let mut seen = [false; SIZE + 1];
            for (row, col) in cells {
                match self.digit(row, col) {
                    Some(d) if !seen[usize::from(d)] => seen[usize::from(d)] = true,
                    _ => return false,
                }
            }
            true
        };

        (1..=SIZE).all(|row| all_digits(&mut (1..=SIZE).map(|col| (row, col))))
            && (1..=SIZE).all(|col| all_digits(&mut (1..=SIZE).map(|row| (row, col))))
            && (0..SIZE).all(|block| {
                let top = (block / BLOCK_SIZE) * BLOCK_SIZE;
                let left = (block % BLOCK_SIZE) * BLOCK_SIZE;
                all_digits(
                    &mut (0..SIZE)
                        .map(|i| (top + i / BLOCK_SIZE + 1, left + i % BLOCK_SIZE + 1)),
                )
            })
    }

    /// `true` if every clue of `puzzle` appears unchanged in `self`.
    #[must_use]
    pub fn respects(&self, puzzle: &Self) -> bool {
        puzzle
            .clues()
            .all(|c| self.digit(c.row, c.col).map(usize::from) == Some(c.digit))
    }

    /// Reads a grid back out of a model of the encoding. A cell gets a digit
    /// when exactly one of its nine variables is true and stays blank
    /// otherwise, so a decoded board of a genuine model is complete.
    #[must_use]
    pub fn decode(assignment: &Assignment) -> Self {
        let mut counts = [[0u8; SIZE]; SIZE];
        let mut board = Self::empty();

        for var in assignment.true_variables() {
            let Some(cell) = CellDigit::from_variable(var) else {
                continue;
            };
            counts[cell.row - 1][cell.col - 1] += 1;
            // `from_variable` only yields digits in 1..=9.
            board.set(cell.row, cell.col, cell.digit as u8);
        }

        for (row, row_counts) in counts.iter().enumerate() {
            for (col, &count) in row_counts.iter().enumerate() {
                if count != 1 {
                    board.set(row + 1, col + 1, 0);
                }
            }
        }
        board
    }

    /// CNF encoding of this puzzle.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        encode(self)
    }
}

impl From<Grid> for Board {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}

impl From<Board> for Grid {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=SIZE {
            if row > 1 && (row - 1) % BLOCK_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 1..=SIZE {
                if col > 1 {
                    f.write_str(if (col - 1) % BLOCK_SIZE == 0 { " | " } else { " " })?;
                }
                match self.digit(row, col) {
                    Some(d) => write!(f, "{d}")?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SOLVED_NINE: Grid = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn test_solved_grid_is_valid() {
        let board = Board::new(SOLVED_NINE);
        assert!(board.is_complete());
        assert!(board.is_valid_solution());
        assert!(board.respects(&Board::new(EXAMPLE_NINE)));
    }

    #[test]
    fn test_invalid_grids() {
        assert!(!Board::new(EXAMPLE_NINE).is_valid_solution());

        let mut swapped = SOLVED_NINE;
        swapped[0].swap(0, 1);
        // Rows still hold every digit, but columns 1 and 2 now repeat.
        assert!(!Board::new(swapped).is_valid_solution());
    }

    #[test]
    fn test_blank_is_anything_outside_one_to_nine() {
        let mut grid = [[0; SIZE]; SIZE];
        grid[0][0] = 10;
        grid[0][1] = 9;
        let board = Board::new(grid);
        assert_eq!(board.digit(1, 1), None);
        assert_eq!(board.digit(1, 2), Some(9));
        assert_eq!(board.num_clues(), 1);
    }

    #[test]
    fn test_clues_are_row_major() {
        let clues: Vec<_> = Board::new(EXAMPLE_NINE).clues().take(3).collect();
        assert_eq!(
            clues,
            vec![CellDigit::new(1, 1, 5), CellDigit::new(1, 2, 3), CellDigit::new(1, 5, 7)]
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let board = Board::new(SOLVED_NINE);
        let model: Assignment = board.clues().map(CellDigit::literal).collect();
        assert_eq!(Board::decode(&model), board);
    }

    #[test]
    fn test_decode_leaves_ambiguous_cells_blank() {
        let model: Assignment = [
            CellDigit::new(1, 1, 3).literal(),
            CellDigit::new(1, 1, 4).literal(),
            CellDigit::new(2, 2, 7).literal(),
            CellDigit::new(3, 3, 1).literal().negated(),
        ]
        .into_iter()
        .collect();
        let board = Board::decode(&model);
        assert_eq!(board.digit(1, 1), None);
        assert_eq!(board.digit(2, 2), Some(7));
        assert_eq!(board.digit(3, 3), None);
    }

    #[test]
    fn test_display() {
        let text = Board::new(EXAMPLE_NINE).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "5 3 . | . 7 . | . . .");
        assert_eq!(lines[3], "------+-------+------");
    }
}
