//! This module contains the logic for solving Sudoku.
//!
//! Most importantly, this module contains the definition of the
//! [Solver](trait.Solver.html) trait and the
//! [DlxSolver](struct.DlxSolver.html), which reduces a Sudoku to an exact
//! cover problem and searches it with the dancing links engine from the
//! [dlx](../dlx/index.html) module.

use crate::{BOX_SIZE, GRID_SIZE, SudokuGrid};
use crate::dlx::ConstraintMatrix;

/// The number of constraint columns in one category (one per cell, or per
/// (row, digit), (column, digit), or (box, digit) pairing).
const CATEGORY_SIZE: usize = GRID_SIZE * GRID_SIZE;

/// The total number of constraint columns of the Sudoku matrix.
const NUM_COLUMNS: usize = 4 * CATEGORY_SIZE;

/// The four categories of Sudoku constraints, in the order in which their
/// column blocks are laid out in the matrix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Category {

    /// Each cell must hold exactly one digit.
    Cell = 0,

    /// Each row must hold each digit exactly once.
    RowDigit = 1,

    /// Each column must hold each digit exactly once.
    ColumnDigit = 2,

    /// Each box must hold each digit exactly once.
    BoxDigit = 3
}

/// The matrix column of the constraint identified by a category and its two
/// coordinates (cell row and column, or row/column/box and 0-based digit).
/// Matrix columns are 1-based, hence the leading offset.
fn column_index(category: Category, major: usize, minor: usize) -> usize {
    1 + category as usize * CATEGORY_SIZE + major * GRID_SIZE + minor
}

fn box_index(row: usize, column: usize) -> usize {
    (row / BOX_SIZE) * BOX_SIZE + column / BOX_SIZE
}

/// A trait for structs which have the ability to solve Sudoku by completing
/// a partially filled grid in place.
pub trait Solver {

    /// Solves the given grid in place, replacing every blank cell with a
    /// digit such that the result satisfies the standard Sudoku rules while
    /// all given digits stay untouched. Returns `true` if a completion was
    /// found. If the given digits admit no completion, `false` is returned
    /// and the grid is left unchanged; this is a regular outcome, not an
    /// error.
    fn solve(&mut self, grid: &mut SudokuGrid) -> bool;
}

/// A [Solver](trait.Solver.html) that interprets the Sudoku as an exact
/// cover problem over 324 constraints and 729 candidates and searches it
/// with dancing links.
///
/// The constraint matrix is built once per solver and reused: before each
/// search the given digits are pinned by covering their constraints, and
/// after the search every pin is reversed, returning the matrix to its
/// pristine state. One solver instance can therefore solve any number of
/// puzzles in sequence without reconstruction. Solving takes `&mut self`
/// because the search mutates the shared matrix; a solver must not be used
/// for two solves at once.
///
/// # Example
///
/// ```
/// use sudoku_dlx::SudokuGrid;
/// use sudoku_dlx::solver::{DlxSolver, Solver};
///
/// let mut grid = SudokuGrid::parse(
///     "000081000\n\
///      002007800\n\
///      053000170\n\
///      370000000\n\
///      600000003\n\
///      000000024\n\
///      069000230\n\
///      005900400\n\
///      000650000").unwrap();
/// let mut solver = DlxSolver::new();
///
/// assert!(solver.solve(&mut grid));
/// assert!(grid.is_solved());
/// ```
pub struct DlxSolver {
    matrix: ConstraintMatrix
}

impl DlxSolver {

    /// Creates a new solver with a freshly built Sudoku constraint matrix.
    ///
    /// The matrix holds one candidate row for every (row, column, digit)
    /// triple, linking the cell constraint of (row, column) with the
    /// row-digit, column-digit, and box-digit constraints that placing the
    /// digit there satisfies.
    pub fn new() -> DlxSolver {
        let mut matrix = ConstraintMatrix::new(NUM_COLUMNS);

        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                for digit in 0..GRID_SIZE {
                    matrix.add_row(&[
                        column_index(Category::Cell, row, column),
                        column_index(Category::RowDigit, row, digit),
                        column_index(Category::ColumnDigit, column, digit),
                        column_index(Category::BoxDigit,
                            box_index(row, column), digit)
                    ]);
                }
            }
        }

        DlxSolver { matrix }
    }

    /// Pins one given digit: covers the cell constraint of (row, column) and
    /// commits to the one remaining candidate of that cell which places
    /// `digit` there. Returns `false` if no such candidate is left, which
    /// means an earlier given already ruled the digit out.
    fn pin_clue(&mut self, row: usize, column: usize, digit: usize,
            pinned: &mut Vec<usize>) -> bool {
        let cell_column = column_index(Category::Cell, row, column);
        let row_digit_column =
            column_index(Category::RowDigit, row, digit - 1);
        self.matrix.cover(cell_column);
        let mut node = self.matrix.down(cell_column);

        while node != cell_column {
            if self.matrix.row_contains(node, row_digit_column) {
                self.matrix.select_row(node);
                pinned.push(node);
                return true;
            }

            node = self.matrix.down(node);
        }

        // The candidate for this given has been eliminated by an earlier
        // pin, so the given digits contradict each other.
        self.matrix.uncover(cell_column);
        false
    }

    /// Pins all given digits of the grid in row-major order and returns the
    /// selected candidate nodes in pin order. If the givens contradict each
    /// other, everything already pinned is reversed and `None` is returned.
    fn pin_clues(&mut self, grid: &SudokuGrid) -> Option<Vec<usize>> {
        let mut pinned = Vec::new();

        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let digit = match grid.get_cell(column, row).unwrap() {
                    Some(digit) => digit,
                    None => continue
                };

                if !self.pin_clue(row, column, digit, &mut pinned) {
                    self.unpin_clues(&pinned);
                    return None;
                }
            }
        }

        Some(pinned)
    }

    /// Reverses [DlxSolver::pin_clues] in strict last-pinned-first order,
    /// returning the matrix to its fully uncovered state.
    fn unpin_clues(&mut self, pinned: &[usize]) {
        for &node in pinned.iter().rev() {
            self.matrix.unselect_row(node);
            self.matrix.uncover(self.matrix.column_of(node));
        }
    }

    /// Writes the digits encoded by the selected candidate rows into the
    /// grid. Every candidate covers exactly one cell constraint and one
    /// row-digit constraint, from whose column indices the coordinates and
    /// the digit are recovered.
    fn enter_solution(&self, solution: &[usize], grid: &mut SudokuGrid) {
        for &node in solution {
            let mut columns: Vec<usize> = self.matrix.row_columns(node)
                .iter()
                .map(|&column| column - 1)
                .collect();
            columns.sort_unstable();

            let cell = columns[0];
            let row_digit = columns[1];
            let row = cell / GRID_SIZE;
            let column = cell % GRID_SIZE;
            let digit = row_digit - CATEGORY_SIZE - row * GRID_SIZE + 1;
            grid.set_cell(column, row, digit).unwrap();
        }
    }
}

impl Solver for DlxSolver {
    fn solve(&mut self, grid: &mut SudokuGrid) -> bool {
        let pinned = match self.pin_clues(grid) {
            Some(pinned) => pinned,
            None => return false
        };

        let solved = match self.matrix.search() {
            Some(solution) => {
                self.enter_solution(&solution, grid);
                true
            }
            None => false
        };

        self.unpin_clues(&pinned);
        solved
    }
}

impl Default for DlxSolver {
    fn default() -> DlxSolver {
        DlxSolver::new()
    }
}
