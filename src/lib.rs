// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! This crate implements a Sudoku solver built on Knuth's dancing links
//! technique. It supports the following key features:
//!
//! * Parsing and printing Sudoku grids and named puzzles
//! * Checking that a completed grid satisfies the standard Sudoku rules
//! * Solving Sudoku by reducing them to exact cover and searching the
//! constraint matrix with Algorithm X
//! * Reading and writing puzzle collections in a simple text format
//!
//! # Parsing and printing Sudoku
//!
//! A grid is written as nine lines of nine digit characters, where `0`
//! marks a blank cell. See [SudokuGrid::parse] for details.
//!
//! ```
//! use sudoku_dlx::SudokuGrid;
//!
//! let grid = SudokuGrid::parse(
//!     "530070000\n\
//!      600195000\n\
//!      098000060\n\
//!      800060003\n\
//!      400803001\n\
//!      700020006\n\
//!      060000280\n\
//!      000419005\n\
//!      000080079").unwrap();
//!
//! assert_eq!(Some(5), grid.get_cell(0, 0).unwrap());
//! assert_eq!(30, grid.count_clues());
//! ```
//!
//! # Solving Sudoku
//!
//! This crate offers a [Solver](solver::Solver) trait for structs that can
//! complete partially filled grids in place. The provided implementation is
//! [DlxSolver](solver::DlxSolver), which builds the 324-column Sudoku
//! constraint matrix once and reuses it for any number of puzzles.
//!
//! ```
//! use sudoku_dlx::SudokuGrid;
//! use sudoku_dlx::solver::{DlxSolver, Solver};
//!
//! let mut grid = SudokuGrid::parse(
//!     "530070000\n\
//!      600195000\n\
//!      098000060\n\
//!      800060003\n\
//!      400803001\n\
//!      700020006\n\
//!      060000280\n\
//!      000419005\n\
//!      000080079").unwrap();
//! let mut solver = DlxSolver::new();
//!
//! assert!(solver.solve(&mut grid));
//! assert!(grid.is_solved());
//! ```
//!
//! # The exact cover engine
//!
//! The underlying engine in the [dlx] module is puzzle-agnostic: any exact
//! cover instance can be stated as a [ConstraintMatrix](dlx::ConstraintMatrix)
//! and searched. The Sudoku specialization merely builds a particular matrix
//! and interprets the selected rows as digit placements.

pub mod dlx;
pub mod error;
pub mod io;
pub mod solver;
pub mod util;


use error::{SudokuError, SudokuParseError, SudokuParseResult, SudokuResult};
use util::DigitSet;

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The number of rows, columns, boxes, and distinct digits of a Sudoku.
pub const GRID_SIZE: usize = 9;

/// The side length of one of the nine 3x3 boxes.
pub const BOX_SIZE: usize = 3;

/// The sum of the digits of a completely and correctly filled row, column,
/// or box.
const UNIT_DIGIT_SUM: usize = 45;

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * GRID_SIZE + column
}

/// A 9 by 9 Sudoku grid whose cells may or may not be occupied by a digit
/// from 1 to 9.
///
/// Grids are exchanged in a plain text form of nine lines with nine digit
/// characters each, where `0` stands for a blank cell; [SudokuGrid::parse]
/// reads that form and the `Display` implementation prints it, so a grid
/// survives a round trip unchanged.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SudokuGrid {
    cells: Vec<Option<usize>>
}

impl SudokuGrid {

    /// Creates a new, completely blank grid.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: vec![None; GRID_SIZE * GRID_SIZE]
        }
    }

    /// Parses the text form of a grid: nine lines, each consisting of nine
    /// digit characters, where `0` marks a blank cell. The lines are
    /// assigned top to bottom and the characters within a line left to
    /// right. A trailing carriage return on a line is ignored, so files
    /// with Windows line endings parse as well.
    ///
    /// # Errors
    ///
    /// * `SudokuParseError::WrongNumberOfLines` if the input does not
    /// consist of exactly nine lines.
    /// * `SudokuParseError::WrongLineLength` if a line does not consist of
    /// exactly nine characters.
    /// * `SudokuParseError::InvalidCharacter` if a character is not a digit.
    pub fn parse(code: &str) -> SudokuParseResult<SudokuGrid> {
        let lines: Vec<&str> = code.lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        if lines.len() != GRID_SIZE {
            return Err(SudokuParseError::WrongNumberOfLines);
        }

        let mut grid = SudokuGrid::new();

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != GRID_SIZE {
                return Err(SudokuParseError::WrongLineLength);
            }

            for (column, character) in line.chars().enumerate() {
                let digit = character.to_digit(10)
                    .ok_or(SudokuParseError::InvalidCharacter)? as usize;

                if digit != 0 {
                    grid.cells[index(column, row)] = Some(digit);
                }
            }
        }

        Ok(grid)
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(column, row)])
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit. If the cell was not empty, the old digit will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be
    /// in the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 9[`.
    /// * `digit`: The digit to assign to the specified cell. Must be in the
    /// range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` if either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` if `digit` is not in the specified
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, digit: usize)
            -> SudokuResult<()> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if digit == 0 || digit > GRID_SIZE {
            return Err(SudokuError::InvalidNumber);
        }

        self.cells[index(column, row)] = Some(digit);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a digit, that digit is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are greater than or equal to 9. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(column, row)] = None;
        Ok(())
    }

    /// Counts the number of clues given by this grid. This is the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// digit.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// digit.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Gets the cells of this grid in left-to-right, top-to-bottom order,
    /// where rows are together.
    pub fn cells(&self) -> &[Option<usize>] {
        &self.cells
    }

    fn unit_is_valid(&self, cells: impl Iterator<Item = Option<usize>>)
            -> bool {
        let mut seen = DigitSet::new();
        let mut sum = 0;

        for cell in cells {
            let digit = match cell {
                Some(digit) => digit,
                None => return false
            };

            if !seen.insert(digit) {
                return false;
            }

            sum += digit;
        }

        sum == UNIT_DIGIT_SUM && seen.is_full()
    }

    fn row_is_valid(&self, row: usize) -> bool {
        self.unit_is_valid((0..GRID_SIZE)
            .map(|column| self.cells[index(column, row)]))
    }

    fn column_is_valid(&self, column: usize) -> bool {
        self.unit_is_valid((0..GRID_SIZE)
            .map(|row| self.cells[index(column, row)]))
    }

    fn box_is_valid(&self, box_number: usize) -> bool {
        let start_row = (box_number / BOX_SIZE) * BOX_SIZE;
        let start_column = (box_number % BOX_SIZE) * BOX_SIZE;
        self.unit_is_valid((0..GRID_SIZE).map(|offset| {
            let row = start_row + offset / BOX_SIZE;
            let column = start_column + offset % BOX_SIZE;
            self.cells[index(column, row)]
        }))
    }

    /// Indicates whether this grid is a correct, complete Sudoku solution,
    /// i.e. every row, every column, and every 3x3 box contains each digit
    /// from 1 to 9 exactly once. Grids with blank cells are never solved.
    pub fn is_solved(&self) -> bool {
        (0..GRID_SIZE).all(|unit|
            self.row_is_valid(unit)
                && self.column_is_valid(unit)
                && self.box_is_valid(unit))
    }
}

impl Default for SudokuGrid {
    fn default() -> SudokuGrid {
        SudokuGrid::new()
    }
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            if row > 0 {
                f.write_str("\n")?;
            }

            for column in 0..GRID_SIZE {
                let digit = self.cells[index(column, row)].unwrap_or(0);
                write!(f, "{}", digit)?;
            }
        }

        Ok(())
    }
}

/// A Sudoku puzzle, that is, a [SudokuGrid] together with a name. In the
/// text exchange format the name line precedes the nine grid lines; see the
/// [io] module.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SudokuPuzzle {
    name: String,
    grid: SudokuGrid
}

impl SudokuPuzzle {

    /// Creates a new puzzle with the given name and a completely blank grid.
    pub fn new(name: impl Into<String>) -> SudokuPuzzle {
        SudokuPuzzle::with_grid(name, SudokuGrid::new())
    }

    /// Creates a new puzzle with the given name and grid.
    pub fn with_grid(name: impl Into<String>, grid: SudokuGrid)
            -> SudokuPuzzle {
        SudokuPuzzle {
            name: name.into(),
            grid
        }
    }

    /// Gets the name of this puzzle.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets a reference to the grid of this puzzle.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Gets a mutable reference to the grid of this puzzle.
    pub fn grid_mut(&mut self) -> &mut SudokuGrid {
        &mut self.grid
    }

    /// Indicates whether the grid of this puzzle is a correct, complete
    /// Sudoku solution. See [SudokuGrid::is_solved].
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }
}
