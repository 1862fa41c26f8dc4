//! This module contains the error and result definitions used in this crate.

use std::io;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not include errors that occur when
/// parsing puzzle text, see [SudokuParseError](enum.SudokuParseError.html)
/// for that.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that some number is invalid for a Sudoku cell. This is the
    /// case if it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the 9 by 9 grid. This is the case if they are greater than or equal to
    /// 9.
    OutOfBounds
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a `SudokuGrid`
/// or a collection of puzzles from their text form.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the input contained no puzzle at all.
    EmptyInput,

    /// Indicates that the input ended before the nine grid lines of a puzzle
    /// were complete.
    MissingGridLine,

    /// Indicates that a grid was given with a number of lines different from
    /// nine.
    WrongNumberOfLines,

    /// Indicates that a grid line did not consist of exactly nine characters.
    WrongLineLength,

    /// Indicates that a grid line contained a character that is not a digit.
    InvalidCharacter
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;

/// An enumeration of the errors that may occur when reading or writing
/// puzzle files with the [io](../io/index.html) module.
#[derive(Debug)]
pub enum SudokuIoError {

    /// Indicates that the underlying reader or writer failed.
    Io(io::Error),

    /// Indicates that the text read was not a valid puzzle collection.
    Parse(SudokuParseError)
}

impl From<io::Error> for SudokuIoError {
    fn from(error: io::Error) -> Self {
        SudokuIoError::Io(error)
    }
}

impl From<SudokuParseError> for SudokuIoError {
    fn from(error: SudokuParseError) -> Self {
        SudokuIoError::Parse(error)
    }
}

/// Syntactic sugar for `Result<V, SudokuIoError>`.
pub type SudokuIoResult<V> = Result<V, SudokuIoError>;
