//! This module contains the reading and writing of puzzle collections in
//! their plain text exchange format.
//!
//! Each puzzle is stored as a name line followed by nine lines of nine digit
//! characters, where `0` marks a blank cell. Multiple puzzles concatenate
//! back to back in one file, with no separators in between. Malformed lines
//! and empty files are rejected here, before any puzzle reaches the solver.

use crate::{GRID_SIZE, SudokuGrid, SudokuPuzzle};
use crate::error::{SudokuIoResult, SudokuParseError};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a collection of puzzles from the given reader.
///
/// # Errors
///
/// * `SudokuIoError::Io` if the underlying reader fails.
/// * `SudokuIoError::Parse` wrapping `SudokuParseError::EmptyInput` if the
/// input contains no puzzle, `SudokuParseError::MissingGridLine` if the
/// input ends in the middle of a grid, or any error raised by
/// [SudokuGrid::parse] for a malformed grid line.
pub fn read_puzzles<R: BufRead>(reader: R)
        -> SudokuIoResult<Vec<SudokuPuzzle>> {
    let mut lines = reader.lines();
    let mut puzzles = Vec::new();

    while let Some(name) = lines.next() {
        let name = name?;
        let mut grid_lines = Vec::with_capacity(GRID_SIZE);

        for _ in 0..GRID_SIZE {
            match lines.next() {
                Some(line) => grid_lines.push(line?),
                None =>
                    return Err(SudokuParseError::MissingGridLine.into())
            }
        }

        let grid = SudokuGrid::parse(&grid_lines.join("\n"))?;
        puzzles.push(SudokuPuzzle::with_grid(name, grid));
    }

    if puzzles.is_empty() {
        return Err(SudokuParseError::EmptyInput.into());
    }

    Ok(puzzles)
}

/// Reads a collection of puzzles from the file at the given path. See
/// [read_puzzles] for the format and the possible errors.
pub fn read_file<P: AsRef<Path>>(path: P)
        -> SudokuIoResult<Vec<SudokuPuzzle>> {
    let file = File::open(path)?;
    read_puzzles(BufReader::new(file))
}

/// Writes a collection of puzzles to the given writer in the same format
/// that [read_puzzles] accepts, so that writing and re-reading a collection
/// reproduces identical names and grids.
///
/// # Errors
///
/// `SudokuIoError::Io` if the underlying writer fails.
pub fn write_puzzles<W: Write>(mut writer: W, puzzles: &[SudokuPuzzle])
        -> SudokuIoResult<()> {
    for puzzle in puzzles {
        writeln!(writer, "{}", puzzle.name())?;
        writeln!(writer, "{}", puzzle.grid())?;
    }

    Ok(())
}

/// Writes a collection of puzzles to the file at the given path, creating
/// or truncating it. See [write_puzzles] for the format and the possible
/// errors.
pub fn write_file<P: AsRef<Path>>(path: P, puzzles: &[SudokuPuzzle])
        -> SudokuIoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_puzzles(&mut writer, puzzles)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::error::SudokuIoError;

    const SINGLE_PUZZLE: &str = "Grid 01\n\
        530070000\n\
        600195000\n\
        098000060\n\
        800060003\n\
        400803001\n\
        700020006\n\
        060000280\n\
        000419005\n\
        000080079\n";

    fn two_puzzles() -> String {
        let mut input = String::from(SINGLE_PUZZLE);
        input.push_str("Grid 02\n");

        for _ in 0..GRID_SIZE {
            input.push_str("000000000\n");
        }

        input
    }

    #[test]
    fn reads_single_puzzle() {
        let puzzles = read_puzzles(SINGLE_PUZZLE.as_bytes()).unwrap();

        assert_eq!(1, puzzles.len());
        assert_eq!("Grid 01", puzzles[0].name());
        assert_eq!(Some(5), puzzles[0].grid().get_cell(0, 0).unwrap());
        assert_eq!(30, puzzles[0].grid().count_clues());
    }

    #[test]
    fn reads_concatenated_puzzles() {
        let puzzles = read_puzzles(two_puzzles().as_bytes()).unwrap();

        assert_eq!(2, puzzles.len());
        assert_eq!("Grid 01", puzzles[0].name());
        assert_eq!("Grid 02", puzzles[1].name());
        assert!(puzzles[1].grid().is_empty());
    }

    #[test]
    fn rejects_empty_input() {
        let result = read_puzzles("".as_bytes());

        assert!(matches!(result,
            Err(SudokuIoError::Parse(SudokuParseError::EmptyInput))));
    }

    #[test]
    fn rejects_truncated_puzzle() {
        let input = "Grid 01\n530070000\n600195000\n";
        let result = read_puzzles(input.as_bytes());

        assert!(matches!(result,
            Err(SudokuIoError::Parse(SudokuParseError::MissingGridLine))));
    }

    #[test]
    fn rejects_wrong_line_length() {
        let input = SINGLE_PUZZLE.replace("530070000", "53007000");
        let result = read_puzzles(input.as_bytes());

        assert!(matches!(result,
            Err(SudokuIoError::Parse(SudokuParseError::WrongLineLength))));
    }

    #[test]
    fn rejects_non_digit_characters() {
        let input = SINGLE_PUZZLE.replace("530070000", "5300.0000");
        let result = read_puzzles(input.as_bytes());

        assert!(matches!(result,
            Err(SudokuIoError::Parse(SudokuParseError::InvalidCharacter))));
    }

    #[test]
    fn write_read_round_trip() {
        let puzzles = read_puzzles(two_puzzles().as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write_puzzles(&mut buffer, &puzzles).unwrap();
        let reread = read_puzzles(buffer.as_slice()).unwrap();

        assert_eq!(puzzles, reread);
    }

    #[test]
    fn written_form_matches_input() {
        let puzzles = read_puzzles(SINGLE_PUZZLE.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write_puzzles(&mut buffer, &puzzles).unwrap();

        assert_eq!(SINGLE_PUZZLE, String::from_utf8(buffer).unwrap());
    }
}
