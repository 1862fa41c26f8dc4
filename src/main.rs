//! Command line front end for the dancing links Sudoku solver: reads a file
//! of puzzles, solves them all with one shared solver instance, and writes
//! the results to a file or to standard output.

use clap::Parser;

use sudoku_dlx::SudokuPuzzle;
use sudoku_dlx::error::{SudokuIoError, SudokuIoResult, SudokuParseError};
use sudoku_dlx::io::{read_file, write_file, write_puzzles};
use sudoku_dlx::solver::{DlxSolver, Solver};

use std::io;
use std::path::PathBuf;

const DEFAULT_OUTPUT_FILENAME: &str = "output.txt";

/// Solves files of Sudoku puzzles with the dancing links exact cover
/// algorithm.
#[derive(Parser)]
#[command(name = "sudoku-dlx")]
struct Args {

    /// File containing the puzzles to solve: for every puzzle a name line
    /// followed by nine lines of nine digits, 0 marking a blank cell.
    input: PathBuf,

    /// File the solved puzzles are written to. Without it (and without -f),
    /// the solutions go to standard output.
    output: Option<PathBuf>,

    /// Write the solved puzzles to FILE, or to output.txt if no name is
    /// given.
    #[arg(short = 'f', value_name = "FILE", num_args = 0..=1,
        default_missing_value = DEFAULT_OUTPUT_FILENAME)]
    file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if !args.input.exists() {
        println!("Provided file name: {}, does not exist.",
            args.input.display());
        return;
    }

    if let Err(error) = run(&args) {
        report(&error);
    }
}

fn run(args: &Args) -> SudokuIoResult<()> {
    let mut puzzles = read_file(&args.input)?;
    let mut solver = DlxSolver::new();

    for puzzle in &mut puzzles {
        if !solver.solve(puzzle.grid_mut()) {
            println!("Puzzle {} has no solution.", puzzle.name());
        }
    }

    match args.output.as_ref().or(args.file.as_ref()) {
        Some(path) => write_file(path, &puzzles),
        None => {
            let stdout = io::stdout();
            write_puzzles(stdout.lock(), &puzzles)?;
            println!("{}", checksum(&puzzles));
            Ok(())
        }
    }
}

/// The sum over all puzzles of the three digit number formed by the first
/// three cells of the top row (the Project Euler 96 checksum).
fn checksum(puzzles: &[SudokuPuzzle]) -> usize {
    puzzles.iter()
        .map(|puzzle| (0..3).fold(0, |number, column| {
            let digit = puzzle.grid()
                .get_cell(column, 0)
                .unwrap()
                .unwrap_or(0);
            number * 10 + digit
        }))
        .sum()
}

fn report(error: &SudokuIoError) {
    match error {
        SudokuIoError::Io(error) =>
            println!("The given file could not be read: {}.", error),
        SudokuIoError::Parse(SudokuParseError::EmptyInput) =>
            println!(
                "Given filename is either empty or cannot be read as a \
                sudoku puzzle."),
        SudokuIoError::Parse(_) =>
            println!("Line not properly formatted in given file.")
    }
}
