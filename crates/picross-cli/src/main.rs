//! Command-line front end for the picross deduction engine.
//!
//! Reads a JSON puzzle document, deduces every forced cell and prints the
//! resulting grid.
//!
//! # Usage
//!
//! ```sh
//! picross puzzle.json
//! cat puzzle.json | picross - --json
//! RUST_LOG=debug picross puzzle.json --parallel
//! ```
//!
//! The document looks like:
//!
//! ```json
//! {
//!   "rows": 2, "cols": 3,
//!   "row_clues": [[2], [1]],
//!   "col_clues": [[1], [1], [1]],
//!   "grid": [[0, 0, 0], [0, 0, 2]]
//! }
//! ```
//!
//! Cells are `0` (empty), `1` (filled) or `2` (crossed). The exit status is 1
//! when the puzzle is rejected or contradictory.

use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use picross_core::Grid;
use picross_puzzle::{PuzzleDocument, SolveResult};
use picross_solver::PassMode;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle document to solve, or `-` for standard input.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the result record as JSON instead of a text grid.
    #[arg(long)]
    json: bool,

    /// Largest accepted number of rows or columns.
    #[arg(long, value_name = "N")]
    max_dimension: Option<usize>,

    /// Solve the lines of each pass in parallel.
    #[arg(long)]
    parallel: bool,

    /// Stop after this many propagation rounds.
    #[arg(long, value_name = "N")]
    max_rounds: Option<usize>,

    /// Raise the default log level (repeatable). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[display("invalid puzzle document: {_0}")]
    #[from]
    Parse(#[error(source)] serde_json::Error),
}

fn main() -> ExitCode {
    better_panic::install();
    let args = Args::parse();
    init_logger(args.verbose);

    match run(&args) {
        Ok(result) if !result.error => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<SolveResult, CliError> {
    let mut doc = read_document(&args.input)?;
    if let Some(max_dimension) = args.max_dimension {
        doc.config.max_dimension = max_dimension;
    }
    if args.parallel {
        doc.config.pass_mode = PassMode::Parallel;
    }
    if args.max_rounds.is_some() {
        doc.config.max_rounds = args.max_rounds;
    }
    log::debug!("solving {}x{} puzzle with {:?}", doc.rows, doc.cols, doc.config);

    let result = doc.solve();
    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        print_text(&doc, &result);
    }
    Ok(result)
}

fn read_document(path: &Path) -> Result<PuzzleDocument, CliError> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        text
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_text(doc: &PuzzleDocument, result: &SolveResult) {
    if result.error {
        eprintln!("error: {}", result.message);
        return;
    }
    let grid = Grid::from_rows(doc.rows, doc.cols, &result.grid);
    print!("{grid}");
    println!("{}", result.message);
}
