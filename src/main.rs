use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use wordgrid::puzzle::{self, Puzzle, PuzzlePaths, RewritePaths};
use wordgrid::search::{self, ScanOptions, ScanStatus};

/// Word-search solver: decodes a letter grid and finds every dictionary word in it
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Encoded grid, one line per row
    #[arg(short, long, default_value = "cipher.txt")]
    cipher: PathBuf,

    /// Rewrite rules used to decode the grid (source;replacement per line)
    #[arg(short, long, default_value = "rules.txt")]
    rules: PathBuf,

    /// Rule schedule for each grid line (e.g. "0@1 2@2!")
    #[arg(short, long, default_value = "schedule.txt")]
    schedule: PathBuf,

    /// Word list, one word per line
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Treat the cipher file as the plain grid (no rules or schedule)
    #[arg(long)]
    plain: bool,

    /// Longest path to explore, in cells
    #[arg(long)]
    max_depth: Option<usize>,

    /// Stop the search after this many seconds and report what was found (0 = no limit)
    #[arg(short = 't', long, default_value_t = 0)]
    time_budget: u64,
}

impl Cli {
    fn puzzle_paths(&self) -> PuzzlePaths {
        PuzzlePaths {
            cipher: self.cipher.clone(),
            words: self.words.clone(),
            rewrite: (!self.plain).then(|| RewritePaths {
                rules: self.rules.clone(),
                schedule: self.schedule.clone(),
            }),
        }
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_depth: self.max_depth,
            time_budget: (self.time_budget > 0).then(|| Duration::from_secs(self.time_budget)),
        }
    }
}

/// Entry point of the wordgrid CLI.
///
/// Delegates to [`try_main`], printing any error with its code and help text
/// before exiting with code 1.
fn main() -> ExitCode {
    wordgrid::log::init_logger(wordgrid::log::debug_requested());

    if let Err(e) = try_main() {
        eprintln!("Error: {}", e.display_detailed());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic:
/// 1. Load the grid, word list, and (unless `--plain`) rules and schedule.
/// 2. Decode the grid and print it.
/// 3. Scan, printing each word as it is first found.
/// 4. Print status and timings on stderr.
fn try_main() -> Result<(), puzzle::PuzzleError> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let puzzle = Puzzle::load(&cli.puzzle_paths())?;
    let grid = puzzle.grid()?;
    let dictionary = puzzle.dictionary();
    let load_secs = t_load.elapsed().as_secs_f64();

    println!("{grid}");
    println!();

    let t_scan = Instant::now();
    let result = search::scan_all_with(&grid, &dictionary, &cli.scan_options(), |word| {
        println!("{word} found");
    });
    let scan_secs = t_scan.elapsed().as_secs_f64();

    if let ScanStatus::TimedOut { elapsed } = result.status {
        eprintln!(
            "⚠️  Timed out after {:.1}s; some words may not have been found",
            elapsed.as_secs_f64()
        );
    }

    eprintln!(
        "Loaded {} words ({} indexed) and a {}x{} grid in {:.3}s; scanned in {:.3}s ({} words found).",
        puzzle.words.len(),
        dictionary.num_words(),
        grid.height(),
        grid.width(),
        load_secs,
        scan_secs,
        result.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scan_has_no_time_limit() {
        let cli = Cli::try_parse_from(["wordgrid"]).unwrap();
        assert_eq!(cli.scan_options(), ScanOptions::default());
        assert!(cli.puzzle_paths().rewrite.is_some());
    }

    #[test]
    fn test_time_budget_is_opt_in() {
        let cli = Cli::try_parse_from(["wordgrid", "-t", "5", "--max-depth", "4", "--plain"]).unwrap();
        let options = cli.scan_options();
        assert_eq!(options.time_budget, Some(Duration::from_secs(5)));
        assert_eq!(options.max_depth, Some(4));
        assert!(cli.puzzle_paths().rewrite.is_none());
    }
}
