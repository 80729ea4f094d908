//! End-to-end puzzle pipeline: decode the grid, index the words, scan.
//!
//! # Error Handling
//!
//! The pipeline uses [`PuzzleError`] with three variants:
//!
//! - P001: `ParseFailure` (An input could not be parsed (wraps [`ParseError`]))
//! - P002: `RewriteLimitExceeded` (Decoding a grid line never terminated)
//! - P003: `Io` (An input file could not be read)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! # Examples
//!
//! ```
//! use wordgrid::puzzle::Puzzle;
//! use wordgrid::search::ScanOptions;
//! use wordgrid::word_list::WordList;
//!
//! let puzzle = Puzzle::plain(vec!["CA".to_string(), "TX".to_string()], WordList::parse_from_str("cat\nat\nca"));
//! let solution = puzzle.solve(&ScanOptions::default(), |word| println!("{word} found"))?;
//! assert_eq!(solution.result.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::cipher::{parse_rules, parse_schedules, Cipher};
use crate::dictionary::{PrefixDictionary, MIN_WORD_LENGTH};
use crate::errors::ParseError;
use crate::grid::{grid_lines, Grid};
use crate::search::{scan_all_with, ScanOptions, ScanResult};
use crate::word_list::WordList;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Unified error type for the puzzle pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    /// An input (grid, rules, schedules) could not be parsed.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    /// Decoding a grid line kept rewriting past the replacement limit.
    #[error("decoding line {line} did not finish within {limit} replacements")]
    RewriteLimitExceeded { line: usize, limit: usize },

    /// An input file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl PuzzleError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::ParseFailure(_) => "P001",
            PuzzleError::RewriteLimitExceeded { .. } => "P002",
            PuzzleError::Io(_) => "P003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PuzzleError::ParseFailure(_) => "Puzzle input parsing failed",
            PuzzleError::RewriteLimitExceeded { .. } => "Decoding a grid line never terminated",
            PuzzleError::Io(_) => "An input file could not be read",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PuzzleError::ParseFailure(_) => "One of the puzzle inputs could not be parsed. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            PuzzleError::RewriteLimitExceeded { .. } => "The rewrite rules kept matching the line. A rule whose replacement contains its own source (like `a;aa`) never stops unless its step is marked terminating.",
            PuzzleError::Io(_) => "The cipher, rules, schedule, or word list file could not be read from disk.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::RewriteLimitExceeded { .. } => Some("Mark the looping step as terminating with '!', e.g. '0@1!'"),
            PuzzleError::Io(_) => Some("Check the file paths passed on the command line (see --help)"),
            PuzzleError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            PuzzleError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Where to find the puzzle files.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct PuzzlePaths {
    /// Encoded grid lines (or the plain grid when `rewrite` is `None`).
    pub cipher: PathBuf,
    /// Word list, one word per line.
    pub words: PathBuf,
    /// Rules and schedules used to decode the grid lines.
    pub rewrite: Option<RewritePaths>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct RewritePaths {
    pub rules: PathBuf,
    pub schedule: PathBuf,
}

/// A decoded grid together with the result of scanning it.
#[derive(Debug, Clone)]
pub struct PuzzleSolution {
    pub grid: Grid,
    pub result: ScanResult,
}

/// Everything needed to solve one puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// Grid lines as read, before decoding. Blank lines are already dropped.
    pub encoded_lines: Vec<String>,
    /// `None` when the lines are the grid itself.
    pub cipher: Option<Cipher>,
    pub words: WordList,
}

impl Puzzle {
    #[must_use]
    pub fn new(encoded_lines: Vec<String>, cipher: Cipher, words: WordList) -> Self {
        Self { encoded_lines, cipher: Some(cipher), words }
    }

    /// A puzzle whose grid lines need no decoding.
    #[must_use]
    pub fn plain(rows: Vec<String>, words: WordList) -> Self {
        Self { encoded_lines: rows, cipher: None, words }
    }

    /// Read a puzzle from disk.
    ///
    /// # Errors
    ///
    /// `PuzzleError::Io` if a file can't be read, `PuzzleError::ParseFailure` if the
    /// rules or schedules are malformed or don't fit together.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(paths: &PuzzlePaths) -> Result<Self, PuzzleError> {
        let encoded_lines = encoded_lines(&read_file(&paths.cipher, "grid")?);
        let words = WordList::load_from_path(&paths.words)?;

        let cipher = match &paths.rewrite {
            Some(rewrite) => {
                let rules = parse_rules(&read_file(&rewrite.rules, "rules")?)?;
                let schedules = parse_schedules(&read_file(&rewrite.schedule, "schedule")?)?;
                Some(Cipher::new(rules, schedules)?)
            }
            None => None,
        };

        log::info!("loaded {} grid lines and {} words", encoded_lines.len(), words.len());
        Ok(Self { encoded_lines, cipher, words })
    }

    /// Build a puzzle from in-memory texts; `rewrite` holds the rules and schedules texts.
    ///
    /// # Errors
    ///
    /// `PuzzleError::ParseFailure` if the rules or schedules are malformed.
    pub fn from_texts(grid_text: &str, words_text: &str, rewrite: Option<(&str, &str)>) -> Result<Self, PuzzleError> {
        let cipher = match rewrite {
            Some((rules_text, schedule_text)) => {
                Some(Cipher::new(parse_rules(rules_text)?, parse_schedules(schedule_text)?)?)
            }
            None => None,
        };
        Ok(Self {
            encoded_lines: encoded_lines(grid_text),
            cipher,
            words: WordList::parse_from_str(words_text),
        })
    }

    /// The grid lines after decoding.
    ///
    /// # Errors
    ///
    /// See [`Cipher::decode_lines`].
    pub fn decode(&self) -> Result<Vec<String>, PuzzleError> {
        match &self.cipher {
            Some(cipher) => cipher.decode_lines(&self.encoded_lines),
            None => Ok(self.encoded_lines.clone()),
        }
    }

    /// Decode the lines and check they form a rectangle.
    ///
    /// # Errors
    ///
    /// Decoding errors, or `ParseError::EmptyGrid` / `ParseError::RaggedGrid` (wrapped).
    pub fn grid(&self) -> Result<Grid, PuzzleError> {
        Ok(Grid::from_rows(self.decode()?)?)
    }

    /// Index the word list, ignoring words shorter than [`MIN_WORD_LENGTH`].
    #[must_use]
    pub fn dictionary(&self) -> PrefixDictionary {
        PrefixDictionary::build(&self.words.words, MIN_WORD_LENGTH)
    }

    /// Decode, index and scan. `on_found` sees each distinct word once, in discovery order.
    ///
    /// # Errors
    ///
    /// See [`grid`](Self::grid). The scan itself cannot fail.
    pub fn solve<F: FnMut(&str)>(&self, options: &ScanOptions, on_found: F) -> Result<PuzzleSolution, PuzzleError> {
        let grid = self.grid()?;
        let dictionary = self.dictionary();
        let result = scan_all_with(&grid, &dictionary, options, on_found);
        Ok(PuzzleSolution { grid, result })
    }
}

fn encoded_lines(text: &str) -> Vec<String> {
    grid_lines(text).map(str::to_string).collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn read_file(path: &std::path::Path, what: &str) -> std::io::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("failed to read {what} from '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ScanStatus;
    use std::collections::HashSet;

    #[test]
    fn test_plain_puzzle() {
        let puzzle = Puzzle::from_texts("CA\nTX\n", "cat\nat\nca\na", None).unwrap();
        let mut reported = Vec::new();
        let solution = puzzle.solve(&ScanOptions::default(), |w| reported.push(w.to_string())).unwrap();
        assert_eq!(solution.result.word_set(), HashSet::from(["CAT", "AT", "CA"]));
        assert_eq!(solution.result.status, ScanStatus::Exhausted);
        assert_eq!(reported, solution.result.words);
    }

    #[test]
    fn test_lowercase_puzzle() {
        let puzzle = Puzzle::from_texts("ca\ntx\n", "cat\nat\nca", None).unwrap();
        let solution = puzzle.solve(&ScanOptions::default(), |_| {}).unwrap();
        assert_eq!(solution.result.len(), 3);
        assert_eq!(solution.result.word_set(), HashSet::from(["CAT", "AT", "CA"]));
    }

    #[test]
    fn test_whitespace_only_lines_match_grid_parsing() {
        let text = "AB\n   \nCD\n";
        let puzzle = Puzzle::from_texts(text, "", None).unwrap();
        assert_eq!(puzzle.grid().unwrap(), text.parse::<Grid>().unwrap());
    }

    #[test]
    fn test_encoded_puzzle() {
        // row 1: "XA" -> "CA"; row 2: "TQ" -> "TX"
        let puzzle = Puzzle::from_texts("XA\nTQ", "CAT", Some(("X;C\nQ;X", "0@1\n1@1"))).unwrap();
        assert_eq!(puzzle.decode().unwrap(), vec!["CA", "TX"]);
        let solution = puzzle.solve(&ScanOptions::default(), |_| {}).unwrap();
        assert_eq!(solution.result.words, vec!["CAT"]);
        assert_eq!(solution.grid.to_string(), "CA\nTX");
    }

    #[test]
    fn test_decoding_to_ragged_grid() {
        let puzzle = Puzzle::from_texts("AB\nCD", "AB", Some(("C;", "\n0@1"))).unwrap();
        let err = puzzle.grid().unwrap_err();
        assert_eq!(err.code(), "P001");
        match err {
            PuzzleError::ParseFailure(pe) => assert!(matches!(*pe, ParseError::RaggedGrid { row: 2, .. })),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_grid_text() {
        let puzzle = Puzzle::from_texts("\n\n", "AB", None).unwrap();
        assert!(matches!(puzzle.grid(), Err(PuzzleError::ParseFailure(_))));
    }

    #[test]
    fn test_empty_word_list_is_not_an_error() {
        let puzzle = Puzzle::from_texts("AB", "", None).unwrap();
        let solution = puzzle.solve(&ScanOptions::default(), |_| {}).unwrap();
        assert!(solution.result.is_empty());
    }

    #[test]
    fn test_error_codes_and_details() {
        let errors = vec![
            PuzzleError::ParseFailure(Box::new(ParseError::EmptyGrid)),
            PuzzleError::RewriteLimitExceeded { line: 1, limit: 10 },
            PuzzleError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")),
        ];
        let codes: HashSet<&str> = errors.iter().map(PuzzleError::code).collect();
        assert_eq!(codes.len(), 3);
        for err in &errors {
            assert!(err.code().starts_with('P'));
            assert!(!err.description().is_empty());
            assert!(err.display_detailed().contains(err.code()));
        }
    }

    #[test]
    fn test_parse_failure_detailed_includes_cause() {
        let err = PuzzleError::ParseFailure(Box::new(ParseError::EmptyGrid));
        let detailed = err.display_detailed();
        assert!(detailed.contains("P001"));
        assert!(detailed.contains("caused by"));
        assert!(detailed.contains("E001"));
    }

    #[test]
    fn test_load_missing_files() {
        let paths = PuzzlePaths {
            cipher: PathBuf::from("no/such/cipher.txt"),
            words: PathBuf::from("no/such/words.txt"),
            rewrite: None,
        };
        let err = Puzzle::load(&paths).unwrap_err();
        assert_eq!(err.code(), "P003");
        assert!(err.to_string().contains("cipher.txt"));
    }
}
