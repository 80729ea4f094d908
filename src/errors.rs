//! Error types for reading puzzle inputs, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E009) for documentation lookup:
//!
//! - E001: `EmptyGrid` (Grid has no rows or no columns)
//! - E002: `RaggedGrid` (Grid rows differ in length)
//! - E003: `InvalidRule` (Rewrite rule line without `;` separator)
//! - E004: `EmptyRuleSource` (Rewrite rule with an empty source)
//! - E005: `InvalidSchedule` (Malformed schedule line)
//! - E006: `UnknownRule` (Schedule step names a rule that doesn't exist)
//! - E007: `MissingSchedule` (Encoded grid line has no schedule)
//! - E008: `ParseIntError` (Integer parsing error)
//! - E009: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use wordgrid::errors::ParseError;
//! use wordgrid::grid::Grid;
//!
//! match Grid::from_rows(["CAT", "DO"]) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E002");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!("ragged rows are rejected"),
//! }
//!
//! let err = ParseError::EmptyGrid;
//! assert!(err.help().is_some());
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};
use std::num::ParseIntError;

/// Custom error type for input parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Empty grid (no rows or no columns)")]
    EmptyGrid,

    #[error("Ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, found: usize },

    #[error("Invalid rewrite rule on line {line}: \"{input}\"")]
    InvalidRule { line: usize, input: String },

    #[error("Rewrite rule on line {line} has an empty source")]
    EmptyRuleSource { line: usize },

    #[error("Invalid schedule on line {line}: \"{input}\"")]
    InvalidSchedule { line: usize, input: String },

    #[error("Schedule on line {line} refers to rule {rule}, but only {num_rules} rules are defined")]
    UnknownRule { line: usize, rule: usize, num_rules: usize },

    #[error("No schedule for encoded line {line} ({num_schedules} schedules given)")]
    MissingSchedule { line: usize, num_schedules: usize },

    #[error("int-parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<ParseIntError> for Box<ParseError> {
    fn from(pie: ParseIntError) -> Self {
        Box::new(ParseError::ParseIntError(pie))
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyGrid => "E001",
            ParseError::RaggedGrid { .. } => "E002",
            ParseError::InvalidRule { .. } => "E003",
            ParseError::EmptyRuleSource { .. } => "E004",
            ParseError::InvalidSchedule { .. } => "E005",
            ParseError::UnknownRule { .. } => "E006",
            ParseError::MissingSchedule { .. } => "E007",
            ParseError::ParseIntError(_) => "E008",
            ParseError::NomError(_) => "E009",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::EmptyGrid => "Grid has no rows or no columns",
            ParseError::RaggedGrid { .. } => "Grid rows differ in length",
            ParseError::InvalidRule { .. } => "Rewrite rule line without ';' separator",
            ParseError::EmptyRuleSource { .. } => "Rewrite rule with an empty source",
            ParseError::InvalidSchedule { .. } => "Malformed schedule line",
            ParseError::UnknownRule { .. } => "Schedule step names an undefined rule",
            ParseError::MissingSchedule { .. } => "Encoded grid line has no schedule",
            ParseError::ParseIntError(_) => "Integer parsing error",
            ParseError::NomError(_) => "Low-level parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::EmptyGrid => "The decoded grid must contain at least one row, and every row at least one cell.",
            ParseError::RaggedGrid { .. } => "Every grid row must have the same number of cells. Rows are counted after decoding, so a rewrite rule that changes line length can produce this error.",
            ParseError::InvalidRule { .. } => "Each non-empty line of the rules file must have the form `source;replacement`.",
            ParseError::EmptyRuleSource { .. } => "A rule with an empty source would match everywhere and never stop rewriting.",
            ParseError::InvalidSchedule { .. } => "Each schedule line is a whitespace-separated list of steps `RULE@ORDER`, optionally followed by `!` to mark a terminating step.",
            ParseError::UnknownRule { .. } => "Schedule steps refer to rules by their zero-based position in the rules file.",
            ParseError::MissingSchedule { .. } => "Every encoded grid line is decoded with the schedule on the same line of the schedule file. An empty schedule line leaves the grid line unchanged.",
            ParseError::ParseIntError(_) => "A rule index or order could not be parsed as an integer.",
            ParseError::NomError(_) => "The underlying parser rejected the input. This usually accompanies a more specific error.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyGrid => Some("Provide at least one non-empty grid line, e.g. 'CAT'"),
            ParseError::RaggedGrid { .. } => Some("Pad or trim the grid lines so they all have the same length"),
            ParseError::InvalidRule { .. } => Some("Example rule line: 'ab;ba' (replace 'ab' with 'ba')"),
            ParseError::EmptyRuleSource { .. } => Some("Give the rule a non-empty source, e.g. 'x;y'"),
            ParseError::InvalidSchedule { .. } => Some("Example schedule line: '0@1 2@2! 1@3'"),
            ParseError::UnknownRule { .. } => Some("Rule indices start at 0 and must be smaller than the number of rules"),
            ParseError::MissingSchedule { .. } => Some("Add one schedule line per encoded grid line (blank lines are allowed)"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<ParseError> {
        vec![
            ParseError::EmptyGrid,
            ParseError::RaggedGrid { row: 2, expected: 3, found: 2 },
            ParseError::InvalidRule { line: 1, input: "ab".to_string() },
            ParseError::EmptyRuleSource { line: 4 },
            ParseError::InvalidSchedule { line: 1, input: "0@".to_string() },
            ParseError::UnknownRule { line: 1, rule: 9, num_rules: 3 },
            ParseError::MissingSchedule { line: 3, num_schedules: 2 },
            ParseError::ParseIntError("x".parse::<usize>().unwrap_err()),
            ParseError::NomError(ErrorKind::Tag),
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::EmptyGrid;
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("CAT"));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in sample_errors() {
            let code = err.code();
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 9);
    }

    #[test]
    fn test_error_code_format() {
        for err in sample_errors() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"), "Error code '{}' should start with 'E0'", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_adds_information() {
        for err in sample_errors() {
            if let Some(help_text) = err.help() {
                assert!(help_text.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help_text, err.to_string());
            }
        }
    }

    #[test]
    fn test_ragged_grid_message_includes_sizes() {
        let err = ParseError::RaggedGrid { row: 2, expected: 3, found: 5 };
        let detailed = err.display_detailed();
        assert!(detailed.contains("row 2"));
        assert!(detailed.contains('3') && detailed.contains('5'));
        assert!(detailed.contains("E002"));
    }

    #[test]
    fn test_descriptions_and_details_are_present() {
        for err in sample_errors() {
            assert!(!err.description().is_empty());
            assert!(!err.details().is_empty());
        }
    }

    #[test]
    fn test_boxed_from_parse_int_error() {
        let boxed: Box<ParseError> = "99999999999999999999".parse::<usize>().unwrap_err().into();
        assert_eq!(boxed.code(), "E008");
    }
}
