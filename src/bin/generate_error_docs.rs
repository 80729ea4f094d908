//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` and `PuzzleError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::{self, Write};
use wordgrid::errors::ParseError;
use wordgrid::puzzle::PuzzleError;

/// Macro to render error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! render_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            writeln!($out, "### {}: {}\n", error.code(), error.description())?;
            writeln!($out, "**Details:** {}\n", error.details())?;

            if let Some(help_text) = error.help() {
                writeln!($out, "**How to fix:**\n```\n{}\n```\n", help_text)?;
            }

            writeln!($out, "**Example error message:**\n```\n{}\n```\n", error)?;
            writeln!($out, "**Detailed format:**\n```\n{}\n```\n", error.display_detailed())?;
            writeln!($out, "---\n")?;
        }
    };
}

/// One instance of every `ParseError` variant
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::EmptyGrid,
        ParseError::RaggedGrid { row: 2, expected: 5, found: 4 },
        ParseError::InvalidRule { line: 3, input: "abba".to_string() },
        ParseError::EmptyRuleSource { line: 1 },
        ParseError::InvalidSchedule { line: 2, input: "0@1 x".to_string() },
        ParseError::UnknownRule { line: 1, rule: 7, num_rules: 3 },
        ParseError::MissingSchedule { line: 6, num_schedules: 5 },
        // ParseIntError--create by parsing an invalid integer
        ParseError::ParseIntError("not_a_number".parse::<usize>().unwrap_err()),
        ParseError::NomError(nom::error::ErrorKind::Digit),
    ]
}

/// One instance of every `PuzzleError` variant
fn all_puzzle_error_variants() -> Vec<PuzzleError> {
    vec![
        PuzzleError::ParseFailure(Box::new(ParseError::EmptyGrid)),
        PuzzleError::RewriteLimitExceeded { line: 1, limit: 10_000 },
        PuzzleError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "failed to read grid from 'cipher.txt': No such file or directory",
        )),
    ]
}

fn render_docs() -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Table of Contents\n")?;
    writeln!(out, "- [Puzzle Errors (P001–P003)](#puzzle-errors)")?;
    writeln!(out, "- [Parse Errors (E001–E009)](#parse-errors)\n")?;

    writeln!(out, "## Puzzle Errors\n")?;
    writeln!(out, "Top-level errors from the puzzle pipeline. These wrap lower-level parse errors or report I/O and decoding failures.\n")?;
    render_error_docs!(&mut out, all_puzzle_error_variants());

    writeln!(out, "## Parse Errors\n")?;
    writeln!(out, "Errors that occur when reading the grid, rewrite rules, or schedules.\n")?;
    render_error_docs!(&mut out, all_parse_error_variants());

    writeln!(out, "## Error Display Formats\n")?;
    writeln!(out, "```\n<message> (<code>)\n<help text if available>\n```")?;

    Ok(out)
}

fn main() -> Result<(), fmt::Error> {
    print!("{}", render_docs()?);
    Ok(())
}
