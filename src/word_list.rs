//! `word_list` — load and normalize the word list the dictionary is built from.
//!
//! The input is plain text with one word per line. Parsing works from an in-memory string
//! (usable from WASM, where there is no filesystem) and, on native builds, from a path.
//!
//! The parsing logic:
//! - Each line is trimmed.
//! - Empty lines and lines starting with `#` are skipped.
//! - Lines with whitespace inside the word are skipped (grid cells never hold whitespace).
//! - Words are uppercased letter by letter, the same way grid cells are.
//! - Duplicates are dropped, keeping the first occurrence.
//!
//! Words that are too short to index are kept here; the dictionary decides what to ignore.

use crate::grid::normalize_letter;
use std::collections::HashSet;

/// A processed, ready-to-index word list.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    /// Uppercase words in file order, without duplicates.
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut seen = HashSet::new();
        let words = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() || line.starts_with('#') || line.contains(char::is_whitespace) {
                    None
                } else {
                    Some(line.chars().map(normalize_letter).collect::<String>())
                }
            })
            .filter(|word| seen.insert(word.clone()))
            .collect();

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;

        Ok(Self::parse_from_str(&data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
