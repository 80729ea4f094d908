//! The letter grid searched for words.
//!
//! A [`Grid`] is an immutable `height × width` matrix of `char`s. Rectangularity is
//! checked once, here, so the search can index cells without re-validating.
//!
//! Cells are stored uppercase, matching the normalization [`WordList`](crate::word_list::WordList)
//! applies to words, so lowercase grids and word lists still meet.

use crate::errors::ParseError;
use std::fmt;
use std::str::FromStr;

/// Uppercase form of a single letter.
///
/// Letters whose uppercase form is more than one `char` (like `ß`) are kept as they are,
/// so a row never changes length.
#[must_use]
pub fn normalize_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Lines that hold grid rows: everything except blank or whitespace-only lines.
pub(crate) fn grid_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<char>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Build a grid from its rows, one `char` per cell, uppercased with [`normalize_letter`].
    ///
    /// # Errors
    ///
    /// - `ParseError::EmptyGrid` if there are no rows or the first row is empty.
    /// - `ParseError::RaggedGrid` if any row's length differs from the first row's.
    pub fn from_rows<I, S>(rows: I) -> Result<Grid, Box<ParseError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        let mut width = 0;

        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars().map(normalize_letter));
            let found = cells.len() - before;

            if height == 0 {
                width = found;
            } else if found != width {
                return Err(Box::new(ParseError::RaggedGrid { row: height + 1, expected: width, found }));
            }
            height += 1;
        }

        if height == 0 || width == 0 {
            return Err(Box::new(ParseError::EmptyGrid));
        }

        debug_assert_eq!(cells.len(), height * width);
        Ok(Grid { cells, height, width })
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells (`height * width`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(row, col)`, or `None` if the coordinates fall outside the grid.
    ///
    /// Coordinates are signed so callers can step off the edge without underflow.
    #[must_use]
    pub fn get(&self, row: isize, col: isize) -> Option<char> {
        self.index_of(row, col).map(|i| self.cells[i])
    }

    /// Flat index of `(row, col)`, or `None` when out of bounds.
    pub(crate) fn index_of(&self, row: isize, col: isize) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Iterate over the rows as strings.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.width).map(|row| row.iter().collect())
    }
}

impl FromStr for Grid {
    type Err = Box<ParseError>;

    /// One row per line; blank and whitespace-only lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::from_rows(grid_lines(s))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}
