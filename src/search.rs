//! Backtracking search for dictionary words traced through adjacent grid cells.
//!
//! A search is launched from every cell. Each step appends the current cell's letter to
//! the path string and asks the [`PrefixDictionary`] about it:
//!
//! - absent: no word starts this way, so the branch is abandoned;
//! - a full word: it is recorded (once per scan) and reported;
//! - a partial word: the cell is marked visited and the search continues into all
//!   8 neighbours, unmarking the cell once they are done.
//!
//! A cell can appear at most once in a path, but different paths may reuse it.
//!
//! # Examples
//!
//! ```
//! use wordgrid::dictionary::{PrefixDictionary, MIN_WORD_LENGTH};
//! use wordgrid::grid::Grid;
//! use wordgrid::search::{self, ScanStatus};
//!
//! let grid = Grid::from_rows(["CA", "TX"])?;
//! let dict = PrefixDictionary::build(["CAT", "AT", "CA"], MIN_WORD_LENGTH);
//!
//! let result = search::scan_all(&grid, &dict);
//! assert_eq!(result.status, ScanStatus::Exhausted);
//! assert_eq!(result.len(), 3);
//! assert!(result.contains("CAT"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::dictionary::PrefixDictionary;
use crate::grid::Grid;
use instant::Instant;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Duration;

/// Row/column steps to the 8 neighbours of a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

// Reading the clock on every node is measurable; check it every this many nodes instead.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Optional bounds on a scan. The default has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Longest path (in cells) to explore. Longer words are not found.
    pub max_depth: Option<usize>,
    /// Wall-clock limit for the whole scan.
    pub time_budget: Option<Duration>,
}

impl ScanOptions {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

/// How a scan ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStatus {
    /// Every branch from every cell was explored (or pruned).
    Exhausted,

    /// The time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Words found by a scan, in the order they were first discovered.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub words: Vec<String>,
    pub status: ScanStatus,
}

impl ScanResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// The found words as a set, for order-insensitive comparisons.
    #[must_use]
    pub fn word_set(&self) -> HashSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}

impl IntoIterator for ScanResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

/// Distinct words discovered during one scan, in first-discovery order.
///
/// Only used to deduplicate output; it never prunes a branch.
#[derive(Debug, Clone, Default)]
pub struct FoundWords {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FoundWords {
    /// Record `word`. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.seen.contains(word) {
            return false;
        }
        self.seen.insert(word.to_string());
        self.order.push(word.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Wall-clock limit for a scan.
struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// State of one full-grid scan.
///
/// The visited buffer and the path string are shared by every branch: a branch marks
/// its cell (and pushes its letter) before descending and restores both before
/// returning, so siblings never see each other's extensions.
pub struct GridSearch<'a, F: FnMut(&str)> {
    grid: &'a Grid,
    dictionary: &'a PrefixDictionary,
    max_depth: Option<usize>,
    budget: Option<TimeBudget>,
    visited: Vec<bool>,
    path: String,
    depth: usize,
    found: FoundWords,
    on_found: F,
    nodes: u64,
    timed_out: bool,
}

impl<'a, F: FnMut(&str)> GridSearch<'a, F> {
    /// Prepare a scan. The time budget, if any, starts now.
    pub fn new(grid: &'a Grid, dictionary: &'a PrefixDictionary, options: &ScanOptions, on_found: F) -> Self {
        let max_path = options
            .max_depth
            .unwrap_or(usize::MAX)
            .min(dictionary.longest_word_len())
            .min(grid.len());
        Self {
            grid,
            dictionary,
            max_depth: options.max_depth,
            budget: options.time_budget.map(TimeBudget::new),
            visited: vec![false; grid.len()],
            path: String::with_capacity(max_path * 4),
            depth: 0,
            found: FoundWords::default(),
            on_found,
            nodes: 0,
            timed_out: false,
        }
    }

    /// Run a search from every cell, column by column.
    pub fn scan_all(&mut self) {
        for col in 0..self.grid.width() {
            for row in 0..self.grid.height() {
                if self.check_budget() {
                    return;
                }
                // Grid dimensions always fit in isize: the cells are in a Vec.
                self.search_from(row as isize, col as isize);
            }
        }
    }

    /// Extend the current path with the cell at `(row, col)` and explore from there.
    ///
    /// Out-of-bounds and already-visited cells end the branch silently.
    pub fn search_from(&mut self, row: isize, col: isize) {
        if self.timed_out {
            return;
        }
        let Some(index) = self.grid.index_of(row, col) else {
            return;
        };
        if self.visited[index] {
            return;
        }
        if self.max_depth.is_some_and(|max| self.depth >= max) {
            return;
        }

        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0 && self.check_budget() {
            return;
        }

        let Some(letter) = self.grid.get(row, col) else {
            return;
        };
        self.path.push(letter);
        self.depth += 1;

        if let Some(word_type) = self.dictionary.lookup(&self.path) {
            if word_type.is_full_word() && self.found.insert(&self.path) {
                debug!("{} found", self.path);
                (self.on_found)(&self.path);
            }
            if word_type.is_partial() {
                self.visited[index] = true;
                for (d_row, d_col) in NEIGHBOR_OFFSETS {
                    self.search_from(row + d_row, col + d_col);
                }
                self.visited[index] = false;
            }
        }

        self.path.pop();
        self.depth -= 1;
    }

    /// Words found so far.
    pub fn found(&self) -> &FoundWords {
        &self.found
    }

    /// Consume the search and produce its result.
    pub fn finish(self) -> ScanResult {
        debug_assert!(self.path.is_empty(), "path must be unwound after a scan");
        debug_assert!(self.visited.iter().all(|v| !v), "all cells must be unmarked after a scan");

        let status = match (&self.budget, self.timed_out) {
            (Some(budget), true) => ScanStatus::TimedOut { elapsed: budget.elapsed() },
            _ => ScanStatus::Exhausted,
        };
        debug!("visited {} nodes", self.nodes);
        ScanResult { words: self.found.into_vec(), status }
    }

    // Returns true (and latches `timed_out`) once the budget has expired.
    fn check_budget(&mut self) -> bool {
        if !self.timed_out && self.budget.as_ref().is_some_and(TimeBudget::expired) {
            warn!("time budget expired after {} nodes", self.nodes);
            self.timed_out = true;
        }
        self.timed_out
    }
}

/// Find every word of `dictionary` traceable in `grid`, without limits.
#[must_use]
pub fn scan_all(grid: &Grid, dictionary: &PrefixDictionary) -> ScanResult {
    scan_all_with(grid, dictionary, &ScanOptions::default(), |_| {})
}

/// Find every word of `dictionary` traceable in `grid`, honouring `options`.
///
/// `on_found` is called once for each distinct word, in discovery order.
pub fn scan_all_with<F: FnMut(&str)>(
    grid: &Grid,
    dictionary: &PrefixDictionary,
    options: &ScanOptions,
    on_found: F,
) -> ScanResult {
    info!(
        "scanning {}x{} grid against {} prefixes",
        grid.height(),
        grid.width(),
        dictionary.len()
    );

    let mut search = GridSearch::new(grid, dictionary, options, on_found);
    if !dictionary.is_empty() {
        search.scan_all();
    }
    let result = search.finish();

    info!("found {} words ({:?})", result.len(), result.status);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::MIN_WORD_LENGTH;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn dict(words: &[&str]) -> PrefixDictionary {
        PrefixDictionary::build(words, MIN_WORD_LENGTH)
    }

    #[test]
    fn test_scan_finds_diagonal_and_straight_words() {
        let result = scan_all(&grid(&["CA", "TX"]), &dict(&["CAT", "AT", "CA"]));
        assert_eq!(result.word_set(), HashSet::from(["CAT", "AT", "CA"]));
        assert_eq!(result.status, ScanStatus::Exhausted);
    }

    #[test]
    fn test_scan_prunes_absent_prefixes() {
        let result = scan_all(&grid(&["XX", "XX"]), &dict(&["XY"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_cell_grid_finds_nothing() {
        let result = scan_all(&grid(&["A"]), &dict(&["A", "AA"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_cell_reuse_within_a_path() {
        // "ABA" would need the single A twice
        let result = scan_all(&grid(&["AB"]), &dict(&["ABA"]));
        assert!(result.is_empty());

        let result = scan_all(&grid(&["ABA"]), &dict(&["ABA"]));
        assert_eq!(result.words, vec!["ABA"]);
    }

    #[test]
    fn test_same_letter_in_different_cells() {
        let result = scan_all(&grid(&["AA"]), &dict(&["AA", "AAA"]));
        assert_eq!(result.words, vec!["AA"]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        // "AT" is traceable from both A cells
        let mut reported = Vec::new();
        let result = scan_all_with(&grid(&["ATA"]), &dict(&["AT", "TA"]), &ScanOptions::default(), |w| {
            reported.push(w.to_string());
        });
        assert_eq!(result.len(), 2);
        assert_eq!(reported, result.words);
    }

    #[test]
    fn test_full_word_and_partial_keeps_searching() {
        let result = scan_all(&grid(&["CAT"]), &dict(&["CA", "CAT"]));
        assert_eq!(result.word_set(), HashSet::from(["CA", "CAT"]));
    }

    #[test]
    fn test_discovery_order_is_column_major() {
        // column 0 is scanned before column 1
        let result = scan_all(&grid(&["BA", "XY"]), &dict(&["BX", "AY"]));
        assert_eq!(result.words, vec!["BX", "AY"]);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let g = grid(&["CATS", "ODOG", "TEAR"]);
        let d = dict(&["CAT", "CATS", "DOG", "TEA", "TEAR", "COT", "ODE", "EAR", "RAT"]);
        let first = scan_all(&g, &d);
        let second = scan_all(&g, &d);
        assert_eq!(first.words, second.words);
        assert!(first.contains("CATS"));
        assert!(first.contains("TEAR"));
    }

    #[test]
    fn test_empty_dictionary() {
        let result = scan_all(&grid(&["AB", "CD"]), &dict(&[]));
        assert!(result.is_empty());
        assert_eq!(result.status, ScanStatus::Exhausted);
    }

    #[test]
    fn test_max_depth_limits_word_length() {
        let g = grid(&["CATS"]);
        let d = dict(&["CAT", "CATS"]);
        let options = ScanOptions::default().with_max_depth(3);
        let result = scan_all_with(&g, &d, &options, |_| {});
        assert_eq!(result.words, vec!["CAT"]);
    }

    #[test]
    fn test_zero_time_budget_times_out() {
        let options = ScanOptions::default().with_time_budget(Duration::ZERO);
        let result = scan_all_with(&grid(&["CA", "TX"]), &dict(&["CAT"]), &options, |_| {});
        assert!(matches!(result.status, ScanStatus::TimedOut { .. }));
        assert!(result.is_empty());
    }

    #[test]
    fn test_generous_time_budget_completes() {
        let options = ScanOptions::default().with_time_budget(Duration::from_secs(60));
        let result = scan_all_with(&grid(&["CA", "TX"]), &dict(&["CAT"]), &options, |_| {});
        assert_eq!(result.status, ScanStatus::Exhausted);
        assert_eq!(result.words, vec!["CAT"]);
    }

    #[test]
    fn test_search_from_single_start() {
        let g = grid(&["CA", "TX"]);
        let d = dict(&["CAT", "AT", "CA"]);
        let mut search = GridSearch::new(&g, &d, &ScanOptions::default(), |_| {});
        search.search_from(0, 1);
        assert_eq!(search.found().iter().collect::<Vec<_>>(), vec!["AT"]);
        search.search_from(5, 5);
        search.search_from(-1, 0);
        assert_eq!(search.found().len(), 1);
        let result = search.finish();
        assert_eq!(result.words, vec!["AT"]);
    }

    #[test]
    fn test_found_words_dedup() {
        let mut found = FoundWords::default();
        assert!(found.insert("CAT"));
        assert!(!found.insert("CAT"));
        assert!(found.insert("AT"));
        assert!(found.contains("CAT"));
        assert_eq!(found.into_vec(), vec!["CAT", "AT"]);
    }
}
