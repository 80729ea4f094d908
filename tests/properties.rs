//! Property tests: the scan agrees with a direct path check on small random grids.

use proptest::prelude::*;
use std::collections::HashSet;

use wordgrid::dictionary::{PrefixDictionary, MIN_WORD_LENGTH};
use wordgrid::grid::Grid;
use wordgrid::search::{scan_all, scan_all_with, ScanOptions};

// -----------------------------
// Generators
// -----------------------------

// A small alphabet keeps random words likely to appear in random grids.
fn gen_letter() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['A', 'B', 'C'])
}

fn gen_grid() -> impl Strategy<Value = Vec<String>> {
    (1usize..5, 1usize..5).prop_flat_map(|(height, width)| {
        prop::collection::vec(
            prop::collection::vec(gen_letter(), width).prop_map(|row| row.into_iter().collect::<String>()),
            height,
        )
    })
}

fn gen_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(gen_letter(), 1..6).prop_map(|w| w.into_iter().collect::<String>()),
        0..20,
    )
}

// -----------------------------
// Reference check
// -----------------------------

// Does some path of distinct, 8-adjacent cells spell `word`?
fn spells(grid: &Grid, word: &[char]) -> bool {
    let mut used = vec![false; grid.len()];
    (0..grid.height() as isize)
        .flat_map(|r| (0..grid.width() as isize).map(move |c| (r, c)))
        .any(|(r, c)| walk(grid, word, r, c, &mut used))
}

fn walk(grid: &Grid, word: &[char], row: isize, col: isize, used: &mut [bool]) -> bool {
    let Some((&first, rest)) = word.split_first() else {
        return true;
    };
    if grid.get(row, col) != Some(first) {
        return false;
    }
    let idx = row as usize * grid.width() + col as usize;
    if used[idx] {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    used[idx] = true;
    let mut hit = false;
    'outer: for dr in -1..=1 {
        for dc in -1..=1 {
            if (dr, dc) != (0, 0) && walk(grid, rest, row + dr, col + dc, used) {
                hit = true;
                break 'outer;
            }
        }
    }
    used[idx] = false;
    hit
}

proptest! {
    #[test]
    fn prop_scan_matches_path_check(rows in gen_grid(), words in gen_words()) {
        let grid = Grid::from_rows(&rows).unwrap();
        let dict = PrefixDictionary::build(&words, MIN_WORD_LENGTH);

        let found: HashSet<String> = scan_all(&grid, &dict).words.into_iter().collect();
        let expected: HashSet<String> = words
            .iter()
            .filter(|w| w.chars().count() >= MIN_WORD_LENGTH)
            .filter(|w| spells(&grid, &w.chars().collect::<Vec<_>>()))
            .cloned()
            .collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_results_are_distinct(rows in gen_grid(), words in gen_words()) {
        let grid = Grid::from_rows(&rows).unwrap();
        let dict = PrefixDictionary::build(&words, MIN_WORD_LENGTH);
        let result = scan_all(&grid, &dict);

        let distinct: HashSet<&str> = result.words.iter().map(String::as_str).collect();
        prop_assert_eq!(distinct.len(), result.words.len());
    }

    #[test]
    fn prop_dictionary_ignores_insertion_order(
        (words, shuffled) in gen_words().prop_flat_map(|w| (Just(w.clone()), Just(w).prop_shuffle()))
    ) {
        prop_assert_eq!(
            PrefixDictionary::build(&words, MIN_WORD_LENGTH),
            PrefixDictionary::build(&shuffled, MIN_WORD_LENGTH)
        );
    }

    #[test]
    fn prop_scan_is_repeatable(rows in gen_grid(), words in gen_words()) {
        let grid = Grid::from_rows(&rows).unwrap();
        let dict = PrefixDictionary::build(&words, MIN_WORD_LENGTH);
        prop_assert_eq!(scan_all(&grid, &dict).words, scan_all(&grid, &dict).words);
    }

    #[test]
    fn prop_depth_limit_only_drops_long_words(rows in gen_grid(), words in gen_words(), depth in 1usize..6) {
        let grid = Grid::from_rows(&rows).unwrap();
        let dict = PrefixDictionary::build(&words, MIN_WORD_LENGTH);

        let full: HashSet<String> = scan_all(&grid, &dict).words.into_iter().collect();
        let limited: HashSet<String> =
            scan_all_with(&grid, &dict, &ScanOptions::default().with_max_depth(depth), |_| {})
                .words
                .into_iter()
                .collect();
        let expected: HashSet<String> = full.into_iter().filter(|w| w.chars().count() <= depth).collect();

        prop_assert_eq!(limited, expected);
    }
}
