//! `dictionary` — prefix-aware word dictionary used to prune the grid search.
//!
//! Every prefix of every indexed word is stored as a key, tagged with a [`WordType`]
//! telling the search whether the prefix is a word, can be extended into a word, or both.
//! A lookup that comes back `None` means no indexed word starts with that string, so the
//! search can abandon the whole branch.
//!
//! ```
//! use wordgrid::dictionary::{PrefixDictionary, WordType, MIN_WORD_LENGTH};
//!
//! let dict = PrefixDictionary::build(["CAT", "CA"], MIN_WORD_LENGTH);
//! assert_eq!(dict.lookup("C"), Some(WordType::PartialOnly));
//! assert_eq!(dict.lookup("CA"), Some(WordType::FullWordAndPartial));
//! assert_eq!(dict.lookup("CAT"), Some(WordType::FullWord));
//! assert_eq!(dict.lookup("DOG"), None);
//! ```

use std::collections::HashMap;

/// Words shorter than this are never indexed.
pub const MIN_WORD_LENGTH: usize = 2;

/// Classification of a stored prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordType {
    /// Strict prefix of at least one longer word, not a word itself.
    PartialOnly,
    /// A complete word that no longer word extends.
    FullWord,
    /// A complete word that is also a strict prefix of a longer word.
    FullWordAndPartial,
}

impl WordType {
    /// True if the prefix is itself a complete word.
    #[must_use]
    pub fn is_full_word(self) -> bool {
        matches!(self, WordType::FullWord | WordType::FullWordAndPartial)
    }

    /// True if some longer word starts with the prefix.
    #[must_use]
    pub fn is_partial(self) -> bool {
        matches!(self, WordType::PartialOnly | WordType::FullWordAndPartial)
    }

    // Classifications only ever move towards `FullWordAndPartial`, which makes the
    // result independent of insertion order.
    fn upgraded(self, terminal: bool) -> WordType {
        match (self, terminal) {
            (WordType::PartialOnly, true) | (WordType::FullWord, false) => WordType::FullWordAndPartial,
            (unchanged, _) => unchanged,
        }
    }
}

/// Mapping from every prefix of every indexed word to its [`WordType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixDictionary {
    prefixes: HashMap<String, WordType>,
    min_length: usize,
    num_words: usize,
    longest_word_len: usize,
}

impl PrefixDictionary {
    /// Create an empty dictionary that ignores words shorter than `min_length` chars.
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self {
            prefixes: HashMap::new(),
            min_length,
            num_words: 0,
            longest_word_len: 0,
        }
    }

    /// Build a dictionary from `words`, skipping words shorter than `min_length`.
    ///
    /// Duplicate words are harmless: they leave every classification unchanged.
    pub fn build<I, S>(words: I, min_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new(min_length);
        for word in words {
            dict.insert(word.as_ref());
        }
        log::debug!(
            "built prefix dictionary: {} words, {} prefixes, longest word {} chars",
            dict.num_words,
            dict.prefixes.len(),
            dict.longest_word_len
        );
        dict
    }

    /// Index a single word. Returns `false` if the word was too short to be indexed.
    pub fn insert(&mut self, word: &str) -> bool {
        let word_len = word.chars().count();
        if word_len == 0 || word_len < self.min_length {
            return false;
        }

        // Byte offsets of every prefix end, so multi-byte chars are never split.
        let ends = word.char_indices().skip(1).map(|(i, _)| i).chain(std::iter::once(word.len()));
        for (i, end) in ends.enumerate() {
            let terminal = i + 1 == word_len;
            let prefix = &word[..end];
            match self.prefixes.get_mut(prefix) {
                Some(existing) => *existing = existing.upgraded(terminal),
                None => {
                    let word_type = if terminal { WordType::FullWord } else { WordType::PartialOnly };
                    self.prefixes.insert(prefix.to_string(), word_type);
                }
            }
        }

        self.num_words += 1;
        self.longest_word_len = self.longest_word_len.max(word_len);
        true
    }

    /// Classification of `prefix`, or `None` if no indexed word starts with it.
    #[must_use]
    pub fn lookup(&self, prefix: &str) -> Option<WordType> {
        self.prefixes.get(prefix).copied()
    }

    /// Number of distinct prefixes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Number of words accepted by [`insert`](Self::insert), duplicates included.
    #[must_use]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Length in chars of the longest indexed word (0 when empty).
    #[must_use]
    pub fn longest_word_len(&self) -> usize {
        self.longest_word_len
    }

    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}
