//! Forbidden substrings
//!
//! Entries are matched case-sensitively as substrings of the candidate.

use std::path::Path;

use crate::error::WordListError;
use crate::wordlist::{self, EXCLUDED_WORDS_PATH_ENV};

/// Frequently used passwords, excluded unless the caller supplies its own
/// list.
pub const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "123456790",
    "qwerty",
    "12345678",
    "111111",
    "1234567890",
    "1234567",
    "password",
    "123123",
    "987654321",
    "qwertyuiop",
    "mynoob",
    "123321",
    "666666",
    "18atcskd2w",
    "7777777",
    "1q2w3e4r",
    "654321",
    "555555",
    "3rjs1la7qe",
    "google",
    "1q2w3e4r5t",
    "123qwe",
    "zxcvbnm",
    "1q2w3e",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    words: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    /// The built-in list of common passwords.
    pub fn common() -> Self {
        Self::new(COMMON_PASSWORDS.iter().copied())
    }

    /// Loads entries from a file, one per line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        Ok(Self::new(wordlist::load_entries(path)?))
    }

    /// Loads entries from the file named by `PWD_EXCLUDED_WORDS_PATH`.
    ///
    /// Returns `Ok(None)` when the variable is unset.
    pub fn from_env() -> Result<Option<Self>, WordListError> {
        match std::env::var(EXCLUDED_WORDS_PATH_ENV) {
            Ok(path) => Self::from_path(path).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Adds entries, skipping empty strings and duplicates.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let word = word.into();
            if !word.is_empty() && !self.words.contains(&word) {
                self.words.push(word);
            }
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if any excluded entry occurs inside `text`.
    ///
    /// Applied to a single letter run this answers "is or contains an
    /// excluded word"; applied to the whole candidate it answers whether the
    /// password is acceptable at all.
    pub fn contains_excluded(&self, text: &str) -> bool {
        self.words.iter().any(|word| text.contains(word.as_str()))
    }
}
