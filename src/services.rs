//! External collaborators consumed by the generator.
//!
//! The generator only sees these traits; implementations may sit on a
//! network boundary. A failing call is reported as [`ServiceError`] and is
//! never interpreted as a negative answer.

use std::collections::HashSet;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ServiceError, WordListError};
use crate::wordlist::{
    self, BREACH_LIST_PATH_ENV, DEFAULT_BREACH_LIST_PATH, DEFAULT_DICTIONARY_PATH,
    DICTIONARY_PATH_ENV,
};

/// Natural-language word recognition.
pub trait Dictionary: Send + Sync {
    /// Case-insensitive lookup.
    fn is_known_word(&self, token: &str) -> Result<bool, ServiceError>;
}

/// Known-breach password lookup.
pub trait BreachChecker: Send + Sync {
    fn is_compromised(&self, candidate: &SecretString) -> Result<bool, ServiceError>;
}

/// Passphrase-style candidate source.
pub trait SentenceSource: Send + Sync {
    fn generate_sentence(&self) -> Result<String, ServiceError>;
}

fn lowercase_set(entries: Vec<String>) -> HashSet<String> {
    entries.into_iter().map(|e| e.to_lowercase()).collect()
}

/// Dictionary backed by an in-memory word list.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        Ok(Self {
            words: lowercase_set(wordlist::load_entries(path)?),
        })
    }

    /// Loads from `PWD_DICTIONARY_PATH`, default `./assets/words.txt`.
    pub fn from_env() -> Result<Self, WordListError> {
        Self::from_path(wordlist::resolve_path(
            DICTIONARY_PATH_ENV,
            DEFAULT_DICTIONARY_PATH,
        ))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn is_known_word(&self, token: &str) -> Result<bool, ServiceError> {
        Ok(self.words.contains(&token.to_lowercase()))
    }
}

/// Breach checker backed by a list of common passwords.
#[derive(Debug, Clone, Default)]
pub struct CommonPasswordList {
    passwords: HashSet<String>,
}

impl CommonPasswordList {
    pub fn new<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            passwords: passwords
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        Ok(Self {
            passwords: lowercase_set(wordlist::load_entries(path)?),
        })
    }

    /// Loads from `PWD_BREACH_LIST_PATH`, default
    /// `./assets/10k-most-common.txt`.
    pub fn from_env() -> Result<Self, WordListError> {
        Self::from_path(wordlist::resolve_path(
            BREACH_LIST_PATH_ENV,
            DEFAULT_BREACH_LIST_PATH,
        ))
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl BreachChecker for CommonPasswordList {
    fn is_compromised(&self, candidate: &SecretString) -> Result<bool, ServiceError> {
        Ok(self
            .passwords
            .contains(&candidate.expose_secret().to_lowercase()))
    }
}
