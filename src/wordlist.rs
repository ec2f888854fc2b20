//! Word list file loading
//!
//! Shared by the exclusion set, the dictionary and the breach list. Files
//! hold one entry per line; entries are trimmed and blank lines skipped.

use std::path::{Path, PathBuf};

use crate::error::WordListError;

/// Environment variable naming the excluded words file.
pub const EXCLUDED_WORDS_PATH_ENV: &str = "PWD_EXCLUDED_WORDS_PATH";
/// Environment variable naming the dictionary file.
pub const DICTIONARY_PATH_ENV: &str = "PWD_DICTIONARY_PATH";
/// Environment variable naming the breach list file.
pub const BREACH_LIST_PATH_ENV: &str = "PWD_BREACH_LIST_PATH";

pub const DEFAULT_DICTIONARY_PATH: &str = "./assets/words.txt";
pub const DEFAULT_BREACH_LIST_PATH: &str = "./assets/10k-most-common.txt";

/// Resolves a word list path.
///
/// Priority:
/// 1. Environment variable `env_key`
/// 2. `default`
pub fn resolve_path(env_key: &str, default: &str) -> PathBuf {
    std::env::var(env_key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Reads the entries of a word list file, keeping file order.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File has no non-blank line
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordListError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Word list loading FAILED: FileNotFound {:?}", path);
        return Err(WordListError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Word list loading FAILED: Empty file {:?}", path);
        return Err(WordListError::EmptyFile);
    }

    let entries: Vec<String> = content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    #[cfg(feature = "tracing")]
    tracing::info!("Word list loaded: {} entries from {:?}", entries.len(), path);

    Ok(entries)
}
