//! Generator configuration
//!
//! # Environment Variables
//!
//! [`GeneratorConfig::from_env`] starts from the defaults and applies:
//!
//! - `PWD_MIN_LEN`, `PWD_MAX_LEN`: length range
//! - `PWD_FIXED_LEN`: fixed length, overrides the range when set
//! - `PWD_EXCLUDED_CHARS`: characters removed from every class
//! - `PWD_EXCLUDED_WORDS_PATH`: excluded words file, one entry per line

use crate::error::{GeneratorError, Result};
use crate::exclusion::ExclusionSet;
use crate::pool::{CharacterClass, CharacterPool, ClassPreset};
use crate::repair::RepairLimit;

pub const DEFAULT_MIN_LEN: usize = 8;
pub const DEFAULT_MAX_LEN: usize = 16;

pub const MIN_LEN_ENV: &str = "PWD_MIN_LEN";
pub const MAX_LEN_ENV: &str = "PWD_MAX_LEN";
pub const FIXED_LEN_ENV: &str = "PWD_FIXED_LEN";
pub const EXCLUDED_CHARS_ENV: &str = "PWD_EXCLUDED_CHARS";

/// Upper bound on whole-candidate attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    /// Retry until a candidate is accepted.
    Unbounded,
    /// Fail with [`GeneratorError::AttemptsExhausted`] after this many.
    Attempts(usize),
}

impl AttemptLimit {
    pub(crate) fn allows(self, attempts: usize) -> bool {
        match self {
            AttemptLimit::Unbounded => true,
            AttemptLimit::Attempts(max) => attempts < max,
        }
    }
}

impl Default for AttemptLimit {
    fn default() -> Self {
        AttemptLimit::Attempts(1_000)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Ordered character classes. Order matters for coverage repair.
    pub usable_chars: Vec<CharacterClass>,
    /// Removed from every class when the pool is built.
    pub excluded_chars: Vec<char>,
    pub min_len: usize,
    pub max_len: usize,
    /// Overrides `min_len..=max_len` when set.
    pub fixed_len: Option<usize>,
    pub excluded_words: ExclusionSet,
    /// Direct mode: replace touching duplicates.
    pub remove_repeating: bool,
    /// Direct mode: replace dictionary words.
    pub remove_english: bool,
    /// Direct mode: require every class at least once.
    pub ensure_proportions: bool,
    /// Sentence mode: keep spaces between words.
    pub include_whitespace: bool,
    pub repair_limit: RepairLimit,
    pub attempt_limit: AttemptLimit,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::from_presets(&ClassPreset::ALL)
    }
}

impl GeneratorConfig {
    /// Default settings drawing from the given built-in classes.
    pub fn from_presets(presets: &[ClassPreset]) -> Self {
        Self {
            usable_chars: presets.iter().map(|p| (*p).into()).collect(),
            excluded_chars: Vec::new(),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            fixed_len: None,
            excluded_words: ExclusionSet::common(),
            remove_repeating: false,
            remove_english: false,
            ensure_proportions: false,
            include_whitespace: true,
            repair_limit: RepairLimit::default(),
            attempt_limit: AttemptLimit::default(),
        }
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(min_len) = env_usize(MIN_LEN_ENV)? {
            self.min_len = min_len;
        }
        if let Some(max_len) = env_usize(MAX_LEN_ENV)? {
            self.max_len = max_len;
        }
        if let Some(fixed_len) = env_usize(FIXED_LEN_ENV)? {
            self.fixed_len = Some(fixed_len);
        }
        if let Ok(chars) = std::env::var(EXCLUDED_CHARS_ENV) {
            self.excluded_chars = chars.chars().collect();
        }
        if let Some(words) = ExclusionSet::from_env()? {
            self.excluded_words = words;
        }
        Ok(self)
    }

    /// Removes one character from every class, e.g. the single quote.
    pub fn exclude_char(mut self, c: char) -> Self {
        if !self.excluded_chars.contains(&c) {
            self.excluded_chars.push(c);
        }
        self
    }

    pub fn with_fixed_len(mut self, len: usize) -> Self {
        self.fixed_len = Some(len);
        self
    }

    pub fn with_len_range(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self.fixed_len = None;
        self
    }

    pub fn with_excluded_words(mut self, words: ExclusionSet) -> Self {
        self.excluded_words = words;
        self
    }

    pub fn build_pool(&self) -> CharacterPool {
        CharacterPool::build(self.usable_chars.clone(), &self.excluded_chars)
    }

    /// Shortest length a generated candidate can have.
    pub fn shortest_len(&self) -> usize {
        self.fixed_len.unwrap_or(self.min_len)
    }

    pub fn validate(&self) -> Result<()> {
        if self.usable_chars.is_empty() {
            return Err(GeneratorError::EmptyPool);
        }
        if self.fixed_len == Some(0) {
            return Err(GeneratorError::InvalidConfig(
                "fixed length must be at least 1".to_string(),
            ));
        }
        // Sentence shaping reads the range even when a fixed length is set.
        if self.min_len < 1 {
            return Err(GeneratorError::InvalidConfig(
                "minimum length must be at least 1".to_string(),
            ));
        }
        if self.min_len > self.max_len {
            return Err(GeneratorError::InvalidConfig(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_len, self.max_len
            )));
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| GeneratorError::InvalidConfig(format!("{} is not a length: {:?}", key, value))),
        Err(_) => Ok(None),
    }
}
