//! Constraint-repairing password generator
//!
//! Passwords are drawn at random from configurable character classes, then
//! repaired until they satisfy the active rules: no touching duplicates, no
//! dictionary words, no excluded substrings, every class represented. A
//! breach checker has the final word; a rejected password is regenerated
//! from scratch.
//!
//! # Features
//!
//! - `async` (default): Enables concurrent generation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_MIN_LEN`, `PWD_MAX_LEN`, `PWD_FIXED_LEN`: password length
//! - `PWD_EXCLUDED_CHARS`: characters never used
//! - `PWD_EXCLUDED_WORDS_PATH`: file of substrings never used
//! - `PWD_DICTIONARY_PATH`: word list for [`WordListDictionary`]
//!   (default: `./assets/words.txt`)
//! - `PWD_BREACH_LIST_PATH`: password list for [`CommonPasswordList`]
//!   (default: `./assets/10k-most-common.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_generator::{
//!     CommonPasswordList, GenerationMode, Generator, GeneratorConfig, PasswordSet,
//!     WordListDictionary,
//! };
//! use secrecy::ExposeSecret;
//!
//! let mut config = GeneratorConfig::from_env().expect("Invalid configuration");
//! config.remove_repeating = true;
//! config.ensure_proportions = true;
//!
//! let generator = Generator::builder(config)
//!     .dictionary(WordListDictionary::from_env().expect("Failed to load dictionary"))
//!     .breach_checker(CommonPasswordList::from_env().expect("Failed to load breach list"))
//!     .build()
//!     .expect("Failed to build generator");
//!
//! let mut passwords = PasswordSet::new();
//! generator
//!     .fill_secure(&mut passwords, GenerationMode::Human, 3)
//!     .expect("Generation failed");
//!
//! for password in passwords.all() {
//!     println!("{}", password.expose_secret());
//! }
//! ```

pub use secrecy::SecretString;

mod candidate;
mod config;
mod error;
mod exclusion;
mod generator;
mod mutator;
mod password_set;
mod pool;
mod services;
mod wordlist;

pub mod repair;

#[cfg(feature = "async")]
mod concurrent;

// Public API
pub use candidate::{Candidate, Span};
pub use config::{AttemptLimit, GeneratorConfig};
pub use error::{GeneratorError, Result, ServiceError, WordListError};
pub use exclusion::{COMMON_PASSWORDS, ExclusionSet};
pub use generator::{Attempt, GenerationMode, Generator, GeneratorBuilder, Rejection};
pub use mutator::Mutator;
pub use password_set::PasswordSet;
pub use pool::{CharacterClass, CharacterPool, ClassPreset};
pub use repair::{RepairConstraint, RepairLimit};
pub use services::{BreachChecker, CommonPasswordList, Dictionary, SentenceSource, WordListDictionary};

#[cfg(feature = "async")]
pub use concurrent::{generate_concurrent, generate_password_tx};
