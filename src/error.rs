//! Error types for password generation.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by an external collaborator (dictionary, breach
/// database, sentence generator).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid service response: {0}")]
    InvalidResponse(String),
    #[error("Service I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a word list file.
#[derive(Error, Debug)]
pub enum WordListError {
    #[error("Word list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read word list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Word list file is empty")]
    EmptyFile,
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Character pool has no usable characters")]
    EmptyPool,
    #[error("Character class {index} is empty after exclusion filtering")]
    EmptyClass { index: usize },
    #[error("Missing collaborator: {0}")]
    MissingService(&'static str),
    #[error("{service} call failed: {source}")]
    Service {
        service: &'static str,
        #[source]
        source: ServiceError,
    },
    #[error("Repair pass '{pass}' did not converge after {passes} passes")]
    RepairDiverged { pass: &'static str, passes: usize },
    #[error("No acceptable password after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
    #[error("Generation cancelled")]
    Cancelled,
    #[error("Generation task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    WordList(#[from] WordListError),
}

impl GeneratorError {
    pub(crate) fn service(service: &'static str, source: ServiceError) -> Self {
        Self::Service { service, source }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
