use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MrzError {
    #[error("Invalid MRZ character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The first column of line 1 or line 2 that breaks the TD1 column grammar.
///
/// This is a diagnostic value carried by a structural failure, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("line {line}, {field}: unexpected '{found}' at column {column}")]
pub struct GrammarViolation {
    pub line: u8,
    pub field: &'static str,
    pub column: usize,
    pub found: char,
}
