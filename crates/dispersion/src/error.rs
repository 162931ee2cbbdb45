//! Error types for the dispersion engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispersionError {
    /// A forest file line with the wrong number of tokens.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Fewer than two nodes leave no pairwise distance to maximize.
    #[error("target must select at least 2 nodes, got {k}")]
    InvalidTarget { k: usize },

    #[error("unknown method `{0}`, expected `greedy` or `optimal`")]
    UnknownMethod(String),
}

pub type Result<T> = std::result::Result<T, DispersionError>;
