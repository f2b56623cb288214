//! Error types for the fallible edges of the crate
//!
//! Compiling notation never fails. Loading configuration, reading files and
//! picking an output format can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MightyMathError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Format(#[from] crate::math::formats::FormatError),
    #[error("Unknown display mode '{0}' (expected 'inline' or 'block')")]
    UnknownDisplayMode(String),
}

impl MightyMathError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        MightyMathError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MightyMathError>;
