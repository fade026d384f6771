//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{}: configuration version {found} is not supported, expected {expected}", file_path.display())]
    UnsupportedVersion {
        file_path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("{}: {source}", file_path.display())]
    IoError {
        file_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("could not serialize the configuration: {0}")]
    SerializeError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid connection URI: {0}")]
    MissingEnvironmentVariable(#[from] crate::environment::Error),
}
