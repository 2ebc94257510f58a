//! Crate-level error handling.
//!
//! Each concern defines its own error enum; [`Error`] wraps them so that
//! callers mixing tree operations with configuration and logging setup can
//! propagate everything with `?`.

use thiserror::Error;

pub mod config;

pub use crate::tree::PrefixTreeError;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error enum for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors reported by tree and cursor operations.
    #[error("Prefix tree error: {0}")]
    Tree(#[from] PrefixTreeError),

    /// Errors installing the tracing subscriber.
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
