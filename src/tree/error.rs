//! Error types for prefix tree operations.

/// Errors that can occur in prefix tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixTreeError {
    /// A cursor at the end sentinel was dereferenced.
    #[error("Cursor has no current element")]
    NoCurrentElement,

    /// A value was read from a node that only exists as a prefix.
    #[error("Node for key '{0}' is not terminal")]
    NotTerminal(String),

    /// A key exceeds the configured maximum length.
    #[error("Key of {key_len} symbols exceeds maximum key length of {max_len}")]
    KeyTooLong {
        /// Length of the rejected key, in symbols.
        key_len: usize,
        /// The configured maximum.
        max_len: usize,
    },
}

/// Result type for prefix tree operations.
pub type PrefixTreeResult<T> = Result<T, PrefixTreeError>;
