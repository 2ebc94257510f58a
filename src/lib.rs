//! Prefix Tree Library
//!
//! An in-memory ordered prefix tree (trie) over `char` symbols, with
//! bidirectional cursors and a string-keyed map overlay.
//!
//! # Architecture
//!
//! - [`tree::Trie`] owns its nodes in an arena; children are owned through
//!   ordered edge maps and parents are plain indices.
//! - [`tree::Cursor`] walks the tree in lexicographic pre-order, forwards or
//!   backwards, over inserted keys only or over every prefix.
//! - [`tree::KeyedTrie`] stores a value on terminal nodes and reuses the same
//!   navigation and pruning code.
//! - [`config`] and [`logging`] provide the settings and `tracing` setup
//!   around the tree; [`error`] collects the error types.

pub mod config;
pub mod error;
pub mod logging;
pub mod tree;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use crate::config::{Settings, TreeConfig};
pub use crate::tree::{Cursor, KeyedCursor, KeyedTrie, PrefixTreeError, PrefixTreeResult, Trie};

/// Version information for the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
