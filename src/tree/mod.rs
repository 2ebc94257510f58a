//! Ordered prefix tree.
//!
//! A [`Trie`] stores keys as paths of symbols from a root node to a node
//! marked terminal. Children are kept in ascending symbol order, so walking
//! the tree in pre-order yields keys in lexicographic order. Traversal is
//! done with a [`Cursor`], which can step forwards and backwards either over
//! inserted keys only or over every prefix node.
//!
//! The node type is generic over a payload. A plain `Trie` carries `()`;
//! [`KeyedTrie`] carries an optional value per node and reuses all of the
//! navigation and pruning logic unchanged.
//!
//! # Example
//!
//! ```
//! use prefix_tree::Trie;
//!
//! let mut trie = Trie::new();
//! assert!(trie.insert("abc"));
//! assert!(trie.insert("abcdef"));
//! assert!(trie.insert("def"));
//!
//! assert!(trie.exists("abc", true));
//! assert!(trie.exists("ab", false));
//! assert!(!trie.exists("ab", true));
//!
//! let keys: Vec<String> = trie.keys().collect();
//! assert_eq!(keys, ["abc", "abcdef", "def"]);
//!
//! trie.remove("abcdef");
//! assert!(!trie.exists("abcd", false));
//! ```
//!
//! # Cursor validity
//!
//! A cursor borrows the tree it walks. Inserting or removing keys while a
//! cursor is alive is rejected by the borrow checker, which is how this
//! crate enforces that structural mutation invalidates outstanding cursors.

mod cursor;
mod error;
mod keyed;
mod node;

pub use cursor::{Cursor, Keys, PrefixKeys, Prefixes};
pub use error::{PrefixTreeError, PrefixTreeResult};
pub use keyed::{Iter, KeyedCursor, KeyedTrie};
pub use node::{Node, NodeId, NodeView};

use crate::config::TreeConfig;
use node::NodeArena;
use tracing::{debug, trace, warn};

/// Ordered prefix tree over `char` symbols.
///
/// `P` is the payload every node carries. All nodes of one tree are built by
/// the same construction hook and therefore share this type.
#[derive(Debug, Clone)]
pub struct Trie<P = ()> {
    /// Node storage; slot 0 is the root
    nodes: NodeArena<P>,

    /// Number of terminal nodes
    len: usize,

    /// Configuration options
    config: TreeConfig,
}

impl Trie {
    /// Creates a new empty `Trie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates a new empty `Trie` with the specified configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self::build(config)
    }
}

impl<P: Default> Trie<P> {
    pub(crate) fn build(config: TreeConfig) -> Self {
        Self {
            nodes: NodeArena::with_capacity(config.initial_capacity),
            len: 0,
            config,
        }
    }

    /// Inserts a key.
    ///
    /// Re-inserting a key that is already present succeeds and changes
    /// nothing.
    ///
    /// # Returns
    ///
    /// `false` only if the key is invalid (longer than
    /// [`TreeConfig::max_key_len`]), `true` otherwise.
    pub fn insert(&mut self, key: &str) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Inserts a key, reporting why it was rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The key was not present before.
    /// * `Ok(false)` - The key was already present.
    /// * `Err(PrefixTreeError::KeyTooLong)` - The key is invalid.
    pub fn try_insert(&mut self, key: &str) -> PrefixTreeResult<bool> {
        self.append_node(key).map(|(_, is_new)| is_new)
    }

    /// Walks `key` from the root, creating missing nodes, and marks the
    /// destination terminal.
    pub(crate) fn append_node(&mut self, key: &str) -> PrefixTreeResult<(NodeId, bool)> {
        if let Err(e) = self.check_key(key) {
            warn!(error = %e, "Rejected key on insert");
            return Err(e);
        }

        let mut current = NodeId::ROOT;
        let mut created = 0usize;
        for symbol in key.chars() {
            current = match self.nodes[current].child(symbol) {
                Some(next) => next,
                None => {
                    let next = self.new_node(current);
                    self.nodes[current].children.insert(symbol, next);
                    created += 1;
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        let is_new = !node.terminal;
        node.terminal = true;
        if is_new {
            self.len += 1;
        }

        trace!(key, created, is_new, "Inserted key");
        Ok((current, is_new))
    }

    /// Node construction hook. Every node of the tree is created here.
    fn new_node(&mut self, parent: NodeId) -> NodeId {
        self.nodes.alloc(Node::new(Some(parent)))
    }

    /// Removes a key.
    ///
    /// Removing an absent key, or a prefix that was never inserted, is a
    /// no-op. Otherwise the terminal mark is cleared and every node that is
    /// left without children and without a terminal mark is erased, walking
    /// up until a terminal node, a node with other children, or the root.
    ///
    /// # Returns
    ///
    /// `true` if a key was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_node(key).is_some()
    }

    /// Clears the terminal mark of `key` and prunes dead ancestors.
    ///
    /// Returns the payload taken from the unmarked node.
    pub(crate) fn remove_node(&mut self, key: &str) -> Option<P> {
        let target = self.resolve(key)?;
        let node = &mut self.nodes[target];
        if !node.terminal {
            return None;
        }

        node.terminal = false;
        let payload = std::mem::take(&mut node.payload);
        self.len -= 1;

        let pruned = self.prune(target, key);
        debug!(key, pruned, "Removed key");
        Some(payload)
    }

    /// Erases dead nodes from `start` upwards. `key` spells the path from
    /// the root to `start`.
    fn prune(&mut self, start: NodeId, key: &str) -> usize {
        let mut symbols = key.chars().rev();
        let mut current = start;
        let mut pruned = 0;

        while self.nodes[current].is_dead() {
            let (Some(parent), Some(symbol)) = (self.nodes[current].parent, symbols.next()) else {
                break;
            };
            self.nodes[parent].children.remove(&symbol);
            let released = self.nodes.release(current);
            debug_assert!(released.is_some(), "stale node id during prune");
            pruned += 1;
            current = parent;
        }

        pruned
    }

    /// Removes every key. The root keeps its identity.
    pub fn clear(&mut self) {
        let removed = self.len;
        self.nodes.reset();
        self.len = 0;
        debug!(removed, "Cleared prefix tree");
    }
}

impl<P> Trie<P> {
    /// Checks whether a key or a prefix exists.
    ///
    /// # Arguments
    ///
    /// * `key` - Key or prefix. The empty key denotes the root.
    /// * `finite_only` - If true, only inserted keys match; otherwise any
    ///   existing prefix matches.
    pub fn exists(&self, key: &str, finite_only: bool) -> bool {
        self.resolve(key)
            .is_some_and(|id| !finite_only || self.nodes[id].terminal)
    }

    /// Finds a key or prefix.
    ///
    /// # Returns
    ///
    /// A cursor positioned at the node for `key`, traversing in the given
    /// mode, or the end sentinel if there is no such node or the node is not
    /// a stopping point in that mode.
    pub fn find(&self, key: &str, finite_only: bool) -> Cursor<'_, P> {
        match self.resolve(key) {
            Some(id) => {
                let cursor = Cursor::at(self, id, finite_only, key.to_string());
                if cursor.qualifies() {
                    cursor
                } else {
                    self.end()
                }
            }
            None => self.end(),
        }
    }

    /// Returns a cursor at the first qualifying node in lexicographic order.
    ///
    /// With `finite_only` the cursor visits inserted keys; otherwise it
    /// visits every stored prefix. The root, spelling the empty prefix,
    /// counts only once `""` has been inserted.
    pub fn begin(&self, finite_only: bool) -> Cursor<'_, P> {
        let mut cursor = Cursor::at(self, NodeId::ROOT, finite_only, String::new());
        if !cursor.qualifies() {
            cursor.advance_forward();
        }
        cursor
    }

    /// Returns a cursor at the last qualifying node in lexicographic order.
    pub fn last(&self, finite_only: bool) -> Cursor<'_, P> {
        let mut cursor = Cursor::at(self, NodeId::ROOT, finite_only, String::new());
        cursor.descend_last(NodeId::ROOT);
        if !cursor.qualifies() {
            cursor.advance_backward();
        }
        cursor
    }

    /// Returns the end sentinel.
    pub fn end(&self) -> Cursor<'_, P> {
        Cursor::end(self)
    }

    /// Inserted keys in ascending order.
    pub fn keys(&self) -> Keys<'_, P> {
        Keys::new(self)
    }

    /// Every stored prefix in lexicographic pre-order. The empty prefix is
    /// included only when `""` was inserted.
    pub fn prefixes(&self) -> Prefixes<'_, P> {
        Prefixes::new(self)
    }

    /// Inserted keys starting with `prefix`, in ascending order.
    pub fn keys_with_prefix(&self, prefix: &str) -> PrefixKeys<'_, P> {
        let start = self
            .resolve(prefix)
            .map(|id| Cursor::at(self, id, true, prefix.to_string()));
        PrefixKeys::new(start, prefix)
    }

    /// Number of inserted keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key is inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// Configuration options of the tree.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Walks `key` from the root without creating anything.
    pub(crate) fn resolve(&self, key: &str) -> Option<NodeId> {
        self.check_key(key).ok()?;
        key.chars()
            .try_fold(NodeId::ROOT, |current, symbol| self.nodes[current].child(symbol))
    }

    fn check_key(&self, key: &str) -> PrefixTreeResult<()> {
        let max_len = self.config.max_key_len;
        // Byte length bounds the symbol count from above.
        if key.len() <= max_len {
            return Ok(());
        }
        let key_len = key.chars().count();
        if key_len > max_len {
            return Err(PrefixTreeError::KeyTooLong { key_len, max_len });
        }
        Ok(())
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id]
    }
}

impl<P: Default> Default for Trie<P> {
    fn default() -> Self {
        Self::build(TreeConfig::default())
    }
}

impl<K: AsRef<str>> FromIterator<K> for Trie {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<K: AsRef<str>> Extend<K> for Trie {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key.as_ref());
        }
    }
}
