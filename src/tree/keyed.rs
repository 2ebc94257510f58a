//! Ordered string-keyed map built on the prefix tree.
//!
//! [`KeyedTrie`] is a [`Trie`] whose nodes carry an `Option<V>`. Only
//! terminal nodes hold `Some`, so reading a value through a cursor that
//! stopped at a bare prefix reports an error instead of handing out stale
//! data.
//!
//! # Example
//!
//! ```
//! use prefix_tree::KeyedTrie;
//!
//! let mut map = KeyedTrie::new();
//! assert!(map.insert("abc", 100));
//! assert!(map.insert("abc", 200));
//!
//! let it = map.find("abc");
//! assert_ne!(it, map.end());
//! assert_eq!(it.get_value(), Ok(&200));
//! ```

use super::{Cursor, NodeView, PrefixTreeError, PrefixTreeResult, Trie};
use crate::config::TreeConfig;
use std::fmt;
use std::iter::FusedIterator;

/// Ordered map from string keys to values.
#[derive(Debug, Clone)]
pub struct KeyedTrie<V> {
    inner: Trie<Option<V>>,
}

impl<V> KeyedTrie<V> {
    /// Creates a new empty map with default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates a new empty map with the specified configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            inner: Trie::build(config),
        }
    }

    /// Inserts a key-value pair, overwriting the value of an existing key.
    ///
    /// # Returns
    ///
    /// `false` only if the key is invalid, in which case nothing is stored.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        self.try_insert(key, value).is_ok()
    }

    /// Inserts a key-value pair, reporting why the key was rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(old))` - The key existed; `old` is the replaced value.
    /// * `Ok(None)` - The key is new.
    /// * `Err(PrefixTreeError::KeyTooLong)` - The key is invalid.
    pub fn try_insert(&mut self, key: &str, value: V) -> PrefixTreeResult<Option<V>> {
        let (id, _) = self.inner.append_node(key)?;
        Ok(self.inner.node_mut(id).payload.replace(value))
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let id = self.inner.resolve(key)?;
        self.inner.node(id).payload.as_ref()
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let id = self.inner.resolve(key)?;
        self.inner.node_mut(id).payload.as_mut()
    }

    /// Removes `key`, pruning nodes that no longer lead to any key.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.inner.remove_node(key).flatten()
    }

    /// Checks whether a key or a prefix exists.
    pub fn exists(&self, key: &str, finite_only: bool) -> bool {
        self.inner.exists(key, finite_only)
    }

    /// Finds an inserted key.
    ///
    /// # Returns
    ///
    /// A terminal-only cursor at `key`, or the end sentinel.
    pub fn find(&self, key: &str) -> KeyedCursor<'_, V> {
        KeyedCursor {
            cursor: self.inner.find(key, true),
        }
    }

    /// Returns a cursor at the first qualifying node in lexicographic order.
    pub fn begin(&self, finite_only: bool) -> KeyedCursor<'_, V> {
        KeyedCursor {
            cursor: self.inner.begin(finite_only),
        }
    }

    /// Returns a cursor at the last qualifying node in lexicographic order.
    pub fn last(&self, finite_only: bool) -> KeyedCursor<'_, V> {
        KeyedCursor {
            cursor: self.inner.last(finite_only),
        }
    }

    /// Returns the end sentinel.
    pub fn end(&self) -> KeyedCursor<'_, V> {
        KeyedCursor {
            cursor: self.inner.end(),
        }
    }

    /// Key-value pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            front: self.begin(true),
            back: self.last(true),
            remaining: self.len(),
        }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> super::Keys<'_, Option<V>> {
        self.inner.keys()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every key and value.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Configuration options of the underlying tree.
    pub fn config(&self) -> &TreeConfig {
        self.inner.config()
    }
}

impl<V> Default for KeyedTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for KeyedTrie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = KeyedTrie::new();
        map.extend(iter);
        map
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for KeyedTrie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<'a, V> IntoIterator for &'a KeyedTrie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Cursor over a [`KeyedTrie`] with access to the stored values.
pub struct KeyedCursor<'a, V> {
    cursor: Cursor<'a, Option<V>>,
}

impl<'a, V> KeyedCursor<'a, V> {
    /// Moves to the next qualifying node in lexicographic order.
    pub fn advance_forward(&mut self) -> &mut Self {
        self.cursor.advance_forward();
        self
    }

    /// Moves to the previous qualifying node in lexicographic order.
    pub fn advance_backward(&mut self) -> &mut Self {
        self.cursor.advance_backward();
        self
    }

    /// The symbols from the root to the current node.
    pub fn get_key(&self) -> PrefixTreeResult<&str> {
        self.cursor.get_key()
    }

    /// The value stored at the current node.
    ///
    /// Fails with [`PrefixTreeError::NoCurrentElement`] on the end sentinel
    /// and with [`PrefixTreeError::NotTerminal`] at a node that only exists
    /// as a prefix of other keys.
    pub fn get_value(&self) -> PrefixTreeResult<&'a V> {
        let node = self.cursor.get_node()?;
        node.payload()
            .as_ref()
            .ok_or_else(|| {
                PrefixTreeError::NotTerminal(self.get_key().unwrap_or_default().to_string())
            })
    }

    /// A read-only view of the current node.
    pub fn get_node(&self) -> PrefixTreeResult<NodeView<'a, Option<V>>> {
        self.cursor.get_node()
    }

    /// Returns `true` for the end sentinel.
    pub fn is_end(&self) -> bool {
        self.cursor.is_end()
    }

    /// The underlying structural cursor.
    pub fn as_cursor(&self) -> &Cursor<'a, Option<V>> {
        &self.cursor
    }
}

impl<V> Clone for KeyedCursor<'_, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<V> PartialEq for KeyedCursor<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor
    }
}

impl<V> Eq for KeyedCursor<'_, V> {}

impl<V> fmt::Debug for KeyedCursor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyedCursor").field(&self.cursor).finish()
    }
}

/// Iterator over key-value pairs, created by [`KeyedTrie::iter`].
pub struct Iter<'a, V> {
    front: KeyedCursor<'a, V>,
    back: KeyedCursor<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = (
            self.front.get_key().ok()?.to_string(),
            self.front.get_value().ok()?,
        );
        self.front.advance_forward();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = (
            self.back.get_key().ok()?.to_string(),
            self.back.get_value().ok()?,
        );
        self.back.advance_backward();
        self.remaining -= 1;
        Some(item)
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_find() {
        let mut map = KeyedTrie::new();
        assert!(map.insert("abc", 100));
        assert!(map.insert("def", 200));
        assert!(map.insert("abcd", 300));
        assert!(map.insert("abcdef", 400));
        assert!(map.insert("de1", 500));

        for (key, value) in [
            ("abc", 100),
            ("def", 200),
            ("abcd", 300),
            ("abcdef", 400),
            ("de1", 500),
        ] {
            let it = map.find(key);
            assert_ne!(it, map.end());
            assert_eq!(it.get_value(), Ok(&value));
        }

        assert_eq!(map.find("ab"), map.end());
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_reinsert_overwrites() {
        let mut map = KeyedTrie::new();
        assert_eq!(map.try_insert("abc", 100), Ok(None));
        assert_eq!(map.try_insert("abc", 200), Ok(Some(100)));
        assert_eq!(map.find("abc").get_value(), Ok(&200));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_prefix_node_has_no_value() {
        let map: KeyedTrie<i32> = [("abc", 1)].into_iter().collect();

        let mut it = map.begin(false);
        assert_eq!(it.get_key(), Ok("a"));
        assert_eq!(
            it.get_value(),
            Err(PrefixTreeError::NotTerminal("a".to_string()))
        );

        it.advance_forward().advance_forward();
        assert_eq!(it.get_value(), Ok(&1));

        it.advance_forward();
        assert_eq!(it.get_value(), Err(PrefixTreeError::NoCurrentElement));
    }

    #[test]
    fn test_remove_returns_value_and_prunes() {
        let mut map: KeyedTrie<&str> = [("ab", "x"), ("abcd", "y")].into_iter().collect();

        assert_eq!(map.remove("abcd"), Some("y"));
        assert_eq!(map.remove("abcd"), None);
        assert!(!map.exists("abc", false));
        assert_eq!(map.get("ab"), Some(&"x"));

        assert_eq!(map.remove("a"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_removed_prefix_keeps_no_stale_value() {
        let mut map: KeyedTrie<u8> = [("a", 1), ("ab", 2)].into_iter().collect();
        assert_eq!(map.remove("a"), Some(1));

        // The node survives as a prefix of "ab" but no longer holds a value
        assert!(map.exists("a", false));
        assert_eq!(map.get("a"), None);
        assert!(map.find("a").is_end());
    }

    #[test]
    fn test_get_mut_and_iter() {
        let mut map: KeyedTrie<u32> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        if let Some(v) = map.get_mut("b") {
            *v *= 10;
        }

        let pairs: Vec<(String, u32)> = map.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            pairs,
            [("a".to_string(), 1), ("b".to_string(), 20), ("c".to_string(), 3)]
        );

        let last = map.iter().next_back().map(|(k, _)| k);
        assert_eq!(last.as_deref(), Some("c"));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
