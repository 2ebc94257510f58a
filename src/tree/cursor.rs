//! Bidirectional cursor over a prefix tree.
//!
//! A cursor walks the tree in lexicographic pre-order: a node is visited
//! before its descendants and siblings are visited in ascending symbol
//! order. Stepping backwards is the exact inverse of stepping forwards.
//!
//! In terminal-only mode a cursor stops only at inserted keys. In all-nodes
//! mode it stops at every node except the root, which spells the empty
//! prefix and is visited only once the empty key has been inserted.
//!
//! The cursor keeps the symbols from the root to its current node in a key
//! buffer, pushing on descent and popping on ascent, so the cost of a step
//! is bounded by the depth of the tree.

use super::{NodeId, NodeView, PrefixTreeError, PrefixTreeResult, Trie};
use std::fmt;
use std::iter::FusedIterator;

/// Position in a [`Trie`] traversal, or the end sentinel.
pub struct Cursor<'a, P> {
    trie: &'a Trie<P>,
    node: Option<NodeId>,
    finite_only: bool,
    key: String,
}

impl<'a, P> Cursor<'a, P> {
    pub(crate) fn at(trie: &'a Trie<P>, node: NodeId, finite_only: bool, key: String) -> Self {
        Self {
            trie,
            node: Some(node),
            finite_only,
            key,
        }
    }

    pub(crate) fn end(trie: &'a Trie<P>) -> Self {
        Self {
            trie,
            node: None,
            finite_only: false,
            key: String::new(),
        }
    }

    /// Moves to the next qualifying node in lexicographic order.
    ///
    /// Advancing past the last node turns the cursor into the end sentinel.
    /// Advancing the end sentinel does nothing.
    pub fn advance_forward(&mut self) -> &mut Self {
        self.advance(true);
        self
    }

    /// Moves to the previous qualifying node in lexicographic order.
    pub fn advance_backward(&mut self) -> &mut Self {
        self.advance(false);
        self
    }

    /// The symbols from the root to the current node.
    pub fn get_key(&self) -> PrefixTreeResult<&str> {
        match self.node {
            Some(_) => Ok(&self.key),
            None => Err(PrefixTreeError::NoCurrentElement),
        }
    }

    /// A read-only view of the current node.
    pub fn get_node(&self) -> PrefixTreeResult<NodeView<'a, P>> {
        let id = self.node.ok_or(PrefixTreeError::NoCurrentElement)?;
        Ok(NodeView {
            id,
            node: self.trie.node(id),
        })
    }

    /// Returns `true` for the end sentinel.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns `true` if the current node marks an inserted key.
    pub fn is_terminal(&self) -> bool {
        self.node.is_some_and(|id| self.trie.node(id).terminal)
    }

    /// Returns `true` if the cursor stops at inserted keys only.
    pub fn is_finite_only(&self) -> bool {
        self.finite_only
    }

    /// Number of symbols between the root and the current node.
    pub fn depth(&self) -> usize {
        self.key.chars().count()
    }

    pub(crate) fn qualifies(&self) -> bool {
        match self.node {
            Some(id) if self.finite_only => self.trie.node(id).terminal,
            Some(id) => id != NodeId::ROOT || self.trie.node(id).terminal,
            None => false,
        }
    }

    fn advance(&mut self, forward: bool) {
        while let Some(current) = self.node {
            self.node = if forward {
                self.step_forward(current)
            } else {
                self.step_backward(current)
            };
            if self.qualifies() {
                return;
            }
        }
        self.key.clear();
    }

    /// Pre-order successor: first child if any, otherwise the next sibling
    /// of the nearest ancestor that has one.
    fn step_forward(&mut self, current: NodeId) -> Option<NodeId> {
        let trie = self.trie;
        if let Some((symbol, child)) = trie.node(current).first_child(true) {
            self.key.push(symbol);
            return Some(child);
        }

        let mut node = current;
        loop {
            let parent = trie.node(node).parent?;
            let symbol = self.key.pop()?;
            if let Some((next, sibling)) = trie.node(parent).sibling_after(symbol, true) {
                self.key.push(next);
                return Some(sibling);
            }
            node = parent;
        }
    }

    /// Pre-order predecessor: the deepest last descendant of the previous
    /// sibling if there is one, otherwise the parent.
    fn step_backward(&mut self, current: NodeId) -> Option<NodeId> {
        let trie = self.trie;
        let parent = trie.node(current).parent?;
        let symbol = self.key.pop()?;
        match trie.node(parent).sibling_after(symbol, false) {
            Some((prev, sibling)) => {
                self.key.push(prev);
                Some(self.descend_last(sibling))
            }
            None => Some(parent),
        }
    }

    /// Follows the largest child edge from `start` down to a leaf and
    /// moves the cursor there. The key buffer must spell `start`.
    pub(crate) fn descend_last(&mut self, start: NodeId) -> NodeId {
        let trie = self.trie;
        let mut node = start;
        while let Some((symbol, child)) = trie.node(node).first_child(false) {
            self.key.push(symbol);
            node = child;
        }
        self.node = Some(node);
        node
    }
}

impl<P> Clone for Cursor<'_, P> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            node: self.node,
            finite_only: self.finite_only,
            key: self.key.clone(),
        }
    }
}

impl<P> PartialEq for Cursor<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a == b
                    && std::ptr::eq(self.trie, other.trie)
                    && self.finite_only == other.finite_only
                    && self.key == other.key
            }
            _ => false,
        }
    }
}

impl<P> Eq for Cursor<'_, P> {}

impl<P> fmt::Debug for Cursor<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(id) => f
                .debug_struct("Cursor")
                .field("node", &id)
                .field("finite_only", &self.finite_only)
                .field("key", &self.key)
                .finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

/// Double-ended iteration between two cursors, bounded by a count so the
/// front and back never cross.
struct Span<'a, P> {
    front: Cursor<'a, P>,
    back: Cursor<'a, P>,
    remaining: usize,
}

impl<'a, P> Span<'a, P> {
    fn new(trie: &'a Trie<P>, finite_only: bool, remaining: usize) -> Self {
        Self {
            front: trie.begin(finite_only),
            back: trie.last(finite_only),
            remaining,
        }
    }

    fn next_key(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front.get_key().ok()?.to_string();
        self.front.advance_forward();
        self.remaining -= 1;
        Some(key)
    }

    fn next_back_key(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.back.get_key().ok()?.to_string();
        self.back.advance_backward();
        self.remaining -= 1;
        Some(key)
    }
}

/// Iterator over inserted keys, created by [`Trie::keys`].
pub struct Keys<'a, P> {
    span: Span<'a, P>,
}

impl<'a, P> Keys<'a, P> {
    pub(crate) fn new(trie: &'a Trie<P>) -> Self {
        Self {
            span: Span::new(trie, true, trie.len()),
        }
    }
}

impl<P> Iterator for Keys<'_, P> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.span.next_key()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }
}

impl<P> DoubleEndedIterator for Keys<'_, P> {
    fn next_back(&mut self) -> Option<String> {
        self.span.next_back_key()
    }
}

impl<P> ExactSizeIterator for Keys<'_, P> {}
impl<P> FusedIterator for Keys<'_, P> {}

/// Iterator over every stored prefix, created by [`Trie::prefixes`].
pub struct Prefixes<'a, P> {
    span: Span<'a, P>,
}

impl<'a, P> Prefixes<'a, P> {
    pub(crate) fn new(trie: &'a Trie<P>) -> Self {
        let root = usize::from(trie.exists("", true));
        Self {
            span: Span::new(trie, false, trie.node_count() - 1 + root),
        }
    }
}

impl<P> Iterator for Prefixes<'_, P> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.span.next_key()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }
}

impl<P> DoubleEndedIterator for Prefixes<'_, P> {
    fn next_back(&mut self) -> Option<String> {
        self.span.next_back_key()
    }
}

impl<P> ExactSizeIterator for Prefixes<'_, P> {}
impl<P> FusedIterator for Prefixes<'_, P> {}

/// Iterator over inserted keys sharing a prefix, created by
/// [`Trie::keys_with_prefix`].
pub struct PrefixKeys<'a, P> {
    cursor: Option<Cursor<'a, P>>,
    prefix: String,
}

impl<'a, P> PrefixKeys<'a, P> {
    pub(crate) fn new(start: Option<Cursor<'a, P>>, prefix: &str) -> Self {
        let cursor = start.map(|mut cursor| {
            if !cursor.qualifies() {
                cursor.advance_forward();
            }
            cursor
        });
        Self {
            cursor,
            prefix: prefix.to_string(),
        }
    }
}

impl<P> Iterator for PrefixKeys<'_, P> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let cursor = self.cursor.as_mut()?;
        // Descendants of the prefix node are contiguous in pre-order.
        match cursor.get_key() {
            Ok(key) if key.starts_with(self.prefix.as_str()) => {
                let key = key.to_string();
                cursor.advance_forward();
                Some(key)
            }
            _ => {
                self.cursor = None;
                None
            }
        }
    }
}

impl<P> FusedIterator for PrefixKeys<'_, P> {}
