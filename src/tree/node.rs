//! Node storage for the prefix tree.
//!
//! Nodes live in a [`NodeArena`] and refer to each other through [`NodeId`]
//! indices. A node owns its children through its `children` map; the
//! `parent` index is a plain back-reference used for upward navigation and
//! never keeps a node alive.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

/// Stable index of a node inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node always occupies the first slot.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the prefix tree.
///
/// Each node represents the prefix spelled by the symbols on the path from
/// the root. Terminal nodes mark explicitly inserted keys.
#[derive(Debug, Clone)]
pub struct Node<P> {
    /// Child edges, ordered ascending by symbol
    pub(crate) children: BTreeMap<char, NodeId>,

    /// Whether the path ending here is an inserted key
    pub(crate) terminal: bool,

    /// Owning node, `None` for the root
    pub(crate) parent: Option<NodeId>,

    /// Per-node payload, default-constructed at creation
    pub(crate) payload: P,
}

impl<P: Default> Node<P> {
    /// Creates a new empty node under `parent`.
    pub fn new(parent: Option<NodeId>) -> Self {
        Self {
            children: BTreeMap::new(),
            terminal: false,
            parent,
            payload: P::default(),
        }
    }
}

impl<P> Node<P> {
    /// A node with no children that is not terminal must not outlive a
    /// mutation, unless it is the root.
    pub fn is_dead(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }

    /// Returns the child reached through `symbol`.
    pub fn child(&self, symbol: char) -> Option<NodeId> {
        self.children.get(&symbol).copied()
    }

    /// Returns the first child edge in ascending or descending order.
    pub fn first_child(&self, forward: bool) -> Option<(char, NodeId)> {
        let edge = if forward {
            self.children.iter().next()
        } else {
            self.children.iter().next_back()
        };
        edge.map(|(&symbol, &id)| (symbol, id))
    }

    /// Returns the sibling edge adjacent to `symbol`: the next larger one
    /// when `forward`, otherwise the next smaller one.
    pub fn sibling_after(&self, symbol: char, forward: bool) -> Option<(char, NodeId)> {
        use std::ops::Bound::{Excluded, Unbounded};

        let edge = if forward {
            self.children.range((Excluded(symbol), Unbounded)).next()
        } else {
            self.children.range((Unbounded, Excluded(symbol))).next_back()
        };
        edge.map(|(&symbol, &id)| (symbol, id))
    }
}

/// Read-only view of a node, handed out by cursors.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a, P> {
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node<P>,
}

impl<'a, P> NodeView<'a, P> {
    /// Arena index of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Whether the node marks an inserted key.
    pub fn is_terminal(&self) -> bool {
        self.node.terminal
    }

    /// Whether the node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Number of outgoing edges.
    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    /// Outgoing edge symbols in ascending order.
    pub fn symbols(&self) -> impl DoubleEndedIterator<Item = char> + 'a {
        self.node.children.keys().copied()
    }

    /// The payload stored on the node.
    pub fn payload(&self) -> &'a P {
        &self.node.payload
    }
}

/// Slab of nodes with slot reuse.
///
/// Slot 0 is reserved for the root, which is never released.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<P> {
    slots: Vec<Option<Node<P>>>,
    free: Vec<usize>,
}

impl<P: Default> NodeArena<P> {
    /// Creates an arena holding only a fresh root.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Some(Node::new(None)));
        Self {
            slots,
            free: Vec::new(),
        }
    }

    /// Stores `node`, reusing a released slot when one is available.
    pub fn alloc(&mut self, node: Node<P>) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Drops every node except a fresh root.
    pub fn reset(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Some(Node::new(None));
        self.free.clear();
    }
}

impl<P> NodeArena<P> {
    /// Releases the slot of a non-root node and returns the node.
    pub fn release(&mut self, id: NodeId) -> Option<Node<P>> {
        if id == NodeId::ROOT {
            return None;
        }
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes, root included.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<P> Index<NodeId> for NodeArena<P> {
    type Output = Node<P>;

    fn index(&self, id: NodeId) -> &Node<P> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node id {}", id.0),
        }
    }
}

impl<P> IndexMut<NodeId> for NodeArena<P> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<P> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node id {}", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_lookup() {
        let mut node: Node<()> = Node::new(None);
        node.children.insert('b', NodeId(1));
        node.children.insert('d', NodeId(2));
        node.children.insert('f', NodeId(3));

        assert_eq!(node.first_child(true), Some(('b', NodeId(1))));
        assert_eq!(node.first_child(false), Some(('f', NodeId(3))));
        assert_eq!(node.sibling_after('b', true), Some(('d', NodeId(2))));
        assert_eq!(node.sibling_after('c', true), Some(('d', NodeId(2))));
        assert_eq!(node.sibling_after('f', true), None);
        assert_eq!(node.sibling_after('d', false), Some(('b', NodeId(1))));
        assert_eq!(node.sibling_after('b', false), None);
    }

    #[test]
    fn test_arena_reuses_released_slots() {
        let mut arena: NodeArena<()> = NodeArena::with_capacity(4);
        let a = arena.alloc(Node::new(Some(NodeId::ROOT)));
        let b = arena.alloc(Node::new(Some(a)));
        assert_eq!(arena.live(), 3);

        assert!(arena.release(b).is_some());
        assert!(arena.get(b).is_none());
        assert_eq!(arena.live(), 2);

        let c = arena.alloc(Node::new(Some(a)));
        assert_eq!(c, b);
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn test_root_is_never_released() {
        let mut arena: NodeArena<()> = NodeArena::with_capacity(1);
        assert!(arena.release(NodeId::ROOT).is_none());
        assert!(arena.get(NodeId::ROOT).is_some());

        arena.alloc(Node::new(Some(NodeId::ROOT)));
        arena.reset();
        assert_eq!(arena.live(), 1);
        assert!(arena.get(NodeId::ROOT).is_some_and(Node::is_dead));
    }
}
