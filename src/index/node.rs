// =====================================================================
// File: index/node.rs
//
// Description:
//   Defines the red-black tree node (`RbNode`) and the arena handle
//   (`NodeId`) used by the ordered index. Each node maintains:
//
//   - `entry` : The state name and its disease records.
//   - `color` : Red or black.
//   - `left`, `right`, `parent` : Arena handles, `NodeId::NIL` if absent.
//
// Notes:
//   * Nodes never own each other. All links are indices into the tree's
//     arena, so rotations are plain index swaps.
//   * `NodeId::NIL` is the shared sentinel. It is never allocated, is
//     always treated as black, and doubles as the "not found" answer
//     from a search.
// =====================================================================
use crate::StateEntry;

/// Handle to a node slot in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);


impl NodeId {
    /// The sentinel leaf.
    pub const NIL: NodeId = NodeId(usize::MAX);

    pub(crate) fn new(slot: usize) -> Self {
        NodeId(slot)
    }

    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    pub(crate) fn slot(self) -> usize {
        self.0
    }
}


/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}


/// Which child link of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}


impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}


/// Red-black tree node keyed by state name.
#[derive(Debug, Clone)]
pub struct RbNode {
    pub entry: StateEntry,
    pub color: Color,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
}


impl RbNode {
    /// Creates a fresh red leaf under `parent`, with both children
    /// pointing at the sentinel.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{DiseaseRecord, StateEntry};
    /// use diseasedb::index::{Color, NodeId, RbNode};
    ///
    /// let entry = StateEntry::new("Ohio", DiseaseRecord::new("Cancer", 2020, 1, "mortality"));
    /// let node = RbNode::new(entry, NodeId::NIL);
    /// assert_eq!(node.color, Color::Red);
    /// assert!(node.left.is_nil() && node.right.is_nil());
    /// ```
    pub fn new(entry: StateEntry, parent: NodeId) -> Self {
        Self {
            entry,
            color: Color::Red,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent,
        }
    }

    /// The state name this node is keyed on.
    pub fn key(&self) -> &str {
        &self.entry.state
    }

    pub(crate) fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, id: NodeId) {
        match side {
            Side::Left => self.left = id,
            Side::Right => self.right = id,
        }
    }
}
