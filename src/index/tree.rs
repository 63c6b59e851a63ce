// =====================================================================
// File: index/tree.rs
//
// Description:
//   Implements the red-black tree index (`OrderedIndex`) that manages
//   insertion, search and removal of states over `RbNode` structures.
//   Nodes live in an arena (`Vec<RbNode>`) and refer to each other by
//   `NodeId`, with `NodeId::NIL` as the shared black sentinel.
//
// Features:
//   - `insert`: BST descent; merges into an existing state or hangs a new
//               red leaf and repairs colors with `fixup_after_insert`.
//   - `search`: Returns the node for a state or `NodeId::NIL`.
//   - `query` : Search, then filter that state's records by disease.
//   - `remove`: Standard red-black deletion of a whole state, repaired
//               with `fixup_after_remove`.
//   - `validate`: Walks the tree and checks every red-black property.
//
// Notes:
//   * Insert and search are O(log n) by the red-black height bound.
//   * Freed slots go on a free list and are reused by later inserts.
// =====================================================================
use std::cmp::Ordering;

use tracing::debug;

use super::node::Side;
use super::{Color, NodeId, RbNode};
use crate::lookup::{filter_disease, DiseaseIndex};
use crate::{DiseaseRecord, InvariantViolation, LookupMiss, StateEntry};

/// Red-black tree keyed by state name.
#[derive(Debug, Clone)]
pub struct OrderedIndex {
    /// `None` marks a slot freed by a removal.
    nodes: Vec<Option<RbNode>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
}


impl Default for OrderedIndex {
    fn default() -> Self {
        Self::new()
    }
}


// Red-Black Tree Referencing:
// Cormen et al., Introduction to Algorithms, ch. 13
impl OrderedIndex {
    /// Create an empty tree. The root is the sentinel.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId::NIL,
            len: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node. `None` for the sentinel and for a handle whose
    /// state has since been removed.
    pub fn node(&self, id: NodeId) -> Option<&RbNode> {
        if id.is_nil() {
            None
        } else {
            self.nodes.get(id.slot()).and_then(Option::as_ref)
        }
    }

    /// Number of distinct states stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Search for the node holding `key`.
    ///
    /// # Returns
    /// * The matching node's id.
    /// * `NodeId::NIL` if no node holds `key`.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{DiseaseRecord, OrderedIndex};
    /// use diseasedb::index::NodeId;
    ///
    /// let mut tree = OrderedIndex::new();
    /// tree.insert("Ohio", DiseaseRecord::new("Cancer", 2020, 1, "mortality"));
    /// let id = tree.search("Ohio");
    /// assert_eq!(tree.node(id).unwrap().key(), "Ohio");
    /// assert_eq!(tree.search("Utah"), NodeId::NIL);
    /// ```
    pub fn search(&self, key: &str) -> NodeId {
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.at(cur);
            cur = match key.cmp(node.key()) {
                Ordering::Equal => return cur,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        NodeId::NIL
    }

    /// The entry stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&StateEntry> {
        self.node(self.search(key)).map(|node| &node.entry)
    }

    /// Insert a record for `key`.
    ///
    /// - If `key` already has a node, the record is max-merged into that
    ///   node's list and the tree shape is left alone.
    /// - Otherwise a red leaf is linked under the last node visited and
    ///   the tree is rebalanced.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{DiseaseRecord, OrderedIndex};
    ///
    /// let mut tree = OrderedIndex::new();
    /// tree.insert("Texas", DiseaseRecord::new("Asthma", 2020, 50, "mortality"));
    /// tree.insert("Texas", DiseaseRecord::new("Asthma", 2020, 20, "mortality"));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.query("Texas", "Asthma").unwrap()[0].death_count, 50);
    /// ```
    pub fn insert(&mut self, key: &str, record: DiseaseRecord) {
        let mut parent = NodeId::NIL;
        let mut cur = self.root;
        let mut side = Side::Left;

        // Descend; merge in place when the state already has a node
        while !cur.is_nil() {
            parent = cur;
            let ord = key.cmp(self.at(cur).key());
            match ord {
                Ordering::Equal => {
                    self.at_mut(cur).entry.merge(record);
                    return;
                }
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
            }
            cur = self.at(cur).child(side);
        }

        // Only now materialize the node
        let id = self.alloc(RbNode::new(StateEntry::new(key, record), parent));
        if parent.is_nil() {
            self.root = id;
        } else {
            self.at_mut(parent).set_child(side, id);
        }
        self.len += 1;

        self.fixup_after_insert(id);
    }

    /// Records for `(state, disease)`.
    ///
    /// # Returns
    /// * `Ok(records)` with at least one record.
    /// * `Err(LookupMiss::StateNotFound)` if the search hit the sentinel.
    /// * `Err(LookupMiss::DiseaseNotFound)` if the state has no such disease.
    pub fn query(&self, state: &str, disease: &str) -> Result<Vec<&DiseaseRecord>, LookupMiss> {
        filter_disease(state, self.get(state), disease)
    }

    /// Remove a state (and all of its records) from the tree.
    ///
    /// Returns `true` if the state was present.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{DiseaseRecord, OrderedIndex};
    ///
    /// let mut tree = OrderedIndex::new();
    /// tree.insert("Maine", DiseaseRecord::new("Cancer", 2020, 30, "mortality"));
    /// assert!(tree.remove("Maine"));
    /// assert!(!tree.remove("Maine"));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Remove a state and hand back its entry.
    pub fn remove_entry(&mut self, key: &str) -> Option<StateEntry> {
        let z = self.search(key);
        if z.is_nil() {
            debug!(state = key, "state not in red-black tree; nothing removed");
            return None;
        }

        let mut removed_color = self.color(z);
        let x;
        let x_parent;

        if self.at(z).left.is_nil() {
            x = self.at(z).right;
            x_parent = self.at(z).parent;
            self.transplant(z, x);
        } else if self.at(z).right.is_nil() {
            x = self.at(z).left;
            x_parent = self.at(z).parent;
            self.transplant(z, x);
        } else {
            // Two children: splice out the in-order successor instead
            let y = self.minimum(self.at(z).right);
            removed_color = self.color(y);
            x = self.at(y).right;

            if self.at(y).parent == z {
                x_parent = y;
            } else {
                x_parent = self.at(y).parent;
                self.transplant(y, x);
                let z_right = self.at(z).right;
                self.at_mut(y).right = z_right;
                self.at_mut(z_right).parent = y;
            }

            self.transplant(z, y);
            let z_left = self.at(z).left;
            self.at_mut(y).left = z_left;
            self.at_mut(z_left).parent = y;
            let z_color = self.at(z).color;
            self.at_mut(y).color = z_color;
        }

        if removed_color == Color::Black {
            self.fixup_after_remove(x, x_parent);
        }

        self.len -= 1;
        debug!(state = key, remaining = self.len, "state removed from red-black tree");
        Some(self.release(z))
    }

    /// State names in ascending order.
    pub fn states(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cur = self.root;

        // Iterative in-order walk
        while !cur.is_nil() || !stack.is_empty() {
            while !cur.is_nil() {
                stack.push(cur);
                cur = self.at(cur).left;
            }
            if let Some(id) = stack.pop() {
                out.push(self.at(id).key());
                cur = self.at(id).right;
            }
        }
        out
    }

    /// Longest root-to-leaf path, counted in nodes. Zero when empty.
    pub fn height(&self) -> usize {
        fn depth(tree: &OrderedIndex, id: NodeId) -> usize {
            match tree.node(id) {
                Some(node) => 1 + depth(tree, node.left).max(depth(tree, node.right)),
                None => 0,
            }
        }
        depth(self, self.root)
    }

    /// Check every red-black property over the whole tree.
    ///
    /// # Returns
    /// * `Ok(black_height)` counted in black nodes from the root down to
    ///   (not including) the sentinel.
    /// * `Err(InvariantViolation)` naming the first broken property.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.color(self.root) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        if let Some(root) = self.node(self.root) {
            if !root.parent.is_nil() {
                return Err(InvariantViolation::BrokenParentLink {
                    state: root.key().to_string(),
                });
            }
        }

        let mut counted = 0;
        let black_height = self.check_subtree(self.root, None, None, &mut counted)?;

        if counted != self.len {
            return Err(InvariantViolation::LenMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(black_height)
    }


    // =========================
    // Balancing helpers
    // =========================

    /// Resolve red-red violations after linking red node `z`.
    ///
    /// Walks upward while `z`'s parent is red:
    /// - Red uncle: recolor parent and uncle black, grandparent red, and
    ///   continue from the grandparent.
    /// - Black uncle with `z` on the inner side: rotate at the parent to
    ///   turn it into the outer case.
    /// - Outer case: recolor parent black, grandparent red, rotate the
    ///   grandparent the other way. The loop ends here.
    fn fixup_after_insert(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            // A red parent is never the root, so the grandparent exists
            let p = self.parent(z);
            let g = self.parent(p);
            let p_side = if self.at(g).left == p { Side::Left } else { Side::Right };
            let uncle = self.at(g).child(p_side.opposite());

            if self.color(uncle) == Color::Red {
                self.at_mut(p).color = Color::Black;
                self.at_mut(uncle).color = Color::Black;
                self.at_mut(g).color = Color::Red;
                z = g;
            } else {
                if self.at(p).child(p_side.opposite()) == z {
                    z = p;
                    self.rotate(z, p_side);
                }
                let p = self.parent(z);
                let g = self.parent(p);
                self.at_mut(p).color = Color::Black;
                self.at_mut(g).color = Color::Red;
                self.rotate(g, p_side.opposite());
            }
        }

        let root = self.root;
        self.at_mut(root).color = Color::Black;
    }

    /// Restore black heights after a black node was spliced out.
    ///
    /// `x` carries the extra black; it may be the sentinel, which is why
    /// its parent is tracked separately.
    fn fixup_after_remove(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let side = if self.at(parent).left == x { Side::Left } else { Side::Right };
            let other = side.opposite();
            // The sibling of a doubly black node is never the sentinel
            let mut w = self.at(parent).child(other);

            if self.color(w) == Color::Red {
                self.at_mut(w).color = Color::Black;
                self.at_mut(parent).color = Color::Red;
                self.rotate(parent, side);
                w = self.at(parent).child(other);
            }

            let near = self.at(w).child(side);
            let far = self.at(w).child(other);

            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.at_mut(w).color = Color::Red;
                x = parent;
                parent = self.parent(x);
            } else {
                if self.color(far) == Color::Black {
                    self.at_mut(near).color = Color::Black;
                    self.at_mut(w).color = Color::Red;
                    self.rotate(w, other);
                    w = self.at(parent).child(other);
                }
                let parent_color = self.at(parent).color;
                self.at_mut(w).color = parent_color;
                self.at_mut(parent).color = Color::Black;
                let far = self.at(w).child(other);
                self.at_mut(far).color = Color::Black;
                self.rotate(parent, side);
                x = self.root;
            }
        }

        if !x.is_nil() {
            self.at_mut(x).color = Color::Black;
        }
    }

    /// Rotate at `x` toward `dir`. The child on the opposite side is
    /// lifted into `x`'s position and in-order sequence is preserved.
    /// `Side::Left` is a left rotation (right child moves up) and
    /// `Side::Right` a right rotation. Touches only three parent links,
    /// so it runs in O(1).
    pub(crate) fn rotate(&mut self, x: NodeId, dir: Side) {
        let up = dir.opposite();
        let y = self.at(x).child(up);
        let inner = self.at(y).child(dir);

        // Inner subtree of y moves across to x
        self.at_mut(x).set_child(up, inner);
        if !inner.is_nil() {
            self.at_mut(inner).parent = x;
        }

        // y takes x's place under x's parent (or as root)
        let xp = self.at(x).parent;
        self.at_mut(y).parent = xp;
        if xp.is_nil() {
            self.root = y;
        } else if self.at(xp).left == x {
            self.at_mut(xp).left = y;
        } else {
            self.at_mut(xp).right = y;
        }

        self.at_mut(y).set_child(dir, x);
        self.at_mut(x).parent = y;
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let up = self.at(u).parent;
        if up.is_nil() {
            self.root = v;
        } else if self.at(up).left == u {
            self.at_mut(up).left = v;
        } else {
            self.at_mut(up).right = v;
        }
        if !v.is_nil() {
            self.at_mut(v).parent = up;
        }
    }

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while !self.at(id).left.is_nil() {
            id = self.at(id).left;
        }
        id
    }


    // =========================
    // Arena helpers
    // =========================

    /// The sentinel is black.
    fn color(&self, id: NodeId) -> Color {
        self.node(id).map_or(Color::Black, |node| node.color)
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).map_or(NodeId::NIL, |node| node.parent)
    }

    // Callers only pass live, non-sentinel ids
    fn at(&self, id: NodeId) -> &RbNode {
        match &self.nodes[id.slot()] {
            Some(node) => node,
            None => unreachable!("freed slot {:?} is still linked", id),
        }
    }

    fn at_mut(&mut self, id: NodeId) -> &mut RbNode {
        match &mut self.nodes[id.slot()] {
            Some(node) => node,
            None => unreachable!("freed slot {:?} is still linked", id),
        }
    }

    fn alloc(&mut self, node: RbNode) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.slot()] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> StateEntry {
        let node = self.nodes[id.slot()].take();
        self.free.push(id);
        node.map(|node| node.entry).unwrap_or_default()
    }

    /// Returns the black height of the subtree at `id` (sentinel = 0),
    /// checking ordering, parent links and coloring along the way.
    fn check_subtree(
        &self,
        id: NodeId,
        lo: Option<&str>,
        hi: Option<&str>,
        counted: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        let Some(node) = self.node(id) else {
            return Ok(0);
        };
        *counted += 1;
        let state = node.key();

        if lo.is_some_and(|lo| state <= lo) || hi.is_some_and(|hi| state >= hi) {
            return Err(InvariantViolation::OutOfOrder { state: state.to_string() });
        }

        for child in [node.left, node.right] {
            if let Some(c) = self.node(child) {
                if c.parent != id {
                    return Err(InvariantViolation::BrokenParentLink {
                        state: c.key().to_string(),
                    });
                }
                if node.color == Color::Red && c.color == Color::Red {
                    return Err(InvariantViolation::RedRedEdge { state: state.to_string() });
                }
            }
        }

        let left = self.check_subtree(node.left, lo, Some(state), counted)?;
        let right = self.check_subtree(node.right, Some(state), hi, counted)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { state: state.to_string() });
        }

        Ok(left + usize::from(node.color == Color::Black))
    }
}


impl DiseaseIndex for OrderedIndex {
    fn label(&self) -> &'static str {
        "Red-Black Tree"
    }

    fn insert(&mut self, state: &str, record: DiseaseRecord) {
        OrderedIndex::insert(self, state, record);
    }

    fn query(&self, state: &str, disease: &str) -> Result<Vec<&DiseaseRecord>, LookupMiss> {
        OrderedIndex::query(self, state, disease)
    }

    fn remove(&mut self, state: &str) -> bool {
        OrderedIndex::remove(self, state)
    }

    fn len(&self) -> usize {
        self.len
    }
}
