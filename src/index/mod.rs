// =====================================================================
// File: index/mod.rs
//
//! The `index` module contains the red-black tree implementation used
//! as the ordered state index.
//!
//! Structure:
//! - `node.rs`  : Defines the [`RbNode`] structure, its [`Color`] and the
//!                arena handle [`NodeId`] with its `NIL` sentinel.
//! - `tree.rs`  : Defines the [`OrderedIndex`] and its algorithms
//!                (insert, search, remove, rebalancing, validation).
//! - `tests.rs` : Unit tests for the tree (compiled only in test mode).
//!
//! This organization separates the small node definition from the
//! larger tree implementation, while tests are isolated to avoid
//! cluttering the main code paths.
// =====================================================================

pub mod node;
pub mod tree;

pub use self::node::{Color, NodeId, RbNode};
pub use self::tree::OrderedIndex;

#[cfg(test)]
pub mod tests;
