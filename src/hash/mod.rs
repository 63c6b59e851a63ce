// =====================================================================
// File: hash/mod.rs
//
//! The `hash` module contains the bucketed hash table index.
//!
//! Structure:
//! - `table.rs` : Defines [`BucketedIndex`], its hash function and the
//!                chained insert, query and remove operations.
//! - `tests.rs` : Unit tests for the hash table (compiled only in test mode).
// =====================================================================

pub mod table;

pub use self::table::BucketedIndex;
