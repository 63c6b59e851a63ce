// =====================================================================
// File: error.rs
//
// Description:
//   Error types shared across the crate. Lookups report two distinct
//   misses (unknown state, unknown disease within a known state) so the
//   caller can word its response precisely. Ingestion errors cover an
//   unreadable data file and individual malformed rows.
// =====================================================================
use std::path::PathBuf;

use thiserror::Error;

/// Outcome of a `(state, disease)` lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupMiss {
    #[error("State {state} not found.")]
    StateNotFound { state: String },

    #[error("Disease {disease} not found in state {state}.")]
    DiseaseNotFound { state: String, disease: String },
}


/// Failures while reading the mortality CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read data file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}


/// Invalid runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bucket count must be greater than zero")]
    ZeroBuckets,

    #[error("unknown structure '{0}' (expected hash, tree, or both)")]
    UnknownStructure(String),
}


/// A broken red-black tree property found by `OrderedIndex::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,

    #[error("red node '{state}' has a red child")]
    RedRedEdge { state: String },

    #[error("black height differs below '{state}'")]
    BlackHeightMismatch { state: String },

    #[error("key '{state}' is out of order")]
    OutOfOrder { state: String },

    #[error("parent link of '{state}' is inconsistent")]
    BrokenParentLink { state: String },

    #[error("tree reports {recorded} states but holds {counted}")]
    LenMismatch { recorded: usize, counted: usize },
}
