// =====================================================================
// File: session.rs
//
// Description:
// Defines the `Session` struct, which represents one benchmarking run:
// the indexes selected for this run, built from the same parsed records,
// plus the timings taken while building them.
//
// Responsibilities:
// - Build the hash table and/or red-black tree from ingested records.
// - Time each build so the two structures can be compared.
// - Hand out the built indexes behind the shared `DiseaseIndex` trait.
// =====================================================================
use std::time::Duration;

use tracing::info;

use crate::ingest::ParsedRecord;
use crate::timing::{saturating_micros, timed, Comparison};
use crate::{BucketedIndex, Config, DiseaseIndex, IndexChoice, OrderedIndex};

/// Build timings for the structures a session holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub hash: Option<Duration>,
    pub tree: Option<Duration>,
    /// Records fed to each structure.
    pub records: usize,
}


/// Represents a single benchmarking session.
/// Holds whichever indexes were selected and their build report.
pub struct Session {
    pub choice: IndexChoice,

    /// Bucketed hash table, if selected.
    pub hash: Option<BucketedIndex>,

    /// Red-black tree, if selected.
    pub tree: Option<OrderedIndex>,

    pub report: BuildReport,
}


impl Session {
    /// Creates a session with empty indexes for the configured choice.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{Config, IndexChoice, Session};
    /// let config = Config::new("unused.csv", 10, IndexChoice::Tree).unwrap();
    /// let session = Session::new(&config);
    /// assert!(session.hash.is_none());
    /// assert!(session.tree.is_some());
    /// ```
    pub fn new(config: &Config) -> Self {
        Self {
            choice: config.choice,
            hash: config
                .choice
                .builds_hash()
                .then(|| BucketedIndex::with_buckets(config.bucket_count)),
            tree: config.choice.builds_tree().then(OrderedIndex::new),
            report: BuildReport::default(),
        }
    }

    /// Creates a session and fills every selected index from `records`,
    /// timing each build separately.
    pub fn build(config: &Config, records: &[ParsedRecord]) -> Self {
        let mut session = Self::new(config);
        session.report.records = records.len();

        if let Some(hash) = session.hash.as_mut() {
            let elapsed = fill(hash, records);
            info!(states = hash.len(), micros = saturating_micros(elapsed), "hash table built");
            session.report.hash = Some(elapsed);
        }
        if let Some(tree) = session.tree.as_mut() {
            let elapsed = fill(tree, records);
            info!(states = tree.len(), micros = saturating_micros(elapsed), "red-black tree built");
            session.report.tree = Some(elapsed);
        }
        session
    }

    /// Built indexes, hash table first.
    pub fn indexes(&self) -> Vec<&dyn DiseaseIndex> {
        let mut out: Vec<&dyn DiseaseIndex> = Vec::new();
        if let Some(hash) = &self.hash {
            out.push(hash);
        }
        if let Some(tree) = &self.tree {
            out.push(tree);
        }
        out
    }

    /// Built indexes, mutably, hash table first.
    pub fn indexes_mut(&mut self) -> Vec<&mut dyn DiseaseIndex> {
        let mut out: Vec<&mut dyn DiseaseIndex> = Vec::new();
        if let Some(hash) = self.hash.as_mut() {
            out.push(hash);
        }
        if let Some(tree) = self.tree.as_mut() {
            out.push(tree);
        }
        out
    }

    /// Which structure built faster. `None` unless both were built.
    pub fn build_comparison(&self) -> Option<Comparison> {
        match (self.report.hash, self.report.tree) {
            (Some(hash), Some(tree)) => Some(Comparison::between(
                "building",
                ("Hash Table", hash),
                ("Red-Black Tree", tree),
            )),
            _ => None,
        }
    }
}


/// Inserts every record into `index` and returns how long it took.
fn fill<I: DiseaseIndex>(index: &mut I, records: &[ParsedRecord]) -> Duration {
    let ((), elapsed) = timed(|| {
        for parsed in records {
            index.insert(&parsed.state, parsed.record.clone());
        }
    });
    elapsed
}


// =====================================================================
// Unit Tests for Session
// =====================================================================
