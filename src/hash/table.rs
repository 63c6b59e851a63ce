// =====================================================================
// File: hash/table.rs
//
// Description:
//   Implements the bucketed hash table index (`BucketedIndex`). A fixed
//   number of buckets is allocated up front; each bucket is a chain of
//   `StateEntry` values appended in insertion order.
//
// Features:
//   - `hash`  : Sum of character codes modulo the bucket count.
//   - `insert`: Finds or creates the state's entry, then max-merges.
//   - `query` : Locates the state and filters its records by disease.
//   - `remove`: Erases a state's whole entry from its bucket.
//
// Notes:
//   * The key set is small (a few dozen state names) so a cheap additive
//     hash is adequate; chains stay short with the default 100 buckets.
// =====================================================================
use tracing::debug;

use crate::config::DEFAULT_BUCKET_COUNT;
use crate::lookup::{filter_disease, DiseaseIndex};
use crate::{DiseaseRecord, LookupMiss, StateEntry};

/// Hash table index with chained buckets.
#[derive(Debug, Clone)]
pub struct BucketedIndex {
    buckets: Vec<Vec<StateEntry>>,
    states: usize,
}


impl Default for BucketedIndex {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }
}


impl BucketedIndex {
    /// Create an empty table with the default bucket count (100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with `bucket_count` chains.
    ///
    /// # Example
    /// ```
    /// use diseasedb::BucketedIndex;
    /// let table = BucketedIndex::with_buckets(7);
    /// assert_eq!(table.bucket_count(), 7);
    /// ```
    pub fn with_buckets(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be > 0");
        Self {
            buckets: vec![Vec::new(); bucket_count],
            states: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of state entries chained in bucket `idx`.
    pub fn bucket_len(&self, idx: usize) -> usize {
        self.buckets.get(idx).map_or(0, Vec::len)
    }

    /// Maps a state name to its bucket in `[0, bucket_count)`.
    ///
    /// # Example
    /// ```
    /// use diseasedb::BucketedIndex;
    /// let table = BucketedIndex::with_buckets(100);
    /// // 'A' (65) + 'B' (66) = 131
    /// assert_eq!(table.hash("AB"), 31);
    /// ```
    pub fn hash(&self, key: &str) -> usize {
        let sum = key
            .chars()
            .fold(0usize, |acc, ch| acc.wrapping_add(ch as usize));
        sum % self.buckets.len()
    }

    /// Insert a record for `key`.
    ///
    /// - An existing entry for `key` in the bucket receives the record via
    ///   max-merge on (disease, year, mortality).
    /// - Otherwise a new entry holding just this record is appended to the
    ///   bucket's chain.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{BucketedIndex, DiseaseRecord};
    /// let mut table = BucketedIndex::new();
    /// table.insert("California", DiseaseRecord::new("Cancer", 2019, 500, "mortality"));
    /// table.insert("California", DiseaseRecord::new("Cancer", 2019, 300, "mortality"));
    /// let found = table.query("California", "Cancer").unwrap();
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].death_count, 500);
    /// ```
    pub fn insert(&mut self, key: &str, record: DiseaseRecord) {
        let idx = self.hash(key);
        let bucket = &mut self.buckets[idx];

        // Probe first; only allocate a new entry when the state is new
        match bucket.iter_mut().find(|entry| entry.state == key) {
            Some(entry) => {
                entry.merge(record);
            }
            None => {
                bucket.push(StateEntry::new(key, record));
                self.states += 1;
            }
        }
    }

    /// Look up the entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&StateEntry> {
        self.buckets[self.hash(key)]
            .iter()
            .find(|entry| entry.state == key)
    }

    /// Records for `(state, disease)`.
    ///
    /// # Returns
    /// * `Ok(records)` with at least one record (one per distinct year/flag).
    /// * `Err(LookupMiss::StateNotFound)` when the state has no entry.
    /// * `Err(LookupMiss::DiseaseNotFound)` when the state exists but has
    ///   no record of that disease.
    pub fn query(&self, state: &str, disease: &str) -> Result<Vec<&DiseaseRecord>, LookupMiss> {
        filter_disease(state, self.get(state), disease)
    }

    /// Remove a state's entry (all of its records).
    ///
    /// Returns `true` if the entry existed and was erased.
    pub fn remove(&mut self, key: &str) -> bool {
        let idx = self.hash(key);
        let bucket = &mut self.buckets[idx];

        match bucket.iter().position(|entry| entry.state == key) {
            Some(pos) => {
                // Keep the chain in insertion order
                bucket.remove(pos);
                self.states -= 1;
                debug!(state = key, bucket = idx, "state removed from hash table");
                true
            }
            None => {
                debug!(state = key, "state not in hash table; nothing removed");
                false
            }
        }
    }

    /// Number of distinct states stored.
    pub fn len(&self) -> usize {
        self.states
    }

    pub fn is_empty(&self) -> bool {
        self.states == 0
    }

    /// All stored state names, bucket by bucket.
    pub fn states(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| entry.state.as_str())
            .collect()
    }
}


impl DiseaseIndex for BucketedIndex {
    fn label(&self) -> &'static str {
        "Hash Table"
    }

    fn insert(&mut self, state: &str, record: DiseaseRecord) {
        BucketedIndex::insert(self, state, record);
    }

    fn query(&self, state: &str, disease: &str) -> Result<Vec<&DiseaseRecord>, LookupMiss> {
        BucketedIndex::query(self, state, disease)
    }

    fn remove(&mut self, state: &str) -> bool {
        BucketedIndex::remove(self, state)
    }

    fn len(&self) -> usize {
        self.states
    }
}
