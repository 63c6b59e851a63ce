// =====================================================================
// File: lookup.rs
//
// Description:
//   The contract both indexes satisfy: an associative structure from a
//   state name to that state's disease records. The session and the
//   benchmarks drive either structure through this trait.
// =====================================================================
use crate::{DiseaseRecord, LookupMiss, StateEntry};

/// Associative index from state name to disease records.
pub trait DiseaseIndex {
    /// Human readable structure name used in timing output.
    fn label(&self) -> &'static str;

    /// Inserts a record under `state`, max-merging on
    /// (disease, year, mortality) collisions.
    fn insert(&mut self, state: &str, record: DiseaseRecord);

    /// All records of `disease` for `state`.
    ///
    /// Returns a non-empty list on success, otherwise the specific miss.
    fn query(&self, state: &str, disease: &str) -> Result<Vec<&DiseaseRecord>, LookupMiss>;

    /// Removes the whole state and all of its records.
    /// Returns `true` if the state was present.
    fn remove(&mut self, state: &str) -> bool;

    /// Number of distinct states stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// Shared filter step of every query: pick `disease` out of the records
/// of a located state, or report which half of the lookup missed.
pub(crate) fn filter_disease<'a>(
    state: &str,
    entry: Option<&'a StateEntry>,
    disease: &str,
) -> Result<Vec<&'a DiseaseRecord>, LookupMiss> {
    let entry = entry.ok_or_else(|| LookupMiss::StateNotFound {
        state: state.to_string(),
    })?;

    let found = entry.matching(disease);
    if found.is_empty() {
        return Err(LookupMiss::DiseaseNotFound {
            state: state.to_string(),
            disease: disease.to_string(),
        });
    }
    Ok(found)
}
