// =====================================================================
// File: record.rs
//
// Description:
//   The record model shared by both indexes. A `DiseaseRecord` is one
//   (disease, year, death count, mortality flag) row and a `StateEntry`
//   groups every record for one state.
//
// Notes:
//   * Within one entry at most one record exists per
//     (disease, year, mortality) triple. A colliding insert keeps the
//     larger death count instead of appending.
// =====================================================================


/// One mortality row for a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub disease: String,
    pub year: i32,
    pub death_count: u32,
    /// Always stored lowercase.
    pub mortality: String,
}


impl DiseaseRecord {
    /// Builds a record, normalizing the mortality flag to lowercase.
    ///
    /// # Example
    /// ```
    /// use diseasedb::DiseaseRecord;
    /// let rec = DiseaseRecord::new("Cancer", 2019, 500, "Mortality");
    /// assert_eq!(rec.mortality, "mortality");
    /// ```
    pub fn new(disease: impl Into<String>, year: i32, death_count: u32, mortality: &str) -> Self {
        Self {
            disease: disease.into(),
            year,
            death_count,
            mortality: mortality.to_lowercase(),
        }
    }

    /// True when both records occupy the same merge slot:
    /// equal disease, year, and mortality flag.
    pub fn same_slot(&self, other: &DiseaseRecord) -> bool {
        self.disease == other.disease
            && self.year == other.year
            && self.mortality == other.mortality
    }
}


/// A state name paired with all of its disease records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateEntry {
    pub state: String,
    pub records: Vec<DiseaseRecord>,
}


impl StateEntry {
    /// Starts an entry holding a single record.
    pub fn new(state: impl Into<String>, record: DiseaseRecord) -> Self {
        Self {
            state: state.into(),
            records: vec![record],
        }
    }

    /// Merges a record into this entry.
    ///
    /// If a record already fills the same (disease, year, mortality) slot
    /// the larger death count wins and nothing is appended. Otherwise the
    /// record is pushed to the end.
    ///
    /// # Returns
    /// * `true` if the record was appended as a new element.
    /// * `false` if it was folded into an existing record.
    ///
    /// # Example
    /// ```
    /// use diseasedb::{DiseaseRecord, StateEntry};
    /// let mut entry = StateEntry::new("Ohio", DiseaseRecord::new("Asthma", 2020, 10, "mortality"));
    /// assert!(!entry.merge(DiseaseRecord::new("Asthma", 2020, 40, "mortality")));
    /// assert_eq!(entry.records.len(), 1);
    /// assert_eq!(entry.records[0].death_count, 40);
    /// ```
    pub fn merge(&mut self, record: DiseaseRecord) -> bool {
        match self.records.iter_mut().find(|existing| existing.same_slot(&record)) {
            Some(existing) => {
                existing.death_count = existing.death_count.max(record.death_count);
                false
            }
            None => {
                self.records.push(record);
                true
            }
        }
    }

    /// All records for `disease`, in insertion order.
    pub fn matching(&self, disease: &str) -> Vec<&DiseaseRecord> {
        self.records.iter().filter(|rec| rec.disease == disease).collect()
    }
}
