// =====================================================================
// File: config.rs
//
// Description:
//   Runtime configuration: which data file to load, how many hash
//   buckets to allocate, and which structures to build. The binary fills
//   this in from command line flags; library callers can use `Default`.
// =====================================================================
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// Default number of hash table buckets.
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Default mortality data file, read from the working directory.
pub const DATA_FILE: &str = "USDiseases.csv";


/// Which index structures a session builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexChoice {
    Hash,
    Tree,
    #[default]
    Both,
}


impl IndexChoice {
    pub fn builds_hash(self) -> bool {
        matches!(self, IndexChoice::Hash | IndexChoice::Both)
    }

    pub fn builds_tree(self) -> bool {
        matches!(self, IndexChoice::Tree | IndexChoice::Both)
    }
}


/// Accepts names (`hash`, `tree`, `both`) or the menu numbers 1, 2, 3.
///
/// # Example
/// ```
/// use diseasedb::IndexChoice;
/// assert_eq!("tree".parse::<IndexChoice>(), Ok(IndexChoice::Tree));
/// assert_eq!("3".parse::<IndexChoice>(), Ok(IndexChoice::Both));
/// assert!("heap".parse::<IndexChoice>().is_err());
/// ```
impl FromStr for IndexChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "hash" | "hashtable" => Ok(IndexChoice::Hash),
            "2" | "tree" | "rbtree" => Ok(IndexChoice::Tree),
            "3" | "both" => Ok(IndexChoice::Both),
            other => Err(ConfigError::UnknownStructure(other.to_string())),
        }
    }
}


impl fmt::Display for IndexChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexChoice::Hash => "hash",
            IndexChoice::Tree => "tree",
            IndexChoice::Both => "both",
        };
        f.write_str(name)
    }
}


/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub bucket_count: usize,
    pub choice: IndexChoice,
}


impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE),
            bucket_count: DEFAULT_BUCKET_COUNT,
            choice: IndexChoice::default(),
        }
    }
}


impl Config {
    /// Build a validated configuration.
    ///
    /// # Errors
    /// `ConfigError::ZeroBuckets` if `bucket_count` is zero.
    pub fn new(
        data_file: impl Into<PathBuf>,
        bucket_count: usize,
        choice: IndexChoice,
    ) -> Result<Self, ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        Ok(Self {
            data_file: data_file.into(),
            bucket_count,
            choice,
        })
    }
}
