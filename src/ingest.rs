// =====================================================================
// File: ingest.rs
//
// Description:
//   Reads the mortality CSV and turns each row into a state name plus a
//   `DiseaseRecord`, ready to be inserted into either index.
//
// Format:
//   A header line followed by rows of five comma separated fields:
//
//     year,state,disease,mortality indicator,death count
//
//   Only rows whose indicator contains "mortality" (any case) are kept.
//
// Notes:
//   * A malformed row is logged and skipped; one bad line never aborts
//     the load.
//   * Fields are not quoted or escaped in this data set.
// =====================================================================
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{DiseaseRecord, IngestError};

/// Indicator substring a row must carry to be indexed.
pub const MORTALITY_MARKER: &str = "mortality";


/// One row that passed parsing and the mortality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub state: String,
    pub record: DiseaseRecord,
}


/// Result of loading a data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    /// Rows kept for indexing.
    pub records: Vec<ParsedRecord>,
    /// Data rows seen, header and blank lines excluded.
    pub processed: usize,
    /// Rows dropped because the indicator lacked the mortality marker.
    pub filtered: usize,
    /// Rows dropped as malformed.
    pub skipped: usize,
}


/// Parse a single data row.
///
/// # Returns
/// * `Ok(Some(parsed))` for a well-formed mortality row.
/// * `Ok(None)` for a well-formed row that is not a mortality row.
/// * `Err(IngestError::Malformed)` if a field is missing or a number
///   does not parse.
///
/// # Example
/// ```
/// use diseasedb::ingest::parse_line;
/// let row = parse_line(2, "2019,California,Cancer,Mortality,500").unwrap().unwrap();
/// assert_eq!(row.state, "California");
/// assert_eq!(row.record.mortality, "mortality");
/// assert!(parse_line(3, "2019,California,Cancer,Incidence,12").unwrap().is_none());
/// ```
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ParsedRecord>, IngestError> {
    let malformed = |reason: String| IngestError::Malformed { line: line_no, reason };

    let mut fields = line.trim_end_matches(['\r', '\n']).split(',');
    let mut next_field = |name: &str| {
        fields
            .next()
            .map(str::trim)
            .ok_or_else(|| malformed(format!("missing {} field", name)))
    };

    let year = next_field("year")?;
    let state = next_field("state")?;
    let disease = next_field("disease")?;
    let indicator = next_field("mortality")?;
    let deaths = next_field("death count")?;

    let year: i32 = year
        .parse()
        .map_err(|_| malformed(format!("year '{}' is not an integer", year)))?;
    let deaths: u32 = deaths
        .parse()
        .map_err(|_| malformed(format!("death count '{}' is not a non-negative integer", deaths)))?;

    let indicator = indicator.to_lowercase();
    if !indicator.contains(MORTALITY_MARKER) {
        return Ok(None);
    }

    Ok(Some(ParsedRecord {
        state: state.to_string(),
        record: DiseaseRecord::new(disease, year, deaths, &indicator),
    }))
}


/// Parse the full text of a data file. The first line is the header.
pub fn parse_csv(text: &str) -> Ingested {
    parse_bytes(text.as_bytes())
}


/// Parse raw file contents. Each line is decoded on its own, so a row
/// that is not valid UTF-8 is skipped like any other malformed row.
pub fn parse_bytes(data: &[u8]) -> Ingested {
    let mut out = Ingested::default();

    // Line numbers are 1-based and count the header
    for (idx, raw) in data.split(|&b| b == b'\n').enumerate().skip(1) {
        let line_no = idx + 1;
        let outcome = match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_line(line_no, line),
            Err(e) => Err(IngestError::Malformed {
                line: line_no,
                reason: format!("row is not valid UTF-8 ({})", e),
            }),
        };
        out.processed += 1;

        match outcome {
            Ok(Some(parsed)) => out.records.push(parsed),
            Ok(None) => out.filtered += 1,
            Err(e) => {
                warn!("{}", e);
                out.skipped += 1;
            }
        }
    }

    debug!(
        kept = out.records.len(),
        filtered = out.filtered,
        skipped = out.skipped,
        "parsed mortality data"
    );
    out
}


/// Read and parse the data file at `path`.
///
/// # Errors
/// `IngestError::Io` if the file cannot be read. Undecodable rows are
/// skipped, not reported here.
pub fn read_records(path: &Path) -> Result<Ingested, IngestError> {
    let data = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ingested = parse_bytes(&data);
    info!(
        file = %path.display(),
        processed = ingested.processed,
        kept = ingested.records.len(),
        skipped = ingested.skipped,
        "loaded mortality records"
    );
    Ok(ingested)
}
