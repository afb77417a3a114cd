//! CSV ingestion for regression datasets
//!
//! Expects a header row with the columns `x1`, `x2` and `y`; extra columns
//! are ignored. Rows deserialize directly into [`Sample`] via serde.

use std::path::Path;

use crate::data::{DataError, Dataset, Sample};

/// Read a dataset from a CSV file
///
/// # Errors
///
/// Returns [`DataError::Csv`] for I/O or parse failures and
/// [`DataError::NonFinite`] when a row holds a NaN or infinite value.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    for (row, record) in reader.deserialize::<Sample>().enumerate() {
        let sample = record?;
        if !sample.is_finite() {
            return Err(DataError::NonFinite { row });
        }
        samples.push(sample);
    }
    Ok(Dataset::new(samples))
}
