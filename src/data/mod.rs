//! Observed and simulated regression data
//!
//! A [`Dataset`] is an owned collection of `(x1, x2, y)` samples. Datasets
//! are produced by the [`dgp`](crate::dgp) simulator, assembled by hand via
//! [`Dataset::builder()`](builder::DatasetBuilderExt::builder), or read from
//! CSV with [`parser::read_csv`].

pub mod builder;
pub mod parser;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One observation of the two covariates and the outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x1: f64, x2: f64, y: f64) -> Self {
        Self { x1, x2, y }
    }

    /// Whether all three values are finite
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() && self.y.is_finite()
    }
}

/// An owned collection of samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Column means as `(mean x1, mean x2, mean y)`
    ///
    /// Returns `None` for an empty dataset.
    pub fn means(&self) -> Option<(f64, f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let n = self.samples.len() as f64;
        let (mut sx1, mut sx2, mut sy) = (0.0, 0.0, 0.0);
        for s in &self.samples {
            sx1 += s.x1;
            sx2 += s.x2;
            sy += s.y;
        }
        Some((sx1 / n, sx2 / n, sy / n))
    }
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Errors that can occur while reading or validating dataset files
#[derive(Error, Debug)]
pub enum DataError {
    /// The underlying CSV reader failed (I/O, malformed row, bad header)
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A row contained a NaN or infinite value
    #[error("dataset contains a non-finite value at row {row}")]
    NonFinite { row: usize },
}
