//! Review dataset types and CSV ingestion.
//!
//! The expected file format is header-less with two columns: review text and
//! a 1-5 star rating. A missing or unparsable rating falls back to
//! [`DUMMY_RATING`]; the rating is auxiliary metadata and never feeds the
//! analysis itself.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Rating used when the input carries no usable rating column.
pub const DUMMY_RATING: u8 = 5;

/// A single product review. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Raw review text as submitted.
    pub text: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
}

impl Review {
    /// Create a review with an explicit rating.
    pub fn new(text: impl Into<String>, rating: u8) -> Self {
        Self {
            text: text.into(),
            rating,
        }
    }

    /// Create a review with the dummy rating, for single-text analysis.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, DUMMY_RATING)
    }
}

/// Read reviews from header-less two-column CSV data.
///
/// Blank lines are ignored. Ratings outside 1..=5 normalize to
/// [`DUMMY_RATING`]. An input with no usable rows is a
/// [`Dataset`](PipelineError::Dataset) error.
pub fn read_reviews<R: Read>(reader: R) -> Result<Vec<Review>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut reviews = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record =
            record.map_err(|e| PipelineError::Dataset(format!("row {}: {}", row + 1, e)))?;
        let text = record.get(0).unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let rating = record
            .get(1)
            .and_then(|r| r.trim().parse::<u8>().ok())
            .filter(|r| (1..=5).contains(r))
            .unwrap_or(DUMMY_RATING);
        reviews.push(Review::new(text, rating));
    }

    if reviews.is_empty() {
        return Err(PipelineError::Dataset(
            "input contains no reviews".to_string(),
        ));
    }
    Ok(reviews)
}

/// Read reviews from a CSV file on disk.
pub fn read_reviews_from_path(path: impl AsRef<Path>) -> Result<Vec<Review>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        PipelineError::Dataset(format!("failed to open '{}': {}", path.display(), e))
    })?;
    read_reviews(file)
}
