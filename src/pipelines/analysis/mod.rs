//! Aspect-based sentiment analysis pipeline.
//!
//! Discovers the product aspects a review corpus mentions, labels every
//! sentence's sentiment, and aggregates counts per aspect. Aspects are mined
//! from noun frequency and merged by embedding similarity, so "battery" and
//! "life" collapse into one feature when the corpus uses them
//! interchangeably.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use review_pipelines::analysis::AnalysisPipelineBuilder;
//! use review_pipelines::dataset;
//! use review_pipelines::embedding::EmbeddingTable;
//!
//! # fn main() -> review_pipelines::error::Result<()> {
//! let pipeline = AnalysisPipelineBuilder::new()
//!     .embeddings(EmbeddingTable::from_path("models/vectors.txt")?)
//!     .build()?;
//!
//! let reviews = dataset::read_reviews_from_path("reviews.csv")?;
//! let output = pipeline.run(&reviews)?;
//!
//! println!(
//!     "{} sentences, {} positive, {} negative",
//!     output.result.summary.total_sentences,
//!     output.result.summary.positive_count,
//!     output.result.summary.negative_count,
//! );
//! for (name, counts) in &output.result.features {
//!     println!("{name}: +{} -{} (related: {:?})", counts.positives, counts.negatives, counts.related);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Progress Reporting
//!
//! Long batches report coarse [`Checkpoint`]s through an optional sink:
//!
//! ```rust,no_run
//! # use review_pipelines::analysis::AnalysisPipelineBuilder;
//! # use review_pipelines::embedding::EmbeddingTable;
//! # fn main() -> review_pipelines::error::Result<()> {
//! let pipeline = AnalysisPipelineBuilder::new()
//!     .embeddings(EmbeddingTable::from_path("models/vectors.txt")?)
//!     .progress(|checkpoint| eprintln!("{checkpoint:?}"))
//!     .build()?;
//! # let _ = pipeline;
//! # Ok(())
//! # }
//! ```
//!
//! # Output Contract
//!
//! [`AggregateResult`] serializes to the shape dashboard and API consumers
//! expect:
//!
//! ```json
//! {
//!   "summary": { "total_sentences": 2, "positive_count": 2, "negative_count": 0, "features_found": 2 },
//!   "features": { "battery": { "related": ["life"], "positives": 2, "negatives": 0, "total": 2 } },
//!   "classification": [ { "category": "battery", "sentence": "...", "sentiment": "Positive" } ]
//! }
//! ```

// ============ Internal API ============

pub(crate) mod aggregate;
pub(crate) mod builder;
pub(crate) mod disjoint;
pub(crate) mod features;
pub(crate) mod pipeline;
pub(crate) mod preprocess;
pub(crate) mod progress;

// ============ Public API ============

pub use aggregate::{
    AggregateResult, ClassificationRecord, FeatureSummary, RunDiagnostics, SkippedReview,
    Summary, GENERAL_CATEGORY,
};
pub use builder::AnalysisPipelineBuilder;
pub use features::Feature;
pub use pipeline::{AnalysisPipeline, Output};
pub use progress::Checkpoint;

pub use crate::pipelines::stats::PipelineStats;
