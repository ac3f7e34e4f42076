//! Aspect-based sentiment analysis pipelines for product reviews.
//!
//! Discovers the product aspects a review corpus talks about ("battery",
//! "camera", ...), attributes a sentiment label to every sentence, and rolls
//! the labels into per-aspect counts. The pretrained sequence classifier is
//! powered by [Candle](https://github.com/huggingface/candle); the linguistic
//! annotator and word-embedding provider are injected capabilities, so the
//! pipeline runs fully offline with the shipped rule-based annotator and a
//! local vector table.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod annotate;
pub mod config;
pub mod dataset;
pub mod embedding;
pub mod error;

pub use pipelines::{analysis, sentiment};
