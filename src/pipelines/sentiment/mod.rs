//! Sentence-level sentiment classification.
//!
//! The analysis pipeline labels sentences through the [`SentimentModel`]
//! capability trait. Two implementations ship with the crate, selected by
//! [`ClassifierKind`](crate::config::ClassifierKind):
//!
//! | Variant | Type | Notes |
//! |---------|------|-------|
//! | `linear` | [`LinearSentimentModel`] | Offline logistic regression over engineered features |
//! | `modernbert` | [`SentimentModernBertModel`] | Pretrained ModernBERT sequence classifier |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use review_pipelines::sentiment::{ModernBertSize, SentimentModel, SentimentModernBertModel};
//!
//! # fn main() -> review_pipelines::error::Result<()> {
//! let model = SentimentModernBertModel::new(ModernBertSize::Base, candle_core::Device::Cpu)?;
//! let prediction = model.predict("I absolutely love this product!")?;
//! println!("{} (confidence: {:.2})", prediction.label, prediction.score);
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod model;

// ============ Public API ============

pub use crate::models::{
    LinearArtifact, LinearSentimentModel, ModernBertSize, SentimentClassifier,
    SentimentModernBertModel,
};
pub use model::{Prediction, SentimentModel, LABEL_NEGATIVE, LABEL_POSITIVE};
