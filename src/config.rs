//! Runtime configuration consumed by the analysis pipeline.
//!
//! All thresholds have defaults matching the trained reference deployment;
//! hosts typically deserialize an [`AnalysisConfig`] from JSON and hand it to
//! [`AnalysisPipelineBuilder::with_config`](crate::analysis::AnalysisPipelineBuilder::with_config).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::models::ModernBertSize;

/// Which shipped sentence classifier the pipeline builds.
///
/// Selection is a configuration value over a closed set of variants, not
/// runtime type inspection. Hosts with custom models bypass this entirely via
/// [`AnalysisPipelineBuilder::build_with`](crate::analysis::AnalysisPipelineBuilder::build_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Trained logistic-regression classifier over engineered sentence
    /// features. Fully offline; deterministic given the same artifact.
    Linear {
        /// Path to the JSON weight artifact.
        artifact: PathBuf,
    },
    /// Pretrained ModernBERT sequence classifier, downloaded from the
    /// Hugging Face Hub on first use.
    Modernbert {
        /// Model size to load.
        size: ModernBertSize,
    },
}

impl Default for ClassifierKind {
    fn default() -> Self {
        ClassifierKind::Linear {
            artifact: PathBuf::from("models/linear_sentiment.json"),
        }
    }
}

/// Configuration for the aspect analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction of unique noun lemmas kept as aspect candidates (0, 1].
    pub top_features_percent: f32,
    /// Cosine similarity at or above which two candidates merge into one
    /// feature group.
    pub similarity_threshold: f32,
    /// Minimum sentence-to-feature cosine similarity required to resolve a
    /// multi-feature sentence to a single category.
    pub association_confidence: f32,
    /// Lower bound on the candidate count, so small corpora still produce
    /// features. Above the floor the count scales with `top_features_percent`.
    pub min_candidate_features: usize,
    /// Reviews shorter than this (after cleaning) are skipped.
    pub min_review_chars: usize,
    /// Reviews longer than this (after cleaning) are skipped.
    pub max_review_chars: usize,
    /// Language code of the corpus, as detected upstream. The shipped
    /// annotator only handles `"en"`.
    pub language: String,
    /// Which shipped classifier [`build`](crate::analysis::AnalysisPipelineBuilder::build) constructs.
    pub classifier: ClassifierKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_features_percent: 0.05,
            similarity_threshold: 0.64,
            association_confidence: 0.4,
            min_candidate_features: 10,
            min_review_chars: 3,
            max_review_chars: 5000,
            language: "en".to_string(),
            classifier: ClassifierKind::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.top_features_percent > 0.0 && self.top_features_percent <= 1.0) {
            return Err(PipelineError::Config(format!(
                "top_features_percent must be in (0, 1], got {}",
                self.top_features_percent
            )));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PipelineError::Config(format!(
                "similarity_threshold must be in [-1, 1], got {}",
                self.similarity_threshold
            )));
        }
        if !(-1.0..=1.0).contains(&self.association_confidence) {
            return Err(PipelineError::Config(format!(
                "association_confidence must be in [-1, 1], got {}",
                self.association_confidence
            )));
        }
        if self.min_review_chars == 0 {
            return Err(PipelineError::Config(
                "min_review_chars must be > 0".to_string(),
            ));
        }
        if self.max_review_chars < self.min_review_chars {
            return Err(PipelineError::Config(
                "max_review_chars must be >= min_review_chars".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder method: set the candidate fraction.
    pub fn with_top_features_percent(mut self, percent: f32) -> Self {
        self.top_features_percent = percent;
        self
    }

    /// Builder method: set the synonym-merge threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder method: set the multi-feature association threshold.
    pub fn with_association_confidence(mut self, confidence: f32) -> Self {
        self.association_confidence = confidence;
        self
    }

    /// Builder method: set the candidate-count floor.
    pub fn with_min_candidate_features(mut self, floor: usize) -> Self {
        self.min_candidate_features = floor;
        self
    }

    /// Builder method: set the classifier variant.
    pub fn with_classifier(mut self, classifier: ClassifierKind) -> Self {
        self.classifier = classifier;
        self
    }
}
