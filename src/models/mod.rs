pub(crate) mod linear;
pub(crate) mod modernbert;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipelines::sentiment::model::{Prediction, SentimentModel};

pub use linear::{LinearArtifact, LinearSentimentModel};
pub use modernbert::SentimentModernBertModel;

/// Available ModernBERT model sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModernBertSize {
    /// Base model (~150M parameters).
    Base,
    /// Large model (~400M parameters).
    Large,
}

impl std::fmt::Display for ModernBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModernBertSize::Base => "modernbert-base",
            ModernBertSize::Large => "modernbert-large",
        };
        write!(f, "{name}")
    }
}

/// The closed set of shipped sentence classifiers.
///
/// Built by [`AnalysisPipelineBuilder::build`](crate::analysis::AnalysisPipelineBuilder::build)
/// from the [`ClassifierKind`](crate::config::ClassifierKind) configuration
/// value. Hosts with custom models implement [`SentimentModel`] directly and
/// use `build_with` instead.
pub enum SentimentClassifier {
    /// Trained logistic regression over engineered features.
    Linear(LinearSentimentModel),
    /// Pretrained ModernBERT sequence classifier.
    ModernBert(SentimentModernBertModel),
}

impl SentimentModel for SentimentClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        match self {
            SentimentClassifier::Linear(model) => model.predict(text),
            SentimentClassifier::ModernBert(model) => model.predict(text),
        }
    }

    fn predict_probabilities(&self, text: &str) -> Result<Option<[f32; 2]>> {
        match self {
            SentimentClassifier::Linear(model) => model.predict_probabilities(text),
            SentimentClassifier::ModernBert(model) => model.predict_probabilities(text),
        }
    }

    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Result<Prediction>>> {
        match self {
            SentimentClassifier::Linear(model) => model.predict_batch(texts),
            SentimentClassifier::ModernBert(model) => model.predict_batch(texts),
        }
    }
}
