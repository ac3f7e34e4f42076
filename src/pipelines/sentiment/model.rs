use crate::error::Result;

/// Label emitted for positive sentiment.
pub const LABEL_POSITIVE: &str = "Positive";

/// Label emitted for negative sentiment.
pub const LABEL_NEGATIVE: &str = "Negative";

/// A sentiment prediction with label and confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted label. The shipped models emit [`LABEL_POSITIVE`] or
    /// [`LABEL_NEGATIVE`]; a sequence-model label outside the normalization
    /// table passes through unchanged.
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

impl Prediction {
    /// Whether the label is the positive one.
    pub fn is_positive(&self) -> bool {
        self.label == LABEL_POSITIVE
    }
}

/// Capability contract for sentence-level sentiment classification.
///
/// Implementations are stateless per call; model loading happens at
/// construction time. An `Err` from [`predict`](Self::predict) on one
/// sentence excludes that sentence from the batch with a diagnostic, it does
/// not abort the run.
pub trait SentimentModel: Send + Sync {
    /// Classify one sentence.
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// `[p_negative, p_positive]` when the implementation can produce a
    /// probability distribution, `None` otherwise. Intended for
    /// explainability callers.
    fn predict_probabilities(&self, text: &str) -> Result<Option<[f32; 2]>> {
        let _ = text;
        Ok(None)
    }

    /// Classify a batch of sentences with per-item results.
    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Result<Prediction>>> {
        Ok(texts.iter().map(|text| self.predict(text)).collect())
    }
}
