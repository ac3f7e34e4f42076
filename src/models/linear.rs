use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::embedding::WordEmbeddings;
use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::model::{
    Prediction, SentimentModel, LABEL_NEGATIVE, LABEL_POSITIVE,
};

/// Lexical features appended after the mean embedding: positive-word
/// fraction, negative-word fraction, normalized token count.
const LEXICAL_FEATURES: usize = 3;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "best", "nice", "fine", "excellent", "amazing", "awesome", "superb",
    "outstanding", "wonderful", "fantastic", "incredible", "lovely", "perfect", "love", "loved",
    "like", "liked", "recommend", "happy", "satisfied", "solid", "sturdy", "premium", "smooth",
    "crisp", "sharp", "clear", "fast", "quick", "easy", "worth", "value", "durable", "reliable",
    "professional", "decent", "pleased", "impressed",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worst", "worse", "poor", "terrible", "horrible", "awful", "mediocre", "substandard",
    "worthless", "cheap", "flimsy", "blurry", "slow", "hate", "hated", "disappointed",
    "disappointing", "broken", "broke", "defective", "faulty", "useless", "waste", "refund",
    "return", "returned", "lag", "lagging", "drain", "drains", "dead", "cracked", "heats",
    "unsafe", "unhappy", "stopped", "problem", "issue", "issues",
];

/// Trained logistic-regression weights for [`LinearSentimentModel`].
///
/// The artifact is a JSON file produced by the offline training step:
/// `weights` holds one coefficient per engineered feature (mean embedding
/// components first, then the lexical counts), `bias` the intercept, and
/// `embedding_dimension` the dimensionality the weights were trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    /// Coefficients, one per engineered feature.
    pub weights: Vec<f32>,
    /// Intercept.
    pub bias: f32,
    /// Embedding dimensionality the weights were trained against.
    pub embedding_dimension: usize,
}

impl LinearArtifact {
    /// Load an artifact from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "failed to read classifier artifact '{}': {}",
                path.display(),
                e
            ))
        })?;
        let artifact: LinearArtifact = serde_json::from_str(&contents).map_err(|e| {
            PipelineError::Config(format!(
                "malformed classifier artifact '{}': {}",
                path.display(),
                e
            ))
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<()> {
        let expected = self.embedding_dimension + LEXICAL_FEATURES;
        if self.weights.len() != expected {
            return Err(PipelineError::Config(format!(
                "classifier artifact has {} weights, expected {} ({} embedding + {} lexical)",
                self.weights.len(),
                expected,
                self.embedding_dimension,
                LEXICAL_FEATURES
            )));
        }
        Ok(())
    }
}

/// Logistic-regression sentence classifier over engineered features.
///
/// Features are the mean embedding of the sentence's tokens concatenated
/// with lexical sentiment counts. Deterministic given the same artifact and
/// embedding provider.
pub struct LinearSentimentModel {
    artifact: LinearArtifact,
    embeddings: Arc<dyn WordEmbeddings>,
    positive_words: HashSet<&'static str>,
    negative_words: HashSet<&'static str>,
}

impl LinearSentimentModel {
    /// Create a model from a trained artifact and an embedding provider.
    ///
    /// # Errors
    ///
    /// Returns [`Config`](PipelineError::Config) when the artifact's
    /// dimensionality disagrees with the provider's.
    pub fn new(artifact: LinearArtifact, embeddings: Arc<dyn WordEmbeddings>) -> Result<Self> {
        artifact.validate()?;
        if artifact.embedding_dimension != embeddings.dimension() {
            return Err(PipelineError::Config(format!(
                "classifier artifact trained against {}-dimensional embeddings, provider supplies {}",
                artifact.embedding_dimension,
                embeddings.dimension()
            )));
        }
        Ok(Self {
            artifact,
            embeddings,
            positive_words: POSITIVE_WORDS.iter().copied().collect(),
            negative_words: NEGATIVE_WORDS.iter().copied().collect(),
        })
    }

    fn engineered_features(&self, text: &str) -> Vec<f32> {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect();

        let dimension = self.artifact.embedding_dimension;
        let mut features = vec![0.0f32; dimension + LEXICAL_FEATURES];

        if tokens.is_empty() {
            return features;
        }

        for token in &tokens {
            let vector = self.embeddings.vector(token);
            for (slot, value) in features.iter_mut().zip(vector.iter()) {
                *slot += value;
            }
        }
        let count = tokens.len() as f32;
        for slot in features.iter_mut().take(dimension) {
            *slot /= count;
        }

        let positive_hits = tokens
            .iter()
            .filter(|t| self.positive_words.contains(t.as_str()))
            .count() as f32;
        let negative_hits = tokens
            .iter()
            .filter(|t| self.negative_words.contains(t.as_str()))
            .count() as f32;

        features[dimension] = positive_hits / count;
        features[dimension + 1] = negative_hits / count;
        features[dimension + 2] = (count / 100.0).min(1.0);
        features
    }

    fn positive_probability(&self, text: &str) -> f32 {
        let features = self.engineered_features(text);
        let activation: f32 = self
            .artifact
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.artifact.bias;
        1.0 / (1.0 + (-activation).exp())
    }
}

impl SentimentModel for LinearSentimentModel {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let p_positive = self.positive_probability(text);
        let (label, score) = if p_positive >= 0.5 {
            (LABEL_POSITIVE, p_positive)
        } else {
            (LABEL_NEGATIVE, 1.0 - p_positive)
        };
        Ok(Prediction {
            label: label.to_string(),
            score,
        })
    }

    fn predict_probabilities(&self, text: &str) -> Result<Option<[f32; 2]>> {
        let p_positive = self.positive_probability(text);
        Ok(Some([1.0 - p_positive, p_positive]))
    }
}
