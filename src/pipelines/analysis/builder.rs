use std::sync::Arc;

use super::pipeline::AnalysisPipeline;
use super::progress::{Checkpoint, ProgressSink};
use crate::annotate::{Annotator, RuleAnnotator};
use crate::config::{AnalysisConfig, ClassifierKind};
use crate::embedding::WordEmbeddings;
use crate::error::{PipelineError, Result};
use crate::models::{
    LinearArtifact, LinearSentimentModel, SentimentClassifier, SentimentModernBertModel,
};
use crate::pipelines::sentiment::model::SentimentModel;
use crate::pipelines::utils::DeviceRequest;

/// Builder for [`AnalysisPipeline`] instances.
///
/// Capabilities are injected here, once, at construction time; the built
/// pipeline reuses them across runs. The annotator defaults to the shipped
/// [`RuleAnnotator`]; a word-embedding provider is required.
///
/// # Examples
///
/// ```rust,no_run
/// use review_pipelines::analysis::AnalysisPipelineBuilder;
/// use review_pipelines::config::{AnalysisConfig, ClassifierKind};
/// use review_pipelines::embedding::EmbeddingTable;
/// use review_pipelines::sentiment::ModernBertSize;
///
/// # fn main() -> review_pipelines::error::Result<()> {
/// let config = AnalysisConfig::new()
///     .with_classifier(ClassifierKind::Modernbert { size: ModernBertSize::Base });
///
/// let pipeline = AnalysisPipelineBuilder::with_config(config)
///     .embeddings(EmbeddingTable::from_path("models/vectors.txt")?)
///     .build()?;
/// # let _ = pipeline;
/// # Ok(())
/// # }
/// ```
pub struct AnalysisPipelineBuilder {
    config: AnalysisConfig,
    annotator: Option<Box<dyn Annotator>>,
    embeddings: Option<Arc<dyn WordEmbeddings>>,
    progress: Option<ProgressSink>,
    device_request: DeviceRequest,
}

impl AnalysisPipelineBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a builder from an existing configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            annotator: None,
            embeddings: None,
            progress: None,
            device_request: DeviceRequest::default(),
        }
    }

    /// Inject a linguistic annotator. Defaults to [`RuleAnnotator`].
    pub fn annotator<A: Annotator + 'static>(mut self, annotator: A) -> Self {
        self.annotator = Some(Box::new(annotator));
        self
    }

    /// Inject a word-embedding provider. Required.
    pub fn embeddings<E: WordEmbeddings + 'static>(mut self, embeddings: E) -> Self {
        self.embeddings = Some(Arc::new(embeddings));
        self
    }

    /// Inject a shared word-embedding provider, for hosts reusing one table
    /// across several pipelines.
    pub fn shared_embeddings(mut self, embeddings: Arc<dyn WordEmbeddings>) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    /// Install a progress sink invoked at run checkpoints. The sink cannot
    /// abort or slow-path the run; panics are contained.
    pub fn progress<F: Fn(Checkpoint) + Send + Sync + 'static>(mut self, sink: F) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    /// Set the candidate fraction kept during feature mining.
    pub fn top_features_percent(mut self, percent: f32) -> Self {
        self.config.top_features_percent = percent;
        self
    }

    /// Set the synonym-merge similarity threshold.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the multi-feature association-confidence threshold.
    pub fn association_confidence(mut self, confidence: f32) -> Self {
        self.config.association_confidence = confidence;
        self
    }

    /// Set the candidate-count floor for small corpora.
    pub fn min_candidate_features(mut self, floor: usize) -> Self {
        self.config.min_candidate_features = floor;
        self
    }

    /// Use CPU for sequence-model inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for sequence-model inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    fn capabilities(
        annotator: Option<Box<dyn Annotator>>,
        embeddings: Option<Arc<dyn WordEmbeddings>>,
    ) -> Result<(Box<dyn Annotator>, Arc<dyn WordEmbeddings>)> {
        let annotator = annotator.unwrap_or_else(|| Box::new(RuleAnnotator::new()));
        let embeddings = embeddings.ok_or_else(|| {
            PipelineError::Capability(
                "word-embedding capability missing: supply one with \
                 AnalysisPipelineBuilder::embeddings"
                    .to_string(),
            )
        })?;
        Ok((annotator, embeddings))
    }

    /// Build the pipeline with the classifier selected by
    /// [`ClassifierKind`](crate::config::ClassifierKind) in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid, a required
    /// capability is missing, or classifier loading fails.
    pub fn build(self) -> Result<AnalysisPipeline<SentimentClassifier>> {
        self.config.validate()?;
        let (annotator, embeddings) = Self::capabilities(self.annotator, self.embeddings)?;

        let classifier = match &self.config.classifier {
            ClassifierKind::Linear { artifact } => {
                let artifact = LinearArtifact::from_json_file(artifact)?;
                SentimentClassifier::Linear(LinearSentimentModel::new(
                    artifact,
                    Arc::clone(&embeddings),
                )?)
            }
            ClassifierKind::Modernbert { size } => {
                let device = self.device_request.resolve()?;
                SentimentClassifier::ModernBert(SentimentModernBertModel::new(*size, device)?)
            }
        };

        Ok(AnalysisPipeline {
            annotator,
            embeddings,
            classifier,
            config: self.config,
            progress: self.progress,
        })
    }

    /// Build the pipeline around a caller-supplied classifier, bypassing
    /// [`ClassifierKind`](crate::config::ClassifierKind).
    pub fn build_with<M: SentimentModel>(self, classifier: M) -> Result<AnalysisPipeline<M>> {
        self.config.validate()?;
        let (annotator, embeddings) = Self::capabilities(self.annotator, self.embeddings)?;

        Ok(AnalysisPipeline {
            annotator,
            embeddings,
            classifier,
            config: self.config,
            progress: self.progress,
        })
    }
}

impl Default for AnalysisPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
