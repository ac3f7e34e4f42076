use std::sync::Arc;

use super::aggregate::{self, AggregateResult, RunDiagnostics, SkippedReview};
use super::features::{self, Feature};
use super::preprocess::preprocess;
use super::progress::{emit, Checkpoint, ProgressSink};
use crate::annotate::{AnnotatedSentence, Annotator};
use crate::config::AnalysisConfig;
use crate::dataset::Review;
use crate::embedding::WordEmbeddings;
use crate::error::Result;
use crate::pipelines::sentiment::model::SentimentModel;
use crate::pipelines::stats::PipelineStats;

/// Everything one batch run produces.
#[derive(Debug)]
pub struct Output {
    /// Aggregated counts and records, in the external output shape.
    pub result: AggregateResult,
    /// The canonical features discovered for the batch, with centroid
    /// embeddings.
    pub features: Vec<Feature>,
    /// Per-run diagnostic counters.
    pub diagnostics: RunDiagnostics,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Aspect-based sentiment analysis over a review batch.
///
/// Construct with [`AnalysisPipelineBuilder`](super::AnalysisPipelineBuilder).
/// The pipeline is synchronous; one run never mutates another run's state,
/// so a host may share one pipeline across threads for independent batches.
///
/// # Examples
///
/// ```rust,no_run
/// use review_pipelines::analysis::AnalysisPipelineBuilder;
/// use review_pipelines::dataset::Review;
/// use review_pipelines::embedding::EmbeddingTable;
///
/// # fn main() -> review_pipelines::error::Result<()> {
/// let pipeline = AnalysisPipelineBuilder::new()
///     .embeddings(EmbeddingTable::from_path("models/vectors.txt")?)
///     .build()?;
///
/// let reviews = vec![
///     Review::new("Great camera and battery life!", 5),
///     Review::new("Battery life is excellent.", 5),
/// ];
/// let output = pipeline.run(&reviews)?;
/// for (name, counts) in &output.result.features {
///     println!("{name}: +{} -{}", counts.positives, counts.negatives);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AnalysisPipeline<M: SentimentModel> {
    pub(crate) annotator: Box<dyn Annotator>,
    pub(crate) embeddings: Arc<dyn WordEmbeddings>,
    pub(crate) classifier: M,
    pub(crate) config: AnalysisConfig,
    pub(crate) progress: Option<ProgressSink>,
}

impl<M: SentimentModel> AnalysisPipeline<M> {
    /// Analyze a batch of reviews.
    ///
    /// Reviews rejected by preprocessing are skipped with a reason in
    /// [`RunDiagnostics::skipped`]; everything else flows through
    /// annotation, corpus-wide feature extraction, per-sentence
    /// classification, and aggregation.
    pub fn run(&self, reviews: &[Review]) -> Result<Output> {
        let stats = PipelineStats::start();
        emit(
            self.progress.as_ref(),
            Checkpoint::Started {
                reviews: reviews.len(),
            },
        );

        let mut diagnostics = RunDiagnostics::default();
        let mut sentences: Vec<AnnotatedSentence> = Vec::new();
        for (index, review) in reviews.iter().enumerate() {
            match preprocess(
                &review.text,
                self.config.min_review_chars,
                self.config.max_review_chars,
            ) {
                Ok(clean) => sentences.extend(self.annotator.annotate(&clean)?),
                Err(reason) => diagnostics.skipped.push(SkippedReview { index, reason }),
            }
        }
        emit(
            self.progress.as_ref(),
            Checkpoint::Annotated {
                sentences: sentences.len(),
            },
        );

        // Corpus-wide synchronization point: features need the whole batch.
        let candidates = features::mine_candidates(
            &sentences,
            self.config.top_features_percent,
            self.config.min_candidate_features,
        );
        let feature_map = features::merge_candidates(
            &candidates,
            self.embeddings.as_ref(),
            self.config.similarity_threshold,
        );
        tracing::debug!(
            candidates = candidates.len(),
            features = feature_map.len(),
            "feature extraction complete"
        );
        emit(
            self.progress.as_ref(),
            Checkpoint::FeaturesExtracted {
                features: feature_map.len(),
            },
        );

        let result = aggregate::aggregate(
            &sentences,
            &feature_map,
            self.embeddings.as_ref(),
            &self.classifier,
            self.config.association_confidence,
            &mut diagnostics,
        )?;
        emit(
            self.progress.as_ref(),
            Checkpoint::Classified {
                records: result.classification.len(),
            },
        );

        let stats = stats.finish(reviews.len(), result.classification.len());
        emit(self.progress.as_ref(), Checkpoint::Completed);

        Ok(Output {
            features: feature_map.into_values().collect(),
            result,
            diagnostics,
            stats,
        })
    }

    /// Analyze a single review text with the dummy rating.
    pub fn analyze(&self, text: &str) -> Result<Output> {
        self.run(&[Review::from_text(text)])
    }

    /// The configuration the pipeline was built with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}
