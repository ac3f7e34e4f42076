use std::panic::{catch_unwind, AssertUnwindSafe};

/// Coarse checkpoints reported during a batch run.
///
/// Delivered to the sink installed with
/// [`AnalysisPipelineBuilder::progress`](super::AnalysisPipelineBuilder::progress),
/// in order. The sink cannot influence the run: panics are contained and
/// logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// The batch was accepted.
    Started {
        /// Reviews in the batch.
        reviews: usize,
    },
    /// Preprocessing and annotation finished.
    Annotated {
        /// Sentences produced across the batch.
        sentences: usize,
    },
    /// Corpus-wide feature extraction finished.
    FeaturesExtracted {
        /// Canonical features discovered.
        features: usize,
    },
    /// Classification and aggregation finished.
    Classified {
        /// Classification records produced.
        records: usize,
    },
    /// The run is complete.
    Completed,
}

pub(crate) type ProgressSink = Box<dyn Fn(Checkpoint) + Send + Sync>;

pub(crate) fn emit(sink: Option<&ProgressSink>, checkpoint: Checkpoint) {
    if let Some(callback) = sink {
        if catch_unwind(AssertUnwindSafe(|| callback(checkpoint))).is_err() {
            tracing::warn!(?checkpoint, "progress callback panicked; continuing run");
        }
    }
}
