use std::time::{Duration, Instant};

/// Execution statistics for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time.
    pub total_time: Duration,
    /// Reviews that entered the run, before preprocessing skips.
    pub reviews_processed: usize,
    /// Sentences that received a classification record.
    pub sentences_classified: usize,
}

impl PipelineStats {
    /// Create a new stats tracker (call at start of operation).
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }
}

/// Builder for PipelineStats - tracks timing from creation to finalize.
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    /// Finalize stats with the processed counts.
    pub fn finish(self, reviews_processed: usize, sentences_classified: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            reviews_processed,
            sentences_classified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineStats;

    #[test]
    fn records_counts() {
        let builder = PipelineStats::start();
        let stats = builder.finish(4, 9);
        assert_eq!(stats.reviews_processed, 4);
        assert_eq!(stats.sentences_classified, 9);
    }
}
