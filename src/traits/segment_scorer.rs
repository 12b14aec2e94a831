use async_trait::async_trait;

use crate::errors::DevpulseResult;

/// Two-stage local scoring of one extracted code segment: a classification
/// pass over the raw segment, then a text-generation pass that expands the
/// classification into an explanation.
#[async_trait]
pub trait SegmentScorer: Send + Sync {
    async fn classify(&self, segment: &str) -> DevpulseResult<String>;

    async fn explain(&self, classification: &str) -> DevpulseResult<String>;
}
