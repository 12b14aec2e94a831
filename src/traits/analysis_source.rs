use async_trait::async_trait;

use crate::errors::DevpulseResult;
use crate::structs::analysis_result::AnalysisResult;

/// A capability that can turn a source snippet into a normalized analysis.
///
/// Sources are tried in fixed order by the pipeline; a provider failure
/// moves on to the next source, any other error is terminal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, source_text: &str, language: &str) -> DevpulseResult<AnalysisResult>;
}
