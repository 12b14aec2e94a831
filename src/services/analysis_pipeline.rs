use async_trait::async_trait;

use crate::errors::{DevpulseError, DevpulseResult};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::response_normalizer;
use crate::structs::analysis_result::AnalysisResult;
use crate::traits::analysis_source::AnalysisSource;

/// The remote half of the analysis chain: provider call plus normalization.
///
/// Unparseable provider output is downgraded to a marked result here rather
/// than treated as a failure: the provider did answer, so the fallback
/// chain must not run.
pub struct RemoteProviderSource {
    provider: AnthropicProvider,
}

impl RemoteProviderSource {
    pub fn new(provider: AnthropicProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AnalysisSource for RemoteProviderSource {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn analyze(&self, source_text: &str, language: &str) -> DevpulseResult<AnalysisResult> {
        let raw_text = self.provider.analyze(source_text, language).await?;

        match response_normalizer::normalize(&raw_text) {
            Ok(result) => Ok(result),
            Err(error) => {
                log::warn!("⚠️ {} - serving degraded result", error.user_message());
                Ok(AnalysisResult::degraded(&raw_text))
            }
        }
    }
}

/// Fixed-order chain of analysis sources; first success wins.
///
/// Only provider failures advance the chain. Fallback-specific errors
/// (unsupported language, parse failure) are terminal for the request.
pub struct AnalysisPipeline {
    sources: Vec<Box<dyn AnalysisSource>>,
}

impl AnalysisPipeline {
    pub fn new(sources: Vec<Box<dyn AnalysisSource>>) -> Self {
        Self { sources }
    }

    pub async fn analyze(&self, source_text: &str, language: &str) -> DevpulseResult<AnalysisResult> {
        let mut last_error: Option<DevpulseError> = None;

        for source in &self.sources {
            if last_error.is_some() {
                log::info!("🛟 Falling back to {}", source.name());
            }

            match source.analyze(source_text, language).await {
                Ok(result) => return Ok(result),
                Err(error) if error.is_provider_failure() => {
                    log::warn!("⚠️ {} failed: {}", source.name(), error.user_message());
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DevpulseError::system_error("analysis", "no analysis sources configured")
        }))
    }
}
