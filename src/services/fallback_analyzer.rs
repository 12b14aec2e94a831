use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::enums::issue_category::IssueCategory;
use crate::errors::{DevpulseError, DevpulseResult};
use crate::services::code_segmenter;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::issue::Issue;
use crate::structs::segment_analysis::SegmentAnalysis;
use crate::traits::analysis_source::AnalysisSource;
use crate::traits::segment_scorer::SegmentScorer;

/// Local multi-stage analysis used when the remote provider fails: parse the
/// snippet into a syntax tree, score every function/class segment through a
/// two-stage local model, and file the outputs into categories by literal
/// keyword containment.
///
/// The keyword filing is intentionally approximate: a segment can land in
/// several categories or in none, purely on substring matches.
pub struct FallbackAnalyzer {
    scorer: Arc<dyn SegmentScorer>,
}

impl FallbackAnalyzer {
    pub fn new(scorer: Arc<dyn SegmentScorer>) -> Self {
        Self { scorer }
    }

    pub async fn analyze_locally(
        &self,
        source_text: &str,
        language: &str,
    ) -> DevpulseResult<AnalysisResult> {
        let tree = code_segmenter::parse_source(source_text, language)?;
        let segments: Vec<String> = code_segmenter::segments(&tree, source_text, language)
            .map(|s| s.to_string())
            .collect();

        log::info!(
            "🔬 Local analysis of {} {} segment(s)",
            segments.len(),
            language
        );

        // Per-segment calls run concurrently; segments have no ordering
        // dependency on each other.
        let analyses = try_join_all(segments.into_iter().map(|segment| {
            let scorer = Arc::clone(&self.scorer);
            async move {
                let classification = scorer.classify(&segment).await?;
                let explanation = scorer.explain(&classification).await?;
                Ok::<_, DevpulseError>(SegmentAnalysis {
                    segment,
                    classification,
                    explanation,
                })
            }
        }))
        .await?;

        Ok(Self::file_into_categories(&analyses))
    }

    fn file_into_categories(analyses: &[SegmentAnalysis]) -> AnalysisResult {
        let mut result = AnalysisResult::default();

        for category in IssueCategory::ALL {
            if let Some(keyword) = category.filing_keyword() {
                for analysis in analyses {
                    if analysis.classification.to_lowercase().contains(keyword) {
                        result.category_mut(category).push(
                            Issue::new(
                                &analysis.classification,
                                &analysis.explanation,
                                &format!("Consider reviewing this {} issue", keyword),
                            )
                            .with_snippet(&analysis.segment),
                        );
                    }
                }
            }
        }

        result
    }
}

#[async_trait]
impl AnalysisSource for FallbackAnalyzer {
    fn name(&self) -> &'static str {
        "local-fallback"
    }

    async fn analyze(&self, source_text: &str, language: &str) -> DevpulseResult<AnalysisResult> {
        self.analyze_locally(source_text, language).await
    }
}
