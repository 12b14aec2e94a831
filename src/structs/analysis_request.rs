use serde::{Deserialize, Serialize};

/// An inbound analysis request. Immutable once received.
///
/// Doubles as the cache key: identity is the exact `(language, sourceText)`
/// pair, compared by string equality with no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub source_text: String,
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(source_text: &str, language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            language: language.to_string(),
        }
    }
}
