use serde::{Deserialize, Serialize};

/// A single finding inside one analysis category.
///
/// The wire name of the title field is `issue` for compatibility with the
/// report format the provider is prompted to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "issue", alias = "title")]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

impl Issue {
    pub fn new(title: &str, explanation: &str, suggestion: &str) -> Self {
        Self {
            title: title.to_string(),
            explanation: explanation.to_string(),
            suggestion: suggestion.to_string(),
            code_snippet: None,
        }
    }

    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.code_snippet = Some(snippet.to_string());
        self
    }
}
