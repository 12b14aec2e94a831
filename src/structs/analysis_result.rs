use serde::{Deserialize, Serialize};

use crate::enums::issue_category::IssueCategory;
use crate::structs::issue::Issue;

/// Marker key used when the provider response could not be parsed at all.
pub const UNPARSEABLE_KEY: &str = "unparseable";

/// The fixed category → issue-list report every analysis path produces.
///
/// All six category keys are always present once a value of this type
/// exists; `#[serde(default)]` back-fills keys the provider omitted, so the
/// invariant holds for parsed input as well as constructed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub syntax_errors: Vec<Issue>,
    pub improvements: Vec<Issue>,
    pub security: Vec<Issue>,
    pub best_practices: Vec<Issue>,
    pub performance: Vec<Issue>,
    pub code_smells: Vec<Issue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unparseable: Vec<Issue>,
}

impl AnalysisResult {
    pub fn category(&self, category: IssueCategory) -> &Vec<Issue> {
        match category {
            IssueCategory::SyntaxErrors => &self.syntax_errors,
            IssueCategory::Improvements => &self.improvements,
            IssueCategory::Security => &self.security,
            IssueCategory::BestPractices => &self.best_practices,
            IssueCategory::Performance => &self.performance,
            IssueCategory::CodeSmells => &self.code_smells,
        }
    }

    pub fn category_mut(&mut self, category: IssueCategory) -> &mut Vec<Issue> {
        match category {
            IssueCategory::SyntaxErrors => &mut self.syntax_errors,
            IssueCategory::Improvements => &mut self.improvements,
            IssueCategory::Security => &mut self.security,
            IssueCategory::BestPractices => &mut self.best_practices,
            IssueCategory::Performance => &mut self.performance,
            IssueCategory::CodeSmells => &mut self.code_smells,
        }
    }

    /// Sum of issue counts across every key, the marker key included.
    pub fn total_issues(&self) -> usize {
        IssueCategory::ALL
            .iter()
            .map(|c| self.category(*c).len())
            .sum::<usize>()
            + self.unparseable.len()
    }

    /// Degraded result for raw provider text that defeated every repair
    /// attempt: one synthetic issue under the marker key, six empty
    /// category keys alongside it.
    pub fn degraded(raw_text: &str) -> Self {
        Self {
            unparseable: vec![Issue {
                title: "Failed to parse provider response".to_string(),
                explanation: raw_text.to_string(),
                suggestion: "Retry the analysis request".to_string(),
                code_snippet: None,
            }],
            ..Self::default()
        }
    }
}
