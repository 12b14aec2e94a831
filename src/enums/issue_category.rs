/// The six fixed analysis buckets every result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    SyntaxErrors,
    Improvements,
    Security,
    BestPractices,
    Performance,
    CodeSmells,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 6] = [
        IssueCategory::SyntaxErrors,
        IssueCategory::Improvements,
        IssueCategory::Security,
        IssueCategory::BestPractices,
        IssueCategory::Performance,
        IssueCategory::CodeSmells,
    ];

    /// JSON key used on the wire and in provider responses.
    pub fn wire_key(&self) -> &'static str {
        match self {
            IssueCategory::SyntaxErrors => "syntaxErrors",
            IssueCategory::Improvements => "improvements",
            IssueCategory::Security => "security",
            IssueCategory::BestPractices => "bestPractices",
            IssueCategory::Performance => "performance",
            IssueCategory::CodeSmells => "codeSmells",
        }
    }

    /// Literal substring the fallback analyzer files segments by.
    ///
    /// Only four categories participate in keyword filing; the local path
    /// never produces performance or code-smell findings.
    pub fn filing_keyword(&self) -> Option<&'static str> {
        match self {
            IssueCategory::SyntaxErrors => Some("syntax"),
            IssueCategory::Improvements => Some("improvement"),
            IssueCategory::Security => Some("security"),
            IssueCategory::BestPractices => Some("best practice"),
            IssueCategory::Performance => None,
            IssueCategory::CodeSmells => None,
        }
    }
}
