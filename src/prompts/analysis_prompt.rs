/// Build the fixed multi-category analysis prompt for one snippet.
///
/// The provider is instructed to answer with a bare JSON object so the
/// normalizer can usually skip its repair steps.
pub fn build_analysis_prompt(language: &str, code: &str) -> String {
    format!(
        r#"As an expert {language} developer, analyze the following {language} code. Provide a comprehensive analysis covering:

1. Syntax Errors: Identify any syntax errors or potential runtime errors.
2. Code Improvements: Suggest ways to improve code efficiency, readability, or maintainability.
3. Security Issues: Highlight any security vulnerabilities or potential risks.
4. Best Practices: Recommend adherence to {language}-specific best practices and design patterns.
5. Performance Optimizations: Identify areas where performance could be improved.
6. Code Smells: Point out any code smells or anti-patterns.

For each issue or suggestion:
- Clearly state the problem or improvement opportunity
- Provide a detailed explanation of why it's important
- Offer a code snippet demonstrating the improved or corrected version
- If applicable, mention any trade-offs or alternative approaches

Code to analyze:

{code}

Provide your analysis in the following JSON format:

{{
  "syntaxErrors": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ],
  "improvements": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ],
  "security": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ],
  "bestPractices": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ],
  "performance": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ],
  "codeSmells": [
    {{"issue": "...", "explanation": "...", "suggestion": "...", "codeSnippet": "..."}}
  ]
}}

Ensure that each category has at least one item, even if it's a positive comment about the code. If there are no issues in a category, provide a compliment on that aspect of the code. Please respond ONLY with the JSON object, without any additional text before or after it."#,
        language = language,
        code = code,
    )
}
