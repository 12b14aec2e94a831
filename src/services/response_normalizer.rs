use serde_json::Value;

use crate::enums::issue_category::IssueCategory;
use crate::errors::{DevpulseError, DevpulseResult};
use crate::structs::analysis_result::AnalysisResult;

/// Repair raw provider text into the fixed category schema.
///
/// Attempts, in order:
/// 1. parse the whole text as JSON and accept it if it carries at least one
///    recognized category key;
/// 2. extract the first balanced `{`..`}` substring and parse that;
/// 3. give up with a `NormalizationError`; the caller decides whether to
///    serve a degraded result instead.
///
/// Accepted results are back-filled so all six category keys are present.
pub fn normalize(raw_text: &str) -> DevpulseResult<AnalysisResult> {
    if let Ok(value) = serde_json::from_str::<Value>(raw_text) {
        if let Some(result) = accept_with_category(value) {
            return Ok(result);
        }
    }

    if let Some(candidate) = extract_balanced_object(raw_text) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if let Ok(result) = serde_json::from_value::<AnalysisResult>(value) {
                return Ok(result);
            }
        }
    }

    Err(DevpulseError::normalization_error(
        "no parseable JSON object in provider response",
    ))
}

fn accept_with_category(value: Value) -> Option<AnalysisResult> {
    let object = value.as_object()?;
    let recognized = IssueCategory::ALL
        .iter()
        .any(|c| object.contains_key(c.wire_key()));
    if !recognized {
        return None;
    }
    // missing categories become empty sequences via the serde defaults
    serde_json::from_value(value).ok()
}

/// First `{`-to-matching-`}` balanced substring, tracking JSON string
/// boundaries so braces inside string literals don't skew the depth count.
fn extract_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
