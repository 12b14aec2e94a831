use serde::Deserialize;

/// Response body from the Anthropic messages endpoint. Only the fields the
/// gateway consumes are modeled; the first content block's text is the raw
/// analysis handed to the normalizer.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: Option<String>,
}

impl MessageResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|block| block.text.as_deref())
    }
}
