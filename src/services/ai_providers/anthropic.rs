use std::time::Duration;

use reqwest::Client;

use crate::config::constants::{ANTHROPIC_API_URL, ANTHROPIC_API_VERSION};
use crate::enums::provider_error::ProviderError;
use crate::prompts::analysis_prompt::build_analysis_prompt;
use crate::structs::ai::message_request::{MessageRequest, ProviderMessage};
use crate::structs::ai::message_response::MessageResponse;
use crate::structs::config::provider_config::ProviderConfig;

/// Client for the Anthropic messages endpoint.
///
/// Sends one fixed analysis prompt per call and returns the raw text of the
/// first content block. No retries here; retry policy belongs to the caller.
#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(api_key: String, config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    fn build_request(&self, source_text: &str, language: &str) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![ProviderMessage::user(build_analysis_prompt(language, source_text))],
        }
    }

    /// Analyze one snippet and return the provider's raw reply text.
    pub async fn analyze(&self, source_text: &str, language: &str) -> Result<String, ProviderError> {
        let url = format!("{}/messages", self.base_url);
        let request_body = self.build_request(source_text, language);

        log::info!("📤 Requesting {} analysis from {}", language, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 => ProviderError::AuthenticationError(error_text),
                _ => ProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;

        message
            .first_text()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ProviderError::SerializationError("response contained no text content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new("test-key".to_string(), &ProviderConfig::default()).unwrap()
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let request = provider().build_request("print(1)", "python");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "claude-3-opus-20240229");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "user");
        let content = value["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("print(1)"));
        assert!(content.contains("python"));
    }

    #[test]
    fn response_first_text_is_extracted() {
        let raw = r#"{"content":[{"type":"text","text":"{\"security\":[]}"}]}"#;
        let response: MessageResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text(), Some("{\"security\":[]}"));
    }
}
