use async_trait::async_trait;
use reqwest::Client;

use crate::config::constants::{CLASSIFIER_MODEL, GENERATOR_MODEL, HF_INFERENCE_URL};
use crate::errors::{DevpulseError, DevpulseResult};
use crate::structs::ai::inference_request::InferenceRequest;
use crate::structs::ai::inference_response::InferenceGeneration;
use crate::traits::segment_scorer::SegmentScorer;

/// Hosted-inference scorer for the local fallback path: a code classifier
/// pass followed by a small text-generation pass.
pub struct HuggingFaceScorer {
    client: Client,
    api_token: Option<String>,
    base_url: String,
}

impl HuggingFaceScorer {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_token,
            base_url: HF_INFERENCE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    async fn call_model(&self, model: &str, inputs: &str) -> DevpulseResult<String> {
        let url = format!("{}/{}", self.base_url, model);
        let mut request = self.client.post(&url).json(&InferenceRequest {
            inputs: inputs.to_string(),
        });

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DevpulseError::system_error("local model inference", &e.to_string()))?;

        if !response.status().is_success() {
            return Err(DevpulseError::system_error(
                "local model inference",
                &format!("{} returned HTTP {}", model, response.status()),
            ));
        }

        let generations: Vec<InferenceGeneration> = response
            .json()
            .await
            .map_err(|e| DevpulseError::system_error("local model inference", &e.to_string()))?;

        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| {
                DevpulseError::system_error("local model inference", "model returned no generations")
            })
    }
}

#[async_trait]
impl SegmentScorer for HuggingFaceScorer {
    async fn classify(&self, segment: &str) -> DevpulseResult<String> {
        self.call_model(CLASSIFIER_MODEL, segment).await
    }

    async fn explain(&self, classification: &str) -> DevpulseResult<String> {
        self.call_model(GENERATOR_MODEL, classification).await
    }
}
