use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}
