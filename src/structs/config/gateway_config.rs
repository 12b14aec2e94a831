use serde::{Deserialize, Serialize};

use crate::config::constants::{DEFAULT_HEARTBEAT_INTERVAL_SECS, DEFAULT_PORT};
use crate::structs::config::cache_config::CacheConfig;
use crate::structs::config::provider_config::ProviderConfig;

/// Full gateway configuration: TOML file values with environment overrides.
///
/// Credentials never appear in the file or in source; they are read from the
/// environment by `ConfigManager` and injected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub port: u16,
    pub heartbeat_interval_secs: u64,
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
    #[serde(skip)]
    pub api_key: String,
    #[serde(skip)]
    pub hf_api_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
            api_key: String::new(),
            hf_api_token: None,
        }
    }
}
