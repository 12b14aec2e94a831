use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;

pub const DEFAULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 15 * 60;

pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 3;

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const HF_API_TOKEN_ENV: &str = "HF_API_TOKEN";
pub const CLASSIFIER_MODEL: &str = "microsoft/codebert-base";
pub const GENERATOR_MODEL: &str = "gpt2";

pub const PORT_ENV: &str = "DEVPULSE_PORT";
pub const CONFIG_DIR: &str = ".devpulse";
pub const CONFIG_FILE: &str = "config.toml";

/// Languages the local fallback analyzer has a grammar for.
pub const SUPPORTED_FALLBACK_LANGUAGES: &[&str] = &["python", "javascript"];

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn sleep_duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
