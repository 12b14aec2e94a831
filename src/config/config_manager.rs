use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::constants::{
    ANTHROPIC_API_KEY_ENV, CONFIG_DIR, CONFIG_FILE, HF_API_TOKEN_ENV, PORT_ENV,
};
use crate::errors::{DevpulseError, DevpulseResult};
use crate::structs::config::gateway_config::GatewayConfig;

pub struct ConfigManager;

impl ConfigManager {
    /// Load the optional TOML file, then apply environment overrides.
    pub fn load() -> DevpulseResult<GatewayConfig> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                log::info!("📋 Loading config from: {}", path.display());
                Self::load_from(&path)?
            }
            _ => GatewayConfig::default(),
        };

        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> DevpulseResult<GatewayConfig> {
        let content = fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate_config(config: &GatewayConfig) -> DevpulseResult<()> {
        if config.api_key.trim().is_empty() {
            return Err(DevpulseError::config_error(
                "missing provider credential",
                Some("api_key"),
                Some(&format!("Set the {} environment variable", ANTHROPIC_API_KEY_ENV)),
            ));
        }
        if config.cache.capacity == 0 {
            return Err(DevpulseError::config_error(
                "cache capacity must be at least 1",
                Some("cache.capacity"),
                None,
            ));
        }
        if config.cache.ttl_secs == 0 {
            return Err(DevpulseError::config_error(
                "cache TTL must be at least 1 second",
                Some("cache.ttl_secs"),
                None,
            ));
        }
        if config.provider.max_tokens == 0 {
            return Err(DevpulseError::config_error(
                "max_tokens must be at least 1",
                Some("provider.max_tokens"),
                None,
            ));
        }
        if !(0.0..=1.0).contains(&config.provider.temperature) {
            return Err(DevpulseError::config_error(
                "temperature must be between 0.0 and 1.0",
                Some("provider.temperature"),
                None,
            ));
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn apply_env_overrides(config: &mut GatewayConfig) -> DevpulseResult<()> {
        if let Ok(key) = env::var(ANTHROPIC_API_KEY_ENV) {
            config.api_key = key;
        }
        if let Ok(token) = env::var(HF_API_TOKEN_ENV) {
            config.hf_api_token = Some(token);
        }
        if let Ok(port) = env::var(PORT_ENV) {
            config.port = port.parse().map_err(|_| {
                DevpulseError::config_error(
                    "invalid port override",
                    Some(PORT_ENV),
                    Some("Use a number between 1 and 65535"),
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = ConfigManager::load_from(file.path()).unwrap();
        assert_eq!(config.port, crate::config::constants::DEFAULT_PORT);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.ttl_secs, 900);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "port = 4010\n\n[cache]\ncapacity = 5\nttl_secs = 60\n\n[provider]\nmodel = \"claude-3-haiku-20240307\"\n"
        )
        .unwrap();

        let config = ConfigManager::load_from(file.path()).unwrap();
        assert_eq!(config.port, 4010);
        assert_eq!(config.cache.capacity, 5);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.provider.model, "claude-3-haiku-20240307");
        // untouched section keeps its default
        assert_eq!(config.provider.max_tokens, 4000);
    }

    #[test]
    fn validation_rejects_missing_credential() {
        let config = GatewayConfig::default();
        let error = ConfigManager::validate_config(&config).unwrap_err();
        assert!(error.user_message().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn validation_rejects_zero_capacity() {
        let mut config = GatewayConfig::default();
        config.api_key = "key".to_string();
        config.cache.capacity = 0;
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn validation_accepts_sane_config() {
        let mut config = GatewayConfig::default();
        config.api_key = "key".to_string();
        assert!(ConfigManager::validate_config(&config).is_ok());
    }
}
