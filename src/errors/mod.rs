use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum DevpulseError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },

    // Provider errors (network/timeout/non-success status, recoverable via fallback)
    ProviderError {
        provider: String,
        reason: String,
    },

    // Unparseable provider output (surfaced as a degraded result, never fatal)
    NormalizationError {
        reason: String,
    },

    // Fallback path: no local grammar for the requested language
    UnsupportedLanguage {
        language: String,
        supported: Vec<String>,
    },

    // Fallback path: malformed source under a supported grammar
    ParseError {
        language: String,
        reason: String,
    },

    // Malformed inbound envelope
    TransportError {
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl DevpulseError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn provider_error(provider: &str, reason: &str) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn normalization_error(reason: &str) -> Self {
        Self::NormalizationError {
            reason: reason.to_string(),
        }
    }

    pub fn unsupported_language(language: &str, supported: &[&str]) -> Self {
        Self::UnsupportedLanguage {
            language: language.to_string(),
            supported: supported.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn parse_error(language: &str, reason: &str) -> Self {
        Self::ParseError {
            language: language.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport_error(reason: &str) -> Self {
        Self::TransportError {
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Provider errors are the only ones the analysis chain recovers from
    /// by moving on to the next source.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::ProviderError { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ProviderError { provider, reason } => {
                format!("Provider '{}' failed: {}", provider, reason)
            }
            Self::NormalizationError { reason } => {
                format!("Could not parse provider response: {}", reason)
            }
            Self::UnsupportedLanguage { language, supported } => {
                format!(
                    "Unsupported language: {} (local analysis supports: {})",
                    language,
                    supported.join(", ")
                )
            }
            Self::ParseError { language, reason } => {
                format!("Failed to parse {} source: {}", language, reason)
            }
            Self::TransportError { reason } => {
                format!("Error processing message: {}", reason)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for DevpulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for DevpulseError {}

/// Result type alias for gateway operations
pub type DevpulseResult<T> = Result<T, DevpulseError>;

impl From<std::io::Error> for DevpulseError {
    fn from(error: std::io::Error) -> Self {
        DevpulseError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for DevpulseError {
    fn from(error: serde_json::Error) -> Self {
        DevpulseError::TransportError {
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for DevpulseError {
    fn from(error: toml::de::Error) -> Self {
        DevpulseError::ConfigurationError {
            message: error.message().to_string(),
            field: None,
            suggestion: Some("Check the TOML syntax of your config file".to_string()),
        }
    }
}

impl From<reqwest::Error> for DevpulseError {
    fn from(error: reqwest::Error) -> Self {
        DevpulseError::SystemError {
            operation: "HTTP request".to_string(),
            reason: error.to_string(),
        }
    }
}
