use std::error::Error;
use std::fmt;

use crate::errors::DevpulseError;

#[derive(Debug, Clone)]
pub enum ProviderError {
    ApiError(String),
    NetworkError(String),
    Timeout(String),
    SerializationError(String),
    AuthenticationError(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProviderError::ApiError(msg) => write!(f, "API Error: {}", msg),
            ProviderError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            ProviderError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            ProviderError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            ProviderError::AuthenticationError(msg) => write!(f, "Authentication Error: {}", msg),
        }
    }
}

impl Error for ProviderError {}

impl From<ProviderError> for DevpulseError {
    fn from(error: ProviderError) -> Self {
        DevpulseError::provider_error("anthropic", &error.to_string())
    }
}
