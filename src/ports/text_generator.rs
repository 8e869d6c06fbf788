//! Text Generation Port - Interface to the hosted inference endpoint.
//!
//! This port abstracts the inference service behind the narrowest contract
//! the application needs: send prompt text, receive response text. The
//! configuration carrying the credential and model identifier lives with the
//! adapter and is passed in explicitly, so callers are testable without any
//! process-wide setup.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct CannedGenerator;
//!
//! #[async_trait]
//! impl TextGenerator for CannedGenerator {
//!     async fn generate(
//!         &self,
//!         request: GenerationRequest,
//!     ) -> Result<GenerationResponse, GenerationError> {
//!         Ok(GenerationResponse {
//!             content: "{\"진료과\": [\"내과\"]}".to_string(),
//!             model: "canned".to_string(),
//!         })
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("canned", "canned-model")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for text generation against a hosted model.
///
/// Implementations connect to an external inference service and translate
/// between the provider-specific API and these types.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a single completion for the given prompt.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for text generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Full prompt text, including any instruction framing.
    pub prompt: String,
    /// Maximum tokens to generate; the adapter's default applies when unset.
    pub max_new_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: None,
            temperature: None,
        }
    }

    /// Sets the reply-token budget.
    pub fn with_max_new_tokens(mut self, max: u32) -> Self {
        self.max_new_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from text generation.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Generated text, exactly as the provider returned it.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g. "huggingface").
    pub name: String,
    /// Model identifier (e.g. "meta-llama/Meta-Llama-3.1-8B-Instruct").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable (including a model that is still loading).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to parse the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}
