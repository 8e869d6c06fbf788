//! Hosted inference configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted inference endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API token for the hosted inference endpoint
    pub hf_api_key: Option<String>,

    /// Model identifier sent with every generation request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the inference API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Token budget for each generated reply
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.hf_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate inference configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__HF_API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingModel);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            hf_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

fn default_model() -> String {
    "meta-llama/Meta-Llama-3.1-8B-Instruct".to_string()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_max_new_tokens() -> u32 {
    384
}
