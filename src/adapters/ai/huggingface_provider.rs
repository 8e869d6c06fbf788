//! HuggingFace Provider - TextGenerator implementation for the HuggingFace
//! Inference API.
//!
//! Sends text-generation requests to hosted models (LLaMA family by default)
//! and maps the API's failure modes onto the port error taxonomy. A model
//! that is still being loaded onto an inference worker responds with 503;
//! that case is retryable and handled by the backoff loop.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HuggingFaceConfig::new(api_key)
//!     .with_model("meta-llama/Meta-Llama-3.1-8B-Instruct")
//!     .with_base_url("https://api-inference.huggingface.co");
//!
//! let provider = HuggingFaceProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::AiConfig;
use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};

/// Configuration for the HuggingFace provider.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// API token for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "meta-llama/Meta-Llama-3.1-8B-Instruct").
    pub model: String,
    /// Base URL for the API (default: https://api-inference.huggingface.co).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Reply-token budget applied when a request leaves it unset.
    pub max_new_tokens: u32,
}

impl HuggingFaceConfig {
    /// Creates a new configuration with the given API token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "meta-llama/Meta-Llama-3.1-8B-Instruct".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            max_new_tokens: 384,
        }
    }

    /// Builds a configuration from the application config section.
    pub fn from_app_config(ai: &AiConfig) -> Self {
        Self::new(ai.hf_api_key.clone().unwrap_or_default())
            .with_model(&ai.model)
            .with_base_url(&ai.base_url)
            .with_timeout(ai.timeout())
            .with_max_retries(ai.max_retries)
            .with_max_new_tokens(ai.max_new_tokens)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the default reply-token budget.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Exposes the API token (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HuggingFace Inference API provider implementation.
pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: HuggingFaceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the model endpoint URL.
    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts a port request to the wire format.
    fn to_api_request(&self, request: &GenerationRequest) -> HfGenerationRequest {
        HfGenerationRequest {
            inputs: request.prompt.clone(),
            parameters: HfParameters {
                max_new_tokens: request.max_new_tokens.unwrap_or(self.config.max_new_tokens),
                temperature: request.temperature,
                return_full_text: false,
            },
            options: HfOptions {
                wait_for_model: true,
            },
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        let api_request = self.to_api_request(request);

        self.client
            .post(self.model_url())
            .bearer_auth(self.config.api_key())
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses onto the port error taxonomy.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthenticationFailed),
            429 => Err(GenerationError::rate_limited(60)),
            400 | 422 => Err(GenerationError::InvalidRequest(error_body)),
            // 503 is how the API reports a model still loading onto a worker.
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the response envelope into generated text.
    async fn parse_response(&self, response: Response) -> Result<GenerationResponse, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to read response: {}", e)))?;

        let content = extract_generated_text(&body)?;

        Ok(GenerationResponse {
            content,
            model: self.config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let mut last_error = GenerationError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.send_request(&request).await {
                Ok(response) => match self.parse_response(response).await {
                    Ok(generation) => return Ok(generation),
                    Err(err) => {
                        if !err.is_retryable() || retry_count >= self.config.max_retries {
                            return Err(err);
                        }
                        last_error = err;
                    }
                },
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("huggingface", &self.config.model)
    }
}

/// Pulls the generated text out of the response envelope.
///
/// The API answers with `[{"generated_text": "..."}]` on success and with
/// `{"error": "..."}` when the request was accepted but generation failed.
fn extract_generated_text(body: &str) -> Result<String, GenerationError> {
    if let Ok(generations) = serde_json::from_str::<Vec<HfGeneration>>(body) {
        return generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| GenerationError::parse("Empty generation list"));
    }

    if let Ok(api_error) = serde_json::from_str::<HfApiError>(body) {
        return Err(GenerationError::unavailable(api_error.error));
    }

    Err(GenerationError::parse(format!(
        "Unrecognized response envelope: {}",
        body
    )))
}

// ----- HuggingFace API Types -----

#[derive(Debug, Serialize)]
struct HfGenerationRequest {
    inputs: String,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct HfApiError {
    error: String,
}
