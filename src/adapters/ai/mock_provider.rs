//! Mock text generator for testing.
//!
//! Provides a configurable mock implementation of the TextGenerator port,
//! allowing tests to run without calling the hosted inference endpoint.
//!
//! # Features
//!
//! - Pre-configured replies (consumed in order)
//! - Error injection for resilience testing
//! - Call tracking for prompt verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_reply("{\"진료과\": [\"내과\"]}");
//!
//! let response = generator.generate(request).await?;
//! assert_eq!(response.content, "{\"진료과\": [\"내과\"]}");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Error(MockGenerationError),
}

/// Mock error kinds for testing error handling.
#[derive(Debug, Clone)]
pub enum MockGenerationError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockGenerationError> for GenerationError {
    fn from(err: MockGenerationError) -> Self {
        match err {
            MockGenerationError::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockGenerationError::Unavailable { message } => GenerationError::unavailable(message),
            MockGenerationError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockGenerationError::Network { message } => GenerationError::network(message),
            MockGenerationError::Timeout { timeout_secs } => {
                GenerationError::Timeout { timeout_secs }
            }
        }
    }
}

/// Mock text generator.
///
/// Configurable to return specific replies or inject errors; records every
/// request for verification.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockTextGenerator {
    /// Creates a new mock generator with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockGenerationError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next reply or a default.
    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Success("{}".to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.calls.lock().unwrap().push(request);

        match self.next_reply() {
            MockReply::Success(content) => Ok(GenerationResponse {
                content,
                model: "mock-model".to_string(),
            }),
            MockReply::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model")
    }
}
