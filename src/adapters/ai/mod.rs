//! Hosted inference adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `HuggingFaceProvider` - HuggingFace Inference API (LLaMA-family models)
//! - `MockTextGenerator` - Configurable mock for testing

mod huggingface_provider;
mod mock_provider;

pub use huggingface_provider::{HuggingFaceConfig, HuggingFaceProvider};
pub use mock_provider::{MockGenerationError, MockTextGenerator};
