//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - Port for the hosted inference endpoint

mod text_generator;

pub use text_generator::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};
