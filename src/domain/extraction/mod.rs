//! Embedded-JSON extraction.
//!
//! Hosted-model replies are free-form text that usually *contains* a JSON
//! object rather than *being* one. This module turns one noisy text blob into
//! one validated JSON document, or fails with a diagnosable error:
//!
//! 1. [`ResponseCleaner`] strips markdown code fences and, on the strict
//!    path, repairs common noise (repeated filler phrases, stray symbol
//!    characters, non-canonical Unicode).
//! 2. [`JsonExtractor`] scans the cleaned text left to right for balanced
//!    `{...}` regions and returns the first one that survives a structural
//!    parse.
//!
//! Extraction and validation are coupled: a span that fails to parse is never
//! returned as a success, so callers either get a well-formed document or one
//! of the two error kinds with the offending raw text attached.

mod cleaner;
mod extractor;

pub use cleaner::{ResponseCleaner, DEFAULT_FILLER_PHRASE};
pub use extractor::{ExtractError, FallbackPolicy, JsonExtractor};
