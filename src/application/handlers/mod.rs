//! Application handlers organized by domain module.

pub mod triage;

pub use triage::{AnalyzeSymptomsCommand, AnalyzeSymptomsHandler, TriageError};
