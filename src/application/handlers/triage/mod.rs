//! Triage use cases.

mod analyze_symptoms;

pub use analyze_symptoms::{AnalyzeSymptomsCommand, AnalyzeSymptomsHandler, TriageError};
