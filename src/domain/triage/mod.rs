//! Symptom triage domain.
//!
//! # Module Organization
//!
//! - `analysis` - Analysis kinds and the typed view of a model reply
//! - `dictionary` - Rule-based keyword-to-department classifier
//! - `prompts` - Korean prompt templates for the hosted model
//! - `report` - The assembled triage report returned to callers

pub mod analysis;
pub mod dictionary;
pub mod prompts;
pub mod report;

pub use analysis::{AnalysisKind, NamedDetail, TriageAnalysis};
pub use dictionary::{classify, LocalClassification};
pub use report::TriageReport;
