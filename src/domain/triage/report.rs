//! The assembled triage report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::analysis::{AnalysisKind, TriageAnalysis};
use super::dictionary::LocalClassification;

/// One completed analysis: the model's parsed reply plus the rule-based
/// dictionary signal it is compared against.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    /// Report identifier (for log correlation).
    pub report_id: Uuid,
    /// Which analysis produced this report.
    pub kind: AnalysisKind,
    /// Dictionary classification of the same input.
    pub local: LocalClassification,
    /// Typed view of the model reply.
    pub analysis: TriageAnalysis,
    /// Model that generated the reply.
    pub model: String,
    /// When the analysis completed.
    pub analyzed_at: DateTime<Utc>,
}

impl TriageReport {
    /// Assembles a report stamped with the current time.
    pub fn new(
        kind: AnalysisKind,
        local: LocalClassification,
        analysis: TriageAnalysis,
        model: impl Into<String>,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            kind,
            local,
            analysis,
            model: model.into(),
            analyzed_at: Utc::now(),
        }
    }
}
