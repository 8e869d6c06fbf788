//! HTTP DTOs for the triage endpoints.
//!
//! Wire names are English throughout; the Korean reply keys of the model
//! contract stay inside the domain layer.

use serde::{Deserialize, Serialize};

use crate::domain::triage::{AnalysisKind, TriageReport};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body accepted by every analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text symptom description.
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A named entry with its one-sentence description.
#[derive(Debug, Clone, Serialize)]
pub struct NamedDetailDto {
    pub name: String,
    pub description: String,
}

/// Dictionary classification of the submitted text.
#[derive(Debug, Clone, Serialize)]
pub struct LocalClassificationDto {
    pub departments: Vec<String>,
    pub symptoms: Vec<String>,
}

/// A completed analysis, as returned to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReportResponse {
    pub report_id: String,
    pub kind: AnalysisKind,
    pub departments: Vec<String>,
    pub symptoms: Vec<NamedDetailDto>,
    pub related_conditions: Vec<NamedDetailDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    pub local: LocalClassificationDto,
    pub model: String,
    pub analyzed_at: String,
}

impl From<TriageReport> for TriageReportResponse {
    fn from(report: TriageReport) -> Self {
        Self {
            report_id: report.report_id.to_string(),
            kind: report.kind,
            departments: report.analysis.departments,
            symptoms: report
                .analysis
                .symptoms
                .into_iter()
                .map(|d| NamedDetailDto {
                    name: d.name,
                    description: d.description,
                })
                .collect(),
            related_conditions: report
                .analysis
                .related_conditions
                .into_iter()
                .map(|d| NamedDetailDto {
                    name: d.name,
                    description: d.description,
                })
                .collect(),
            urgency: report.analysis.urgency,
            local: LocalClassificationDto {
                departments: report.local.departments,
                symptoms: report.local.symptoms,
            },
            model: report.model,
            analyzed_at: report.analyzed_at.to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "UPSTREAM_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Extraction failed; the raw model reply rides along for diagnosis.
    pub fn extraction_failed(message: impl Into<String>, raw_reply: impl Into<String>) -> Self {
        Self {
            code: "EXTRACTION_FAILED".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "raw_response": raw_reply.into() })),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::{LocalClassification, TriageAnalysis};
    use serde_json::json;

    #[test]
    fn report_response_uses_english_wire_names() {
        let analysis = TriageAnalysis::from_value(json!({
            "진료과": ["내과"],
            "증상": [{"이름": "기침", "설명": "기침이 나요."}],
            "응급도": "낮음"
        }))
        .unwrap();
        let report = TriageReport::new(
            AnalysisKind::UrgencyAssessment,
            LocalClassification::default(),
            analysis,
            "mock-model",
        );

        let response = TriageReportResponse::from(report);
        let wire = serde_json::to_value(&response).unwrap();

        assert_eq!(wire["departments"][0], "내과");
        assert_eq!(wire["symptoms"][0]["name"], "기침");
        assert_eq!(wire["urgency"], "낮음");
        assert!(wire.get("진료과").is_none());
    }

    #[test]
    fn absent_urgency_is_omitted_from_wire() {
        let report = TriageReport::new(
            AnalysisKind::DepartmentReferral,
            LocalClassification::default(),
            TriageAnalysis::default(),
            "mock-model",
        );

        let wire = serde_json::to_value(TriageReportResponse::from(report)).unwrap();
        assert!(wire.get("urgency").is_none());
    }

    #[test]
    fn extraction_failed_attaches_raw_reply() {
        let error = ErrorResponse::extraction_failed("no JSON found", "응답 원문");
        let wire = serde_json::to_value(&error).unwrap();

        assert_eq!(wire["code"], "EXTRACTION_FAILED");
        assert_eq!(wire["details"]["raw_response"], "응답 원문");
    }
}
