//! HTTP handlers for the triage endpoints.
//!
//! These handlers connect axum routes to the application layer. All four
//! endpoints run the same analysis cycle; they differ only in the
//! [`AnalysisKind`] passed along.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{AnalyzeSymptomsCommand, AnalyzeSymptomsHandler, TriageError};
use crate::domain::triage::AnalysisKind;
use crate::ports::GenerationError;

use super::dto::{AnalyzeRequest, ErrorResponse, TriageReportResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Triage API error that implements IntoResponse.
pub enum TriageApiError {
    BadRequest(String),
    UpstreamUnavailable(String),
    ExtractionFailed { message: String, raw_reply: String },
    Internal(String),
}

impl IntoResponse for TriageApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            TriageApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            TriageApiError::UpstreamUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::upstream_unavailable(msg),
            ),
            TriageApiError::ExtractionFailed { message, raw_reply } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::extraction_failed(message, raw_reply),
            ),
            TriageApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<TriageError> for TriageApiError {
    fn from(error: TriageError) -> Self {
        match error {
            TriageError::EmptyInput => {
                TriageApiError::BadRequest("Symptom description must not be empty".to_string())
            }
            TriageError::Generation(GenerationError::AuthenticationFailed) => {
                TriageApiError::Internal("Inference credential was rejected".to_string())
            }
            TriageError::Generation(err) => TriageApiError::UpstreamUnavailable(err.to_string()),
            TriageError::Extraction(err) => {
                let raw_reply = err.raw().to_string();
                TriageApiError::ExtractionFailed {
                    message: err.to_string(),
                    raw_reply,
                }
            }
            TriageError::MalformedAnalysis { reason, raw } => TriageApiError::ExtractionFailed {
                message: format!("Model reply did not match the analysis contract: {reason}"),
                raw_reply: raw,
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the analysis handler.
#[derive(Clone)]
pub struct TriageAppState {
    pub analyze_handler: Arc<AnalyzeSymptomsHandler>,
}

impl TriageAppState {
    pub fn new(analyze_handler: Arc<AnalyzeSymptomsHandler>) -> Self {
        Self { analyze_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/triage/departments
///
/// Recommends one or two departments for the described symptoms.
pub async fn recommend_departments(
    State(state): State<TriageAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TriageReportResponse>, TriageApiError> {
    run_analysis(&state, AnalysisKind::DepartmentReferral, request).await
}

/// POST /api/triage/symptoms
///
/// Names and explains the symptoms found in the description.
pub async fn explain_symptoms(
    State(state): State<TriageAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TriageReportResponse>, TriageApiError> {
    run_analysis(&state, AnalysisKind::SymptomSummary, request).await
}

/// POST /api/triage/conditions
///
/// Lists conditions related to the described symptoms.
pub async fn related_conditions(
    State(state): State<TriageAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TriageReportResponse>, TriageApiError> {
    run_analysis(&state, AnalysisKind::RelatedConditions, request).await
}

/// POST /api/triage/assessment
///
/// Full assessment: departments, symptoms, related conditions and urgency.
pub async fn assess_urgency(
    State(state): State<TriageAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TriageReportResponse>, TriageApiError> {
    run_analysis(&state, AnalysisKind::UrgencyAssessment, request).await
}

/// GET /api/health
///
/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn run_analysis(
    state: &TriageAppState,
    kind: AnalysisKind,
    request: AnalyzeRequest,
) -> Result<Json<TriageReportResponse>, TriageApiError> {
    let command = AnalyzeSymptomsCommand {
        text: request.text,
        kind,
    };

    let report = state.analyze_handler.handle(command).await?;

    Ok(Json(TriageReportResponse::from(report)))
}
