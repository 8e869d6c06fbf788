//! HTTP routes for the triage endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    assess_urgency, explain_symptoms, health, recommend_departments, related_conditions,
    TriageAppState,
};

/// Creates the triage router with all routes.
pub fn triage_routes(state: TriageAppState) -> Router {
    Router::new()
        // POST /api/triage/departments
        .route("/api/triage/departments", post(recommend_departments))
        // POST /api/triage/symptoms
        .route("/api/triage/symptoms", post(explain_symptoms))
        // POST /api/triage/conditions
        .route("/api/triage/conditions", post(related_conditions))
        // POST /api/triage/assessment
        .route("/api/triage/assessment", post(assess_urgency))
        // GET /api/health
        .route("/api/health", get(health))
        .with_state(state)
}
