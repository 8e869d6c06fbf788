//! HTTP adapter for the triage endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TriageAppState;
pub use routes::triage_routes;
