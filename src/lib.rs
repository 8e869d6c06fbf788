//! Care Compass - AI-Assisted Symptom Triage Service
//!
//! This crate turns a free-text symptom description into a structured triage
//! report: a hosted language model is prompted in Korean, its free-form reply
//! is reduced to the embedded JSON object it contains, and the parsed fields
//! (departments, symptoms, related conditions, urgency) are returned alongside
//! a rule-based dictionary classification.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
