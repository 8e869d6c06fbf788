//! AnalyzeSymptomsHandler - the one request/extract/parse cycle shared by
//! every analysis endpoint.
//!
//! The flow mirrors what each original page did by hand: classify the text
//! against the local dictionary, build the Korean prompt for the requested
//! analysis, call the hosted model, reduce the reply to its embedded JSON
//! object, and assemble the report. Endpoints differ only in the
//! [`AnalysisKind`] they pass.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::extraction::{ExtractError, JsonExtractor};
use crate::domain::triage::{dictionary, prompts, AnalysisKind, TriageAnalysis, TriageReport};
use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Command to analyze one symptom description.
#[derive(Debug, Clone)]
pub struct AnalyzeSymptomsCommand {
    /// Free-text symptom description from the user.
    pub text: String,
    /// Which analysis to run.
    pub kind: AnalysisKind,
}

/// Errors that can occur while producing a triage report.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The symptom description was empty or whitespace.
    #[error("symptom description must not be empty")]
    EmptyInput,

    /// The hosted model call failed.
    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// No valid JSON object could be extracted from the model reply.
    #[error("failed to extract JSON from model reply: {0}")]
    Extraction(#[from] ExtractError),

    /// The reply parsed as JSON but did not match the analysis contract.
    #[error("model reply did not match the analysis contract: {reason}")]
    MalformedAnalysis { reason: String, raw: String },
}

impl TriageError {
    /// The raw model reply, when the failure happened after generation.
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            TriageError::Extraction(err) => Some(err.raw()),
            TriageError::MalformedAnalysis { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Handler for symptom analysis.
pub struct AnalyzeSymptomsHandler {
    generator: Arc<dyn TextGenerator>,
    extractor: JsonExtractor,
}

impl AnalyzeSymptomsHandler {
    /// Creates a handler with the default (lenient-fallback) extractor.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            extractor: JsonExtractor::new(),
        }
    }

    /// Replaces the extractor (e.g. to run strict-only).
    pub fn with_extractor(mut self, extractor: JsonExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Runs one analysis cycle and assembles the report.
    pub async fn handle(&self, command: AnalyzeSymptomsCommand) -> Result<TriageReport, TriageError> {
        let text = command.text.trim();
        if text.is_empty() {
            return Err(TriageError::EmptyInput);
        }

        let local = dictionary::classify(text);

        let prompt = prompts::build_prompt(command.kind, text);
        let request =
            GenerationRequest::new(prompt).with_max_new_tokens(command.kind.max_new_tokens());

        let response = self.generator.generate(request).await?;

        let value = self.extractor.parse(&response.content)?;
        let analysis =
            TriageAnalysis::from_value(value).map_err(|err| TriageError::MalformedAnalysis {
                reason: err.to_string(),
                raw: response.content.clone(),
            })?;

        if analysis.is_empty() {
            tracing::warn!(kind = ?command.kind, "model reply carried no recognized keys");
        }

        tracing::debug!(
            kind = ?command.kind,
            model = %response.model,
            local_matches = local.symptoms.len(),
            departments = analysis.departments.len(),
            "analysis complete"
        );

        Ok(TriageReport::new(
            command.kind,
            local,
            analysis,
            response.model,
        ))
    }
}
