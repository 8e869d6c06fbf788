//! Analysis kinds and the typed view of a model reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four analyses offered by the service.
///
/// Each kind differs only in its prompt and reply-token budget; the
/// request/extract/parse cycle is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Recommend one or two departments for the described symptoms.
    DepartmentReferral,
    /// Name and explain the symptoms found in the description.
    SymptomSummary,
    /// List conditions related to the described symptoms.
    RelatedConditions,
    /// Full assessment: departments, symptoms, conditions and urgency.
    UrgencyAssessment,
}

impl AnalysisKind {
    /// Reply-token budget for this analysis.
    ///
    /// The department referral asks for a single short list; the other
    /// analyses return described entries and need more room.
    pub fn max_new_tokens(&self) -> u32 {
        match self {
            AnalysisKind::DepartmentReferral => 256,
            _ => 384,
        }
    }
}

/// A `{name, description}` pair as produced by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDetail {
    /// Entry name, e.g. a symptom or condition (reply key `이름`).
    #[serde(rename = "이름", default)]
    pub name: String,
    /// One-sentence description (reply key `설명`).
    #[serde(rename = "설명", default)]
    pub description: String,
}

/// Typed view of the JSON object the model is prompted to return.
///
/// The prompt contract names four top-level keys; all of them are optional
/// and a reply that omits some (or all) still deserializes. Field names are
/// English, wire names are the Korean keys the prompts ask for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageAnalysis {
    /// Recommended departments (reply key `진료과`).
    #[serde(rename = "진료과", default)]
    pub departments: Vec<String>,

    /// Symptoms with descriptions (reply key `증상`).
    #[serde(rename = "증상", default)]
    pub symptoms: Vec<NamedDetail>,

    /// Related conditions with descriptions (reply key `관련 질환`).
    #[serde(rename = "관련 질환", default)]
    pub related_conditions: Vec<NamedDetail>,

    /// Urgency verdict (reply key `응급도`).
    #[serde(rename = "응급도", default)]
    pub urgency: Option<String>,
}

impl TriageAnalysis {
    /// Builds the typed view from a validated JSON document.
    ///
    /// Unrecognized keys are ignored; recognized keys must have the expected
    /// shape (e.g. `진료과` must be a list).
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// True when the reply carried none of the recognized keys.
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.symptoms.is_empty()
            && self.related_conditions.is_empty()
            && self.urgency.is_none()
    }
}
