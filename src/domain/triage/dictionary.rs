//! Rule-based keyword-to-department lookup.
//!
//! A fixed table mapping Korean symptom keywords to departments, scanned in
//! a single pass over the user's text. This runs alongside every model call
//! as a fallback/comparison signal; it needs no network and never fails.

use serde::Serialize;

/// Symptom keyword to department mapping.
static SYMPTOM_DEPARTMENTS: &[(&str, &str)] = &[
    ("감기", "내과"),
    ("기침", "내과"),
    ("열", "내과"),
    ("두통", "신경과"),
    ("어지럼증", "신경과"),
    ("복통", "내과"),
    ("소화불량", "내과"),
    ("미식거림", "내과"),
    ("구토", "내과"),
    ("가슴통증", "순환기내과"),
    ("당뇨", "내분비내과"),
    ("고혈압", "순환기내과"),
    ("피부 가려움", "피부과"),
    ("발진", "피부과"),
    ("관절통", "정형외과"),
    ("허리통증", "정형외과"),
    ("눈 따가움", "안과"),
    ("시야 흐림", "안과"),
    ("청력 저하", "이비인후과"),
    ("목 통증", "이비인후과"),
];

/// Result of the dictionary scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalClassification {
    /// Departments mapped from matched keywords, deduplicated in
    /// first-match order.
    pub departments: Vec<String>,
    /// Symptom keywords found in the text, in table order.
    pub symptoms: Vec<String>,
}

impl LocalClassification {
    /// True when no keyword matched.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Scans `text` for known symptom keywords and maps them to departments.
pub fn classify(text: &str) -> LocalClassification {
    let mut result = LocalClassification::default();

    for (keyword, department) in SYMPTOM_DEPARTMENTS {
        if text.contains(keyword) {
            result.symptoms.push((*keyword).to_string());
            if !result.departments.iter().any(|d| d == department) {
                result.departments.push((*department).to_string());
            }
        }
    }

    result
}
