//! Locating and validating the JSON object embedded in a model reply.

use serde_json::Value;
use thiserror::Error;

use super::cleaner::ResponseCleaner;

/// Errors that can occur during extraction.
///
/// Both variants carry the offending raw text so a caller can display it
/// for diagnosis. Both are local, recoverable conditions; the caller decides
/// whether to retry with a laxer strategy, show the raw reply to the end
/// user, or abandon the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No balanced `{...}` region exists in the text.
    #[error("no JSON object found in model reply")]
    NoJsonFound { raw: String },

    /// Balanced brace regions were found, but none of them is a
    /// structurally valid JSON document.
    #[error("extracted span is not valid JSON: {reason}")]
    InvalidJsonSyntax { raw: String, reason: String },
}

impl ExtractError {
    /// The raw model reply that failed extraction.
    pub fn raw(&self) -> &str {
        match self {
            ExtractError::NoJsonFound { raw } => raw,
            ExtractError::InvalidJsonSyntax { raw, .. } => raw,
        }
    }
}

/// What to do when the strict cleanup path fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Fail immediately with the strict-path error.
    Strict,
    /// Retry with only fence stripping applied: first a direct whole-string
    /// parse attempt, then a brace scan over the unsanitized text.
    #[default]
    Lenient,
}

/// Extracts the first valid JSON object from a noisy text blob.
///
/// The scan walks the text left to right keeping a brace depth counter that
/// is aware of string literals and escapes, so a `}` inside a JSON string
/// does not close a span. Every time a top-level group closes, the candidate
/// span is parse-validated immediately; the first candidate that parses is
/// returned. A balanced-but-invalid group earlier in the text therefore does
/// not mask a valid object after it.
///
/// # Example
///
/// ```
/// use care_compass::domain::extraction::JsonExtractor;
///
/// let extractor = JsonExtractor::new();
/// let value = extractor
///     .parse("물론입니다! {\"진료과\": [\"내과\"]} 빠른 쾌유를 빕니다.")
///     .unwrap();
/// assert_eq!(value["진료과"][0], "내과");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor {
    cleaner: ResponseCleaner,
    policy: FallbackPolicy,
}

impl JsonExtractor {
    /// Creates an extractor with the default cleaner and lenient fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback policy.
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the response cleaner.
    pub fn with_cleaner(mut self, cleaner: ResponseCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Turns one raw model reply into one validated JSON document.
    ///
    /// Strict path: strip code fences, sanitize noise, extract. With
    /// [`FallbackPolicy::Lenient`], a failed strict pass is retried with
    /// only fence stripping applied before the strict error is surfaced.
    pub fn parse(&self, raw: &str) -> Result<Value, ExtractError> {
        let unfenced = self.cleaner.strip_code_fences(raw);
        let sanitized = self.cleaner.sanitize_noise(&unfenced);

        let strict_err = match self.scan(&sanitized, raw) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if self.policy == FallbackPolicy::Lenient {
            // Second chance: the sanitize pass can eat legitimate payload
            // characters, so retry against the merely fence-stripped text.
            if let Ok(value) = serde_json::from_str::<Value>(&unfenced) {
                if value.is_object() {
                    return Ok(value);
                }
            }
            if let Ok(value) = self.scan(&unfenced, raw) {
                return Ok(value);
            }
        }

        Err(strict_err)
    }

    /// Returns the first balanced `{...}` region of `text` that parses as a
    /// JSON document.
    ///
    /// Candidates are considered strictly in left-to-right scan order; the
    /// scan never prefers a larger, later, or content-selected match.
    pub fn extract_first_object(&self, text: &str) -> Result<Value, ExtractError> {
        self.scan(text, text)
    }

    fn scan(&self, text: &str, raw: &str) -> Result<Value, ExtractError> {
        let mut depth = 0usize;
        let mut start = None;
        let mut in_string = false;
        let mut escape_next = false;
        let mut last_reason = None;

        for (i, c) in text.char_indices() {
            if in_string {
                if escape_next {
                    escape_next = false;
                } else if c == '\\' {
                    escape_next = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }

            match c {
                // Quotes in prose outside any brace group are not JSON
                // string delimiters; only track strings inside a candidate.
                '"' if depth > 0 => in_string = true,
                '{' => {
                    if depth == 0 {
                        start = Some(i);
                    }
                    depth += 1;
                }
                '}' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start.take() {
                            let span = &text[s..i + 1];
                            match serde_json::from_str::<Value>(span) {
                                Ok(value) => return Ok(value),
                                Err(err) => last_reason = Some(err.to_string()),
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        match last_reason {
            Some(reason) => Err(ExtractError::InvalidJsonSyntax {
                raw: raw.to_string(),
                reason,
            }),
            None => Err(ExtractError::NoJsonFound {
                raw: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_object() {
        let extractor = JsonExtractor::new();
        let value = extractor.parse(r#"{"진료과": ["내과"]}"#).unwrap();
        assert_eq!(value, json!({"진료과": ["내과"]}));
    }

    #[test]
    fn parses_object_embedded_in_prose() {
        let extractor = JsonExtractor::new();
        let value = extractor
            .parse(r#"Sure! Here is the result: {"진료과": ["내과"]} Hope that helps!"#)
            .unwrap();
        assert_eq!(value, json!({"진료과": ["내과"]}));
    }

    #[test]
    fn parses_fenced_object() {
        let extractor = JsonExtractor::new();
        let value = extractor.parse("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn first_of_two_sequential_groups_wins() {
        let extractor = JsonExtractor::new();
        let value = extractor.parse(r#"{"x":1} and also {"y":2}"#).unwrap();
        assert_eq!(value, json!({"x": 1}));
    }

    #[test]
    fn no_brace_fails_with_no_json_found() {
        let extractor = JsonExtractor::new();
        let err = extractor.parse("증상이 심하면 병원에 방문하세요.").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound { .. }));
    }

    #[test]
    fn unbalanced_open_brace_never_returns_a_value() {
        let extractor = JsonExtractor::new();
        let err = extractor.parse(r#"{"a": [1, 2"#).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::NoJsonFound { .. } | ExtractError::InvalidJsonSyntax { .. }
        ));
    }

    #[test]
    fn sole_malformed_group_fails_with_invalid_syntax() {
        let extractor = JsonExtractor::new().with_policy(FallbackPolicy::Strict);
        let err = extractor.parse(r#"{"a": }"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJsonSyntax { .. }));
    }

    #[test]
    fn error_carries_raw_reply() {
        let extractor = JsonExtractor::new();
        let raw = "죄송하지만 결과를 드릴 수 없습니다.";
        let err = extractor.parse(raw).unwrap_err();
        assert_eq!(err.raw(), raw);
    }

    #[test]
    fn invalid_group_does_not_mask_later_valid_object() {
        let extractor = JsonExtractor::new();
        let value = extractor
            .parse(r#"{oops} then the real one {"응급도": "낮음"}"#)
            .unwrap();
        assert_eq!(value, json!({"응급도": "낮음"}));
    }

    #[test]
    fn nested_objects_stay_in_one_span() {
        let extractor = JsonExtractor::new();
        let value = extractor
            .parse(r#"결과: {"증상": [{"이름": "두통", "설명": "머리가 아픕니다."}]}"#)
            .unwrap();
        assert_eq!(value["증상"][0]["이름"], "두통");
    }

    #[test]
    fn brace_inside_string_does_not_close_span() {
        let extractor = JsonExtractor::new();
        let value = extractor.parse(r#"{"a": "}"}"#).unwrap();
        assert_eq!(value, json!({"a": "}"}));
    }

    #[test]
    fn repeated_filler_does_not_disturb_extraction() {
        let extractor = JsonExtractor::new().with_policy(FallbackPolicy::Strict);
        let filler = "감사합니다.".repeat(5);
        let input = format!("{{\"진료과\": [\"내과\"]}} {filler}");
        let value = extractor.parse(&input).unwrap();
        assert_eq!(value, json!({"진료과": ["내과"]}));
    }

    #[test]
    fn strict_policy_surfaces_sanitize_damage() {
        // Backslashes are outside the sanitize allow-list, so escaped quotes
        // lose their escapes on the strict path; the lenient fallback
        // recovers the payload untouched.
        let input = r#"{"설명": "이른바 \"독감\" 증상입니다."}"#;

        let strict = JsonExtractor::new().with_policy(FallbackPolicy::Strict);
        assert!(strict.parse(input).is_err());

        let lenient = JsonExtractor::new();
        let value = lenient.parse(input).unwrap();
        assert_eq!(value["설명"], "이른바 \"독감\" 증상입니다.");
    }

    #[test]
    fn lenient_fallback_accepts_whole_string_parse_only_for_objects() {
        let extractor = JsonExtractor::new();
        let err = extractor.parse(r#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound { .. }));
    }

    #[test]
    fn extract_first_object_reports_input_as_raw() {
        let extractor = JsonExtractor::new();
        let err = extractor.extract_first_object("no json here").unwrap_err();
        assert_eq!(err.raw(), "no json here");
    }
}
