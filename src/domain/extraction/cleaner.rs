//! Model reply cleanup.
//!
//! Hosted-model output rarely arrives as bare JSON: replies come wrapped in
//! markdown code fences, trail off into repeated polite filler when the model
//! degenerates into a repetition loop, or pick up stray symbol characters
//! that break strict parsing. [`ResponseCleaner`] repairs the common cases
//! without attempting full recovery.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Trailing filler phrase collapsed by the noise pass unless overridden.
pub const DEFAULT_FILLER_PHRASE: &str = "감사합니다.";

/// Markdown code fence delimiters, with optional language tag.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|python)?\r?\n?").expect("valid fence pattern"));

/// Cleans raw model replies before extraction.
///
/// Each cleanup step produces a new string; the input is never mutated in
/// place.
#[derive(Debug, Clone)]
pub struct ResponseCleaner {
    filler_phrase: String,
    filler_run: Regex,
}

impl ResponseCleaner {
    /// Creates a cleaner with the default filler phrase.
    pub fn new() -> Self {
        Self::build(DEFAULT_FILLER_PHRASE.to_string())
    }

    /// Overrides the filler phrase collapsed by [`sanitize_noise`].
    ///
    /// [`sanitize_noise`]: ResponseCleaner::sanitize_noise
    pub fn with_filler_phrase(self, phrase: impl Into<String>) -> Self {
        Self::build(phrase.into())
    }

    fn build(filler_phrase: String) -> Self {
        // Three or more consecutive repetitions, optionally whitespace-separated.
        let pattern = format!(r"(?:{}\s*){{3,}}", regex::escape(&filler_phrase));
        let filler_run = Regex::new(&pattern).expect("valid filler pattern");
        Self {
            filler_phrase,
            filler_run,
        }
    }

    /// Removes markdown code fence delimiters anywhere in the string and
    /// trims surrounding whitespace.
    ///
    /// Always succeeds and is idempotent; input without fences is returned
    /// trimmed but otherwise unchanged.
    pub fn strip_code_fences(&self, text: &str) -> String {
        CODE_FENCE.replace_all(text, "").trim().to_string()
    }

    /// Hardening pass for degenerate replies.
    ///
    /// - Collapses runs of the filler phrase (three or more consecutive
    ///   repetitions) down to a single instance.
    /// - Normalizes to Unicode NFC, so decomposed Hangul survives the
    ///   allow-list below.
    /// - Drops characters outside the allowed set: Hangul syllables, ASCII
    ///   letters and digits, the punctuation `. , ! ? ( )`, whitespace, and
    ///   the JSON structural characters.
    ///
    /// The allow-list is intentionally narrow and will strip other scripts
    /// and symbols from description fields; callers that cannot tolerate
    /// that should rely on the lenient fallback path instead.
    pub fn sanitize_noise(&self, text: &str) -> String {
        let collapsed = self
            .filler_run
            .replace_all(text, self.filler_phrase.as_str());

        collapsed
            .nfc()
            .filter(|c| is_allowed(*c))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl Default for ResponseCleaner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_allowed(c: char) -> bool {
    matches!(c, '가'..='힣')
        || c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | '(' | ')')
        || matches!(c, '{' | '}' | '[' | ']' | ':' | '"' | '-')
}
