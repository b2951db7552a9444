//! Total lookups between language names and canonical codes.

use crate::i18n::LanguageRegistry;

/// Normalize a language token to its canonical code.
///
/// Accepts a native name ("한국어"), an English name ("Korean") or a code.
/// Unrecognized tokens, including codes, are returned verbatim, which makes
/// this idempotent on canonical codes.
pub fn to_code(token: &str) -> String {
    LanguageRegistry::get()
        .get_by_name(token)
        .map(|lang| lang.code.to_string())
        .unwrap_or_else(|| token.to_string())
}

/// English display name for a code, or the code itself when unknown.
pub fn to_display_name(code: &str) -> String {
    LanguageRegistry::get()
        .get_by_code(code)
        .map(|lang| lang.name.to_string())
        .unwrap_or_else(|| code.to_string())
}
