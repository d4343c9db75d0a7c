use std::sync::OnceLock;

use regex::Regex;

/// Address used when neither the caller nor the résumé provides one.
pub const UNKNOWN_EMAIL: &str = "unknown@example.com";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("email pattern is valid"))
}

/// Picks the contact address for a request.
///
/// Explicit non-blank address wins, then the first address found in the text, then
/// `UNKNOWN_EMAIL`.
pub fn resolve_email(explicit: Option<&str>, resume_text: &str) -> String {
    if let Some(email) = explicit.map(str::trim).filter(|e| !e.is_empty()) {
        return email.to_string();
    }

    email_pattern()
        .find(resume_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_EMAIL.to_string())
}
