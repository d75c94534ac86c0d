//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Email shape accepted at registration: ASCII word characters, one `@`, a
/// single domain label and a lowercase TLD of two or more letters.
///
/// `\w` is forced to ASCII; Unicode letters are rejected.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?-u:\w)+@(?-u:\w)+\.[a-z]{2,}$").expect("email pattern is valid")
});

/// Check if an email address has the accepted shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Mask a login identifier or token for logging, keeping a short prefix
///
/// `"alice@example.com"` becomes `"ali***"`.
pub fn mask_identifier(value: &str) -> String {
    let visible: String = value.chars().take(3).collect();
    format!("{}***", visible)
}
