//! Shared helpers for null-token matching and run timing.

use std::time::Duration;

// =============================================================================
// Null Token Utilities
// =============================================================================

/// Markers that commonly stand for a missing value in exported CSV files.
///
/// Not recognized by default; opt in through
/// [`CleanerConfigBuilder::null_tokens`](crate::config::CleanerConfigBuilder::null_tokens)
/// or the CLI's `--common-null-tokens` flag.
pub const COMMON_NULL_TOKENS: [&str; 7] = ["na", "n/a", "#n/a", "null", "none", "nan", "missing"];

/// Check if a raw field is a null token.
///
/// A field that is empty after trimming is always a null token. Otherwise the
/// trimmed field is compared against `tokens` ignoring ASCII case.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_cleaner::utils::is_null_token;
///
/// assert!(is_null_token("   ", &[]));
/// assert!(is_null_token(" N/A ", &["n/a".to_string()]));
/// assert!(!is_null_token("0", &[]));
/// ```
pub fn is_null_token(value: &str, tokens: &[String]) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || tokens
            .iter()
            .any(|token| token.trim().eq_ignore_ascii_case(trimmed))
}

// =============================================================================
// Timing Utilities
// =============================================================================

/// Format a duration as seconds with two decimal places.
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_and_blank_are_null() {
        assert!(is_null_token("", &[]));
        assert!(is_null_token("   ", &[]));
        assert!(is_null_token("\t", &[]));
    }

    #[test]
    fn test_configured_tokens_match_case_insensitively() {
        let tokens = tokens(&["NA", "null"]);
        assert!(is_null_token("na", &tokens));
        assert!(is_null_token("  NULL ", &tokens));
        assert!(!is_null_token("NaN", &tokens));
        assert!(!is_null_token("nature", &tokens));
    }

    #[test]
    fn test_present_values_are_not_null() {
        assert!(!is_null_token("0", &[]));
        assert!(!is_null_token("false", &[]));
        assert!(!is_null_token(" HR ", &[]));
    }

    #[test]
    fn test_common_tokens_exclude_default_sentinel() {
        let tokens = tokens(&COMMON_NULL_TOKENS);
        assert!(!is_null_token(crate::config::DEFAULT_SENTINEL, &tokens));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_millis(1234)), "1.23");
        assert_eq!(format_seconds(Duration::ZERO), "0.00");
        assert_eq!(format_seconds(Duration::from_secs(2)), "2.00");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
