//! Shared helper functions for CLI commands

use crate::core::FieldValue;

/// Render a field value for single-line display
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(items) => items.join(", "),
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&FieldValue::Number(170)), "170");
        assert_eq!(format_value(&FieldValue::Text("Pune".into())), "Pune");
        assert_eq!(
            format_value(&FieldValue::List(vec!["Reading".into(), "Music".into()])),
            "Reading, Music"
        );
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        // Counts characters, not bytes; must never split a code point
        assert_eq!(truncate_str("जन्म कुंडली", 11), "जन्म कुंडली");
        assert_eq!(truncate_str("αβγδεζηθ", 7), "αβγδ...");
    }
}
