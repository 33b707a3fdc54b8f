//! Window-title privacy filtering.
//!
//! Window titles arrive as free text from the desktop agent and may name
//! whatever the user had on screen. Titles are filtered once, before
//! persistence; the stored value is either the original text or the fixed
//! [`REDACTION_PLACEHOLDER`] — never a partial redaction.

/// Replacement value stored when a title matches the denylist.
pub const REDACTION_PLACEHOLDER: &str = "[Filtered — sensitive content]";

/// Terms that cause the entire title to be redacted.
///
/// Matching is case-insensitive substring containment, so "MyBank — Login"
/// and "PASSWORDS.txt" both redact.
pub const SENSITIVE_TERMS: &[&str] = &[
    "bank",
    "password",
    "credential",
    "secret",
    "private",
    "payroll",
    "salary",
];

/// Filter a window title prior to persistence.
///
/// Returns [`REDACTION_PLACEHOLDER`] if the title contains any sensitive
/// term in any casing; otherwise returns the title unchanged. Pure — no
/// side effects, no failure mode.
pub fn filter_window_title(title: &str) -> String {
    let lower = title.to_lowercase();
    for term in SENSITIVE_TERMS {
        if lower.contains(term) {
            return REDACTION_PLACEHOLDER.to_string();
        }
    }
    title.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_passes_through_unchanged() {
        assert_eq!(filter_window_title("main.rs — Editor"), "main.rs — Editor");
        assert_eq!(filter_window_title(""), "");
    }

    #[test]
    fn denylisted_term_redacts_whole_title() {
        assert_eq!(
            filter_window_title("Chase Bank — Account Overview"),
            REDACTION_PLACEHOLDER
        );
        assert_eq!(
            filter_window_title("payroll_2026_q3.xlsx"),
            REDACTION_PLACEHOLDER
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(filter_window_title("PASSWORD manager"), REDACTION_PLACEHOLDER);
        assert_eq!(filter_window_title("PaYrOlL"), REDACTION_PLACEHOLDER);
    }

    #[test]
    fn substring_match_inside_larger_word_redacts() {
        // "private" inside "privately" still counts.
        assert_eq!(
            filter_window_title("shared privately with you"),
            REDACTION_PLACEHOLDER
        );
    }

    #[test]
    fn every_denylisted_term_triggers_redaction() {
        for term in SENSITIVE_TERMS {
            let title = format!("window about {term} stuff");
            assert_eq!(filter_window_title(&title), REDACTION_PLACEHOLDER);
        }
    }
}
