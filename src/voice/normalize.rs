//! Transcript normalization shared by matching and passphrase checks

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lower-case, trim and collapse whitespace runs to a single space
///
/// Blank input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    WHITESPACE_RUN.replace_all(lowered.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_case_and_spacing() {
        assert_eq!(normalize("  Show   JOBS "), "show jobs");
    }

    #[test]
    fn tabs_and_newlines_count_as_whitespace() {
        assert_eq!(normalize("create\t\tinvoice\nnow"), "create invoice now");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("  Let ME   in ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn lowercases_non_ascii() {
        assert_eq!(normalize("ÜBERSICHT  Zeigen"), "übersicht zeigen");
    }
}
