//! Topic-to-filename sanitization.
//!
//! The output filename is derived from the deck topic: characters outside
//! word/space/hyphen classes are dropped, surrounding whitespace trimmed,
//! internal whitespace replaced with underscores, and the result lowercased.
//! A topic that sanitizes to nothing falls back to a timestamped name.

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching characters that are not word characters, whitespace, or
/// hyphens. These are stripped from the topic.
static DISALLOWED_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Regex matching runs of internal whitespace, each replaced by a single
/// underscore.
static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize a topic string into a filename stem.
///
/// Returns `None` when nothing survives sanitization (e.g. a topic made
/// entirely of punctuation).
pub fn sanitize_topic(topic: &str) -> Option<String> {
    let stripped = DISALLOWED_CHARS_REGEX.replace_all(topic, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    let underscored = WHITESPACE_RUN_REGEX.replace_all(trimmed, "_");
    Some(underscored.to_lowercase())
}

/// Derive the output filename stem for a topic, falling back to a
/// timestamp-based name when the topic sanitizes to nothing.
pub fn output_file_stem(topic: &str) -> String {
    sanitize_topic(topic).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("presentation_{}", timestamp)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(sanitize_topic("My Topic!"), Some("my_topic".to_string()));
    }

    #[test]
    fn keeps_hyphens_and_underscores() {
        assert_eq!(
            sanitize_topic("Rust - The_Language"),
            Some("rust_-_the_language".to_string())
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize_topic("a   b\tc"), Some("a_b_c".to_string()));
    }

    #[test]
    fn trims_before_underscoring() {
        assert_eq!(sanitize_topic("  Hello World  "), Some("hello_world".to_string()));
    }

    #[test]
    fn empty_after_sanitization_yields_none() {
        assert_eq!(sanitize_topic("!!!"), None);
        assert_eq!(sanitize_topic(""), None);
        assert_eq!(sanitize_topic("   "), None);
    }

    #[test]
    fn stem_is_stable_for_same_topic() {
        assert_eq!(output_file_stem("My Topic!"), output_file_stem("My Topic!"));
        assert_eq!(output_file_stem("My Topic!"), "my_topic");
    }

    #[test]
    fn stem_falls_back_to_timestamp() {
        let stem = output_file_stem("???");
        assert!(stem.starts_with("presentation_"), "got {}", stem);
    }
}
