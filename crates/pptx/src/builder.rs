//! File-based entry point for deck generation.

use crate::writer::DeckWriter;
use deck_core::{Deck, Result};
use std::fs;
use std::path::Path;

/// Read a JSON deck description from `json_path` and write the rendered
/// presentation to `output_path`.
///
/// An unreadable input or malformed JSON is returned as a typed error and
/// no output file is written. Per-slide problems are logged and do not
/// fail the build.
pub fn build_from_json(json_path: &Path, output_path: &Path) -> Result<()> {
    let content = fs::read_to_string(json_path)?;
    let deck: Deck = serde_json::from_str(&content)?;

    log::debug!(
        "Building {} renderable slides (of {} entries) for topic '{}'",
        deck.renderable_count(),
        deck.slides.len(),
        deck.topic
    );

    DeckWriter::new().write_file(&deck, output_path)?;
    log::info!("Presentation saved as '{}'", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Error;

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pptx");
        let err = build_from_json(&dir.path().join("nope.json"), &output).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!output.exists());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, "{not json").unwrap();
        let output = dir.path().join("out.pptx");
        let err = build_from_json(&input, &output).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(!output.exists());
    }

    #[test]
    fn valid_deck_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.json");
        fs::write(
            &input,
            r#"{"topic": "T", "slides": [{"slide_type": "title", "title": "Hello"}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out.pptx");
        build_from_json(&input, &output).unwrap();
        assert!(output.exists());
    }
}
