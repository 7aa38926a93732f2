//! The `generate_presentation` tool front-end.
//!
//! Accepts either inline JSON text or a path to a JSON file, validates the
//! top-level shape, stages the deck JSON into the output directory, invokes
//! the deck builder, and cleans up. Failures are enumerated; the status
//! strings exist only at the boundary.

use deck_core::output_file_stem;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure classes of the tool front-end.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The input was neither a readable JSON file nor valid inline JSON.
    #[error("Failed to parse input as JSON. Make sure it's a valid JSON string or file.")]
    ParseJson,

    /// The parsed value is not an object with both required keys.
    #[error("Invalid JSON format. Must include 'topic' and 'slides'.")]
    InvalidFormat,

    /// Anything that went wrong while staging or building.
    #[error("Error generating presentation: {0}")]
    Generation(String),
}

/// Generate a presentation and return a status string describing the
/// outcome, as exposed to the tool host.
pub fn generate_presentation(json_input: &str, output_dir: &str) -> String {
    match run_generate(json_input, output_dir) {
        Ok(path) => format!("Presentation successfully saved as: {}", path.display()),
        Err(e) => e.to_string(),
    }
}

/// Generate a presentation, returning the absolute output path.
///
/// `output_dir` resolves relative to the current working directory and is
/// created if absent. Validation happens before anything touches the
/// filesystem.
pub fn run_generate(json_input: &str, output_dir: &str) -> Result<PathBuf, ToolError> {
    let data = resolve_input(json_input)?;

    let topic = match &data {
        Value::Object(map) if map.contains_key("topic") && map.contains_key("slides") => map
            .get("topic")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::Generation("'topic' must be a string".to_string()))?,
        _ => return Err(ToolError::InvalidFormat),
    };

    let stem = output_file_stem(topic);

    let cwd = env::current_dir().map_err(|e| ToolError::Generation(e.to_string()))?;
    let final_dir = cwd.join(output_dir);
    fs::create_dir_all(&final_dir).map_err(|e| ToolError::Generation(e.to_string()))?;

    let output_path = final_dir.join(format!("{stem}.pptx"));
    let temp_json_path = final_dir.join(format!("{stem}_temp.json"));

    let pretty = serde_json::to_string_pretty(&data)
        .map_err(|e| ToolError::Generation(e.to_string()))?;
    fs::write(&temp_json_path, pretty).map_err(|e| ToolError::Generation(e.to_string()))?;

    let result = deck_pptx::build_from_json(&temp_json_path, &output_path);

    // The staging file is removed on the error path too.
    if let Err(e) = fs::remove_file(&temp_json_path) {
        log::debug!(
            "Failed to remove temp file '{}': {}",
            temp_json_path.display(),
            e
        );
    }

    result.map_err(|e| ToolError::Generation(e.to_string()))?;
    Ok(output_path)
}

/// If the input names an existing file, parse its contents; otherwise
/// parse the input itself as JSON.
fn resolve_input(json_input: &str) -> Result<Value, ToolError> {
    if Path::new(json_input).is_file() {
        let content = fs::read_to_string(json_input)
            .map_err(|e| ToolError::Generation(e.to_string()))?;
        serde_json::from_str(&content).map_err(|_| ToolError::ParseJson)
    } else {
        serde_json::from_str(json_input).map_err(|_| ToolError::ParseJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID_FORMAT_MSG: &str = "Invalid JSON format. Must include 'topic' and 'slides'.";

    #[test]
    fn garbage_input_reports_parse_failure() {
        let status = generate_presentation("{not json", "unused");
        assert_eq!(
            status,
            "Failed to parse input as JSON. Make sure it's a valid JSON string or file."
        );
    }

    #[test]
    fn missing_topic_reports_invalid_format_and_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("never_created");
        let status =
            generate_presentation(r#"{"slides": []}"#, candidate.to_str().unwrap());
        assert_eq!(status, INVALID_FORMAT_MSG);
        assert!(!candidate.exists());
    }

    #[test]
    fn missing_slides_reports_invalid_format() {
        let status = generate_presentation(r#"{"topic": "T"}"#, "unused");
        assert_eq!(status, INVALID_FORMAT_MSG);
    }

    #[test]
    fn non_object_input_reports_invalid_format() {
        let status = generate_presentation(r#"[1, 2, 3]"#, "unused");
        assert_eq!(status, INVALID_FORMAT_MSG);
    }

    #[test]
    fn sanitized_topic_names_the_output_and_repeat_calls_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("decks");
        let json = r#"{"topic": "My Topic!", "slides": [{"slide_type": "title", "title": "A"}]}"#;

        let first = run_generate(json, out.to_str().unwrap()).unwrap();
        assert_eq!(first.file_name().unwrap(), "my_topic.pptx");
        assert!(first.exists());

        let second = run_generate(json, out.to_str().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_input_is_read_and_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.json");
        fs::write(
            &input,
            r#"{"topic": "From File", "slides": [{"slide_type": "title", "title": "A"}]}"#,
        )
        .unwrap();
        let out = dir.path().join("decks");
        let path = run_generate(input.to_str().unwrap(), out.to_str().unwrap()).unwrap();
        assert_eq!(path.file_name().unwrap(), "from_file.pptx");
    }

    #[test]
    fn temp_json_is_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("decks");
        run_generate(
            r#"{"topic": "Cleanup", "slides": []}"#,
            out.to_str().unwrap(),
        )
        .unwrap();
        assert!(!out.join("cleanup_temp.json").exists());
        assert!(out.join("cleanup.pptx").exists());
    }

    #[test]
    fn temp_json_is_removed_when_generation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("decks");
        // Occupy the output path with a directory so the final write fails.
        fs::create_dir_all(out.join("blocked.pptx")).unwrap();

        let err = run_generate(
            r#"{"topic": "Blocked", "slides": []}"#,
            out.to_str().unwrap(),
        );
        // Filename sanitizes to "blocked", colliding with the directory.
        assert!(matches!(err, Err(ToolError::Generation(_))));
        assert!(!out.join("blocked_temp.json").exists());
    }

    #[test]
    fn non_string_topic_is_a_generation_error() {
        let status = generate_presentation(r#"{"topic": 42, "slides": []}"#, "unused");
        assert!(status.starts_with("Error generating presentation:"));
    }
}
