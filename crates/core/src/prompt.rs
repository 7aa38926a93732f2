//! Prompt template for requesting deck JSON from a language model.
//!
//! Pure string assembly: a tone-specific instruction, the topic, a
//! JSON-only directive, and a literal example of the expected schema.

use std::fmt;

/// Audience/style preset for the presentation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    Business,
    #[default]
    Student,
    Teacher,
    Child,
}

impl Tone {
    /// Parse a tone keyword, case-insensitively. Unrecognized keywords fall
    /// back to [`Tone::Student`].
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "business" => Tone::Business,
            "student" => Tone::Student,
            "teacher" => Tone::Teacher,
            "child" => Tone::Child,
            _ => Tone::Student,
        }
    }

    /// The instruction sentence for this tone.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Business => {
                "Create a formal and professional PowerPoint presentation for a business audience. \
                 Use concise bullet points, data visualizations, and structured formatting."
            }
            Tone::Student => {
                "Create an educational and engaging PowerPoint presentation for students. \
                 Use clear explanations, visual aids, and simple language."
            }
            Tone::Teacher => {
                "Create an instructional PowerPoint presentation for teachers. \
                 Include detailed concepts, examples, and talking points for classroom teaching."
            }
            Tone::Child => {
                "Create a fun and colorful PowerPoint presentation for children. \
                 Use simple language, large fonts, and cartoon-style images."
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Business => "business",
            Tone::Student => "student",
            Tone::Teacher => "teacher",
            Tone::Child => "child",
        };
        f.write_str(name)
    }
}

/// Build the instruction prompt for generating deck JSON on a topic.
///
/// The tone keyword is parsed leniently; anything unrecognized means
/// "student". The returned string tells the model to output JSON only and
/// shows the exact shape the deck builder accepts.
pub fn presentation_prompt(topic: &str, tone: &str) -> String {
    let instruction = Tone::parse(tone).instruction();

    format!(
        "{instruction}\n\n\
         Topic: \"{topic}\"\n\n\
         **Important:** Only output JSON — do NOT include any explanation, markdown, or HTML.\n\n\
         The JSON structure must look like this:\n\
         {{\n\
         \x20 \"topic\": \"{topic}\",\n\
         \x20 \"slides\": [\n\
         \x20   {{\n\
         \x20     \"slide_type\": \"title\",\n\
         \x20     \"title\": \"Slide Title\",\n\
         \x20     \"subtitle\": \"Optional subtitle\"\n\
         \x20   }},\n\
         \x20   {{\n\
         \x20     \"slide_type\": \"bullet\",\n\
         \x20     \"title\": \"Key Points\",\n\
         \x20     \"bullets\": [\"Point 1\", \"Point 2\"]\n\
         \x20   }},\n\
         \x20   {{\n\
         \x20     \"slide_type\": \"image\",\n\
         \x20     \"title\": \"A Picture\",\n\
         \x20     \"image_path\": \"optional/path/to/image.png\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tones() {
        assert_eq!(Tone::parse("business"), Tone::Business);
        assert_eq!(Tone::parse("TEACHER"), Tone::Teacher);
        assert_eq!(Tone::parse("Child"), Tone::Child);
    }

    #[test]
    fn unknown_tone_falls_back_to_student() {
        assert_eq!(Tone::parse("pirate"), Tone::Student);
        assert_eq!(Tone::parse(""), Tone::Student);
    }

    #[test]
    fn prompt_contains_topic_and_instruction() {
        let prompt = presentation_prompt("Rust Basics", "teacher");
        assert!(prompt.contains("Topic: \"Rust Basics\""));
        assert!(prompt.contains("instructional PowerPoint presentation for teachers"));
        assert!(prompt.contains("\"slide_type\": \"bullet\""));
    }

    #[test]
    fn prompt_defaults_to_student_tone() {
        let prompt = presentation_prompt("Anything", "robot");
        assert!(prompt.contains("for students"));
    }
}
