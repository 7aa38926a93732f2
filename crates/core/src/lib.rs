//! Core domain types, topic sanitization, and prompt templates
//! for JSON-driven presentation generation.

pub mod deck;
pub mod error;
pub mod prompt;
pub mod sanitize;

pub use deck::{Deck, Slide};
pub use error::{Error, Result};
pub use prompt::{presentation_prompt, Tone};
pub use sanitize::{output_file_stem, sanitize_topic};
