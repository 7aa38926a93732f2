//! PPTX (Office Open XML) writer backend for deck generation.
//!
//! Assembles .pptx files, which are ZIP archives containing XML parts:
//! a presentation part, one slide master, three slide layouts (Title Slide,
//! Title and Content, Title Only), a theme, and one part per slide.

pub mod builder;
pub mod media;
pub mod template;
pub mod writer;

pub use builder::build_from_json;
pub use media::ImageFormat;
pub use writer::DeckWriter;
