//! Domain types for describing a slide deck.
//!
//! A deck arrives as JSON with a `topic` and an ordered list of slide
//! entries discriminated by `slide_type`. Unrecognized entries are kept as
//! [`Slide::Unknown`] so the builder can report them without aborting the
//! rest of the deck.

use serde::Deserialize;

/// A full deck description: topic plus ordered slides.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    /// Topic used to derive the output filename. Presence is enforced at
    /// the tool boundary, not here.
    #[serde(default)]
    pub topic: String,

    /// Slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck with the given topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of entries that will produce a slide in the output.
    pub fn renderable_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| !matches!(s, Slide::Unknown { .. }))
            .count()
    }
}

/// A single slide entry, discriminated by its `slide_type` tag.
///
/// The set is closed: matching on this enum is exhaustive, so adding a new
/// slide type is a compile-time-checked change in every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSlide")]
pub enum Slide {
    /// `slide_type = "title"`: title layout with an optional subtitle.
    Title {
        title: String,
        subtitle: Option<String>,
    },

    /// `slide_type = "bullet"`: title-and-content layout with one paragraph
    /// per bullet string, in input order.
    Bullet { title: String, bullets: Vec<String> },

    /// `slide_type = "image"`: title-only layout with an optional picture.
    Image {
        title: String,
        image_path: Option<String>,
    },

    /// Any other (or missing) tag. Produces no slide; the tag is kept for
    /// diagnostics.
    Unknown { slide_type: Option<String> },
}

impl Slide {
    /// The title text of this entry, if it renders a slide.
    pub fn title(&self) -> Option<&str> {
        match self {
            Slide::Title { title, .. }
            | Slide::Bullet { title, .. }
            | Slide::Image { title, .. } => Some(title),
            Slide::Unknown { .. } => None,
        }
    }
}

/// Untyped slide record as it appears on the wire.
///
/// Field-level defaults match the original behavior: a missing `title` is
/// an empty string, missing lists are empty.
#[derive(Debug, Deserialize)]
struct RawSlide {
    #[serde(default)]
    slide_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    bullets: Option<Vec<String>>,
    #[serde(default)]
    image_path: Option<String>,
}

impl From<RawSlide> for Slide {
    fn from(raw: RawSlide) -> Self {
        let title = raw.title.unwrap_or_default();
        match raw.slide_type.as_deref() {
            Some("title") => Slide::Title {
                title,
                subtitle: raw.subtitle,
            },
            Some("bullet") => Slide::Bullet {
                title,
                bullets: raw.bullets.unwrap_or_default(),
            },
            Some("image") => Slide::Image {
                title,
                image_path: raw.image_path,
            },
            _ => Slide::Unknown {
                slide_type: raw.slide_type,
            },
        }
    }
}
