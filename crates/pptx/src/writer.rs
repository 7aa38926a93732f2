//! Deck-to-PPTX writer.
//!
//! Turns a [`Deck`] into a complete OOXML package. Dispatch over the slide
//! sum type is exhaustive: title entries use the Title Slide layout, bullet
//! entries the Title and Content layout, image entries the Title Only
//! layout, and unknown entries are skipped with a warning. Per-slide
//! problems (a missing or unreadable image) never abort the rest of the
//! deck.

use crate::media::ImageFormat;
use crate::template;
use deck_core::{Deck, Error, Result, Slide};
use quick_xml::escape::escape;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Fixed picture position: 1 inch from the left.
const IMAGE_LEFT_EMU: i64 = 914_400;
/// Fixed picture position: 2 inches from the top.
const IMAGE_TOP_EMU: i64 = 1_828_800;
/// Fixed picture display width: 6 inches.
const IMAGE_WIDTH_EMU: i64 = 5_486_400;
/// Picture height used when the image dimensions cannot be decoded (4.5").
const IMAGE_FALLBACK_HEIGHT_EMU: i64 = 4_114_800;

/// The slide layout a slide part is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutKind {
    /// Title Slide (centered title and subtitle).
    Title,
    /// Title and Content.
    Content,
    /// Title Only.
    TitleOnly,
}

impl LayoutKind {
    fn rel_target(&self) -> &'static str {
        match self {
            LayoutKind::Title => "../slideLayouts/slideLayout1.xml",
            LayoutKind::Content => "../slideLayouts/slideLayout2.xml",
            LayoutKind::TitleOnly => "../slideLayouts/slideLayout3.xml",
        }
    }
}

/// An image successfully read and recognized for embedding.
struct EmbeddedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

/// One assembled slide part, ready to be written into the archive.
struct SlidePart {
    xml: String,
    layout: LayoutKind,
    image: Option<EmbeddedImage>,
}

/// Writer that renders a deck into a .pptx package.
pub struct DeckWriter;

impl DeckWriter {
    /// Create a new deck writer.
    pub fn new() -> Self {
        Self
    }

    /// Render the deck and write the package to a file, overwriting any
    /// existing file at that path.
    ///
    /// The package is assembled in memory first so that a failed build
    /// never leaves a partial file behind.
    pub fn write_file(&self, deck: &Deck, path: &Path) -> Result<()> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(deck, &mut buffer)?;
        std::fs::write(path, buffer.into_inner())?;
        Ok(())
    }

    /// Render the deck into any `Write + Seek` sink.
    pub fn write_to<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<()> {
        let parts = self.build_slides(deck);

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let image_formats: Vec<ImageFormat> = parts
            .iter()
            .filter_map(|p| p.image.as_ref().map(|img| img.format))
            .collect();

        add_part(
            &mut zip,
            "[Content_Types].xml",
            template::content_types_xml(parts.len(), &image_formats).as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "_rels/.rels",
            template::root_rels_xml().as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "ppt/presentation.xml",
            template::presentation_xml(parts.len()).as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            template::presentation_rels_xml(parts.len()).as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            template::slide_master_xml().as_bytes(),
            options,
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            template::slide_master_rels_xml().as_bytes(),
            options,
        )?;

        let layouts = [
            template::layout_title_xml(),
            template::layout_content_xml(),
            template::layout_title_only_xml(),
        ];
        for (i, layout) in layouts.iter().enumerate() {
            add_part(
                &mut zip,
                &format!("ppt/slideLayouts/slideLayout{}.xml", i + 1),
                layout.as_bytes(),
                options,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
                template::slide_layout_rels_xml().as_bytes(),
                options,
            )?;
        }

        add_part(
            &mut zip,
            "ppt/theme/theme1.xml",
            template::theme_xml().as_bytes(),
            options,
        )?;

        let mut image_index = 0;
        for (i, part) in parts.iter().enumerate() {
            let slide_number = i + 1;
            let image_ref = part.image.as_ref().map(|img| {
                image_index += 1;
                (image_index, img)
            });

            add_part(
                &mut zip,
                &format!("ppt/slides/slide{slide_number}.xml"),
                part.xml.as_bytes(),
                options,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{slide_number}.xml.rels"),
                slide_rels_xml(part.layout, image_ref.map(|(n, img)| (n, img.format))).as_bytes(),
                options,
            )?;

            if let Some((n, img)) = image_ref {
                add_part(
                    &mut zip,
                    &format!("ppt/media/image{}.{}", n, img.format.extension()),
                    &img.bytes,
                    options,
                )?;
            }
        }

        zip.finish()
            .map_err(|e| Error::Zip(format!("Failed to finalize package: {e}")))?;
        Ok(())
    }

    /// Assemble slide parts, dispatching on the slide type.
    fn build_slides(&self, deck: &Deck) -> Vec<SlidePart> {
        let mut parts = Vec::with_capacity(deck.slides.len());

        for slide in &deck.slides {
            match slide {
                Slide::Title { title, subtitle } => {
                    parts.push(SlidePart {
                        xml: title_slide_xml(title, subtitle.as_deref()),
                        layout: LayoutKind::Title,
                        image: None,
                    });
                }
                Slide::Bullet { title, bullets } => {
                    parts.push(SlidePart {
                        xml: bullet_slide_xml(title, bullets),
                        layout: LayoutKind::Content,
                        image: None,
                    });
                }
                Slide::Image { title, image_path } => {
                    let image = match image_path.as_deref() {
                        Some(path) => load_image(path),
                        None => {
                            log::warn!("No image_path provided for image slide");
                            None
                        }
                    };
                    parts.push(SlidePart {
                        xml: image_slide_xml(title, image.as_ref()),
                        layout: LayoutKind::TitleOnly,
                        image,
                    });
                }
                Slide::Unknown { slide_type } => {
                    log::warn!(
                        "Unknown slide type: {}",
                        slide_type.as_deref().unwrap_or("<missing>")
                    );
                }
            }
        }

        parts
    }
}

impl Default for DeckWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and recognize an image for embedding. Failures are logged and the
/// slide is rendered without a picture.
fn load_image(path: &str) -> Option<EmbeddedImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to load image '{path}': {e}");
            return None;
        }
    };
    match ImageFormat::from_magic(&bytes) {
        Some(format) => Some(EmbeddedImage { bytes, format }),
        None => {
            log::warn!("Failed to load image '{path}': unrecognized image format");
            None
        }
    }
}

/// Relationships for one slide part: its layout, plus its image if any.
fn slide_rels_xml(layout: LayoutKind, image: Option<(usize, ImageFormat)>) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(template::XML_DECL);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    xml.push_str(&format!(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"{}\"/>",
        layout.rel_target()
    ));
    if let Some((n, format)) = image {
        xml.push_str(&format!(
            "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"../media/image{}.{}\"/>",
            n,
            format.extension()
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Wrap shape XML into a complete slide document.
fn slide_doc(shapes: &str) -> String {
    format!(
        "{decl}<p:sld xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld><p:spTree>{header}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        decl = template::XML_DECL,
        a = template::NS_A,
        r = template::NS_R,
        p = template::NS_P,
        header = template::SP_TREE_HEADER,
    )
}

/// A placeholder shape with the given text body.
fn placeholder_sp(id: u32, name: &str, ph: &str, body: &str) -> String {
    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr>\
         <p:spPr/>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody>\
         </p:sp>"
    )
}

/// A single paragraph containing one text run.
fn paragraph(text: &str) -> String {
    format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(text))
}

fn title_slide_xml(title: &str, subtitle: Option<&str>) -> String {
    let mut shapes = placeholder_sp(
        2,
        "Title 1",
        "<p:ph type=\"ctrTitle\"/>",
        &paragraph(title),
    );
    if let Some(subtitle) = subtitle {
        shapes.push_str(&placeholder_sp(
            3,
            "Subtitle 2",
            "<p:ph type=\"subTitle\" idx=\"1\"/>",
            &paragraph(subtitle),
        ));
    }
    slide_doc(&shapes)
}

fn bullet_slide_xml(title: &str, bullets: &[String]) -> String {
    let mut shapes = placeholder_sp(2, "Title 1", "<p:ph type=\"title\"/>", &paragraph(title));

    // A text body requires at least one paragraph; an empty bullet list
    // yields a single empty one.
    let body = if bullets.is_empty() {
        "<a:p/>".to_string()
    } else {
        bullets.iter().map(|b| paragraph(b)).collect()
    };
    shapes.push_str(&placeholder_sp(
        3,
        "Content Placeholder 2",
        "<p:ph idx=\"1\"/>",
        &body,
    ));
    slide_doc(&shapes)
}

fn image_slide_xml(title: &str, image: Option<&EmbeddedImage>) -> String {
    let mut shapes = placeholder_sp(2, "Title 1", "<p:ph type=\"title\"/>", &paragraph(title));
    if let Some(image) = image {
        shapes.push_str(&picture_xml(3, image));
    }
    slide_doc(&shapes)
}

/// Picture shape at the fixed position, scaled to the display width. The
/// height preserves the source aspect ratio when dimensions are decodable.
fn picture_xml(id: u32, image: &EmbeddedImage) -> String {
    let height = image
        .format
        .dimensions(&image.bytes)
        .filter(|(w, _)| *w > 0)
        .map(|(w, h)| (IMAGE_WIDTH_EMU as i128 * i128::from(h) / i128::from(w)) as i64)
        .unwrap_or(IMAGE_FALLBACK_HEIGHT_EMU);

    format!(
        "<p:pic>\
         <p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Picture {}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
         <p:blipFill><a:blip r:embed=\"rId2\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
         <p:spPr><a:xfrm><a:off x=\"{IMAGE_LEFT_EMU}\" y=\"{IMAGE_TOP_EMU}\"/><a:ext cx=\"{IMAGE_WIDTH_EMU}\" cy=\"{height}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         </p:pic>",
        id - 1
    )
}

/// Add one named part to the archive.
fn add_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: FileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|e| Error::Zip(format!("Failed to start part '{name}': {e}")))?;
    zip.write_all(bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_escapes_markup() {
        let p = paragraph("a < b & c");
        assert_eq!(p, "<a:p><a:r><a:t>a &lt; b &amp; c</a:t></a:r></a:p>");
    }

    #[test]
    fn bullet_body_keeps_input_order() {
        let xml = bullet_slide_xml(
            "T",
            &["A".to_string(), "B".to_string(), "C".to_string()],
        );
        let a = xml.find("<a:t>A</a:t>").unwrap();
        let b = xml.find("<a:t>B</a:t>").unwrap();
        let c = xml.find("<a:t>C</a:t>").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn empty_bullet_list_emits_one_empty_paragraph() {
        let xml = bullet_slide_xml("T", &[]);
        assert!(xml.contains("<a:p/>"));
    }

    #[test]
    fn title_slide_without_subtitle_has_single_shape() {
        let xml = title_slide_xml("Only", None);
        assert_eq!(xml.matches("<p:sp>").count(), 1);
        assert!(!xml.contains("subTitle"));
    }

    #[test]
    fn image_slide_without_image_has_no_picture() {
        let xml = image_slide_xml("T", None);
        assert!(!xml.contains("<p:pic>"));
    }
}
