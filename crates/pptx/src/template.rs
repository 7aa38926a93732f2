//! Static and parameterized XML parts for the PPTX package shell.
//!
//! These templates carry the bare minimum structure a valid .pptx needs:
//! package relationships, a presentation part, one slide master, three
//! slide layouts, and a theme. Slide parts themselves are generated by the
//! writer.

use crate::media::ImageFormat;

/// XML declaration shared by every part.
pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// DrawingML namespace.
pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// Relationships namespace.
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// PresentationML namespace.
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Slide width in EMUs (10 inches, standard 4:3).
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;
/// Slide height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Package-level relationships (`_rels/.rels`): the single entry pointing
/// at the presentation part.
pub fn root_rels_xml() -> String {
    format!(
        "{XML_DECL}\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
         </Relationships>"
    )
}

/// `[Content_Types].xml` for a package with `slide_count` slides and the
/// given set of embedded image formats.
pub fn content_types_xml(slide_count: usize, image_formats: &[ImageFormat]) -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    );

    let mut seen: Vec<ImageFormat> = Vec::new();
    for format in image_formats {
        if !seen.contains(format) {
            seen.push(*format);
            xml.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                format.extension(),
                format.content_type()
            ));
        }
    }

    xml.push_str(
        "<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout3.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>",
    );

    for i in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }

    xml.push_str("</Types>");
    xml
}

/// `ppt/presentation.xml`: master reference, slide id list, slide size.
pub fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        "<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">"
    ));
    xml.push_str("<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>");

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            // Slide ids start at 256; rId1 is the master, slides follow.
            xml.push_str(&format!(
                "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
                256 + i,
                2 + i
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }

    xml.push_str(&format!(
        "<p:sldSz cx=\"{SLIDE_WIDTH_EMU}\" cy=\"{SLIDE_HEIGHT_EMU}\" type=\"screen4x3\"/>\
         <p:notesSz cx=\"{SLIDE_HEIGHT_EMU}\" cy=\"{SLIDE_WIDTH_EMU}\"/>"
    ));
    xml.push_str("</p:presentation>");
    xml
}

/// `ppt/_rels/presentation.xml.rels`: master plus one entry per slide.
pub fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for i in 0..slide_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{}.xml\"/>",
            2 + i,
            1 + i
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Empty group-shape header shared by the master, layouts, and slides.
pub const SP_TREE_HEADER: &str = "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/><a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>";

/// `ppt/slideMasters/slideMaster1.xml`.
pub fn slide_master_xml() -> String {
    format!(
        "{XML_DECL}\
         <p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>{SP_TREE_HEADER}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst>\
         <p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/>\
         <p:sldLayoutId id=\"2147483650\" r:id=\"rId2\"/>\
         <p:sldLayoutId id=\"2147483651\" r:id=\"rId3\"/>\
         </p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

/// `ppt/slideMasters/_rels/slideMaster1.xml.rels`.
pub fn slide_master_rels_xml() -> String {
    format!(
        "{XML_DECL}\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout2.xml\"/>\
         <Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout3.xml\"/>\
         <Relationship Id=\"rId4\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
         </Relationships>"
    )
}

/// Relationships for any layout part: just the parent master.
pub fn slide_layout_rels_xml() -> String {
    format!(
        "{XML_DECL}\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
         </Relationships>"
    )
}

/// A positioned placeholder shape for a layout part.
fn layout_placeholder(id: u32, name: &str, ph: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr/></a:p></p:txBody>\
         </p:sp>"
    )
}

fn layout_xml(layout_type: &str, name: &str, shapes: &str) -> String {
    format!(
        "{XML_DECL}\
         <p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" type=\"{layout_type}\" preserve=\"1\">\
         <p:cSld name=\"{name}\"><p:spTree>{SP_TREE_HEADER}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>"
    )
}

/// Layout 1: Title Slide (centered title plus subtitle).
pub fn layout_title_xml() -> String {
    let title = layout_placeholder(
        2,
        "Title 1",
        "<p:ph type=\"ctrTitle\"/>",
        685_800,
        2_130_425,
        7_772_400,
        1_470_025,
    );
    let subtitle = layout_placeholder(
        3,
        "Subtitle 2",
        "<p:ph type=\"subTitle\" idx=\"1\"/>",
        1_371_600,
        3_886_200,
        6_400_800,
        1_752_600,
    );
    layout_xml("title", "Title Slide", &format!("{title}{subtitle}"))
}

/// Layout 2: Title and Content (title plus body placeholder).
pub fn layout_content_xml() -> String {
    let title = layout_placeholder(
        2,
        "Title 1",
        "<p:ph type=\"title\"/>",
        457_200,
        274_638,
        8_229_600,
        1_143_000,
    );
    let body = layout_placeholder(
        3,
        "Content Placeholder 2",
        "<p:ph idx=\"1\"/>",
        457_200,
        1_600_200,
        8_229_600,
        4_525_963,
    );
    layout_xml("obj", "Title and Content", &format!("{title}{body}"))
}

/// Layout 3: Title Only.
pub fn layout_title_only_xml() -> String {
    let title = layout_placeholder(
        2,
        "Title 1",
        "<p:ph type=\"title\"/>",
        457_200,
        274_638,
        8_229_600,
        1_143_000,
    );
    layout_xml("titleOnly", "Title Only", &title)
}

/// `ppt/theme/theme1.xml`: the minimum complete theme (color scheme, font
/// scheme, and format scheme with the required three entries per style
/// list).
pub fn theme_xml() -> String {
    format!(
        "{XML_DECL}\
<a:theme xmlns:a=\"{NS_A}\" name=\"Office Theme\"><a:themeElements>\
<a:clrScheme name=\"Office\">\
<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
<a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
<a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
<a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
<a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
<a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Office\">\
<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Office\">\
<a:fillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:fillStyleLst>\
<a:lnStyleLst>\
<a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
</a:lnStyleLst>\
<a:effectStyleLst>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
</a:effectStyleLst>\
<a:bgFillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements></a:theme>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_lists_every_slide() {
        let xml = content_types_xml(2, &[]);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
        assert!(!xml.contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn content_types_dedupes_image_extensions() {
        let xml = content_types_xml(1, &[ImageFormat::Png, ImageFormat::Png, ImageFormat::Gif]);
        assert_eq!(xml.matches("Extension=\"png\"").count(), 1);
        assert_eq!(xml.matches("Extension=\"gif\"").count(), 1);
    }

    #[test]
    fn presentation_xml_numbers_slide_rels_after_master() {
        let xml = presentation_xml(3);
        assert!(xml.contains("<p:sldId id=\"256\" r:id=\"rId2\"/>"));
        assert!(xml.contains("<p:sldId id=\"258\" r:id=\"rId4\"/>"));
    }

    #[test]
    fn empty_deck_omits_slide_id_list_entries() {
        let xml = presentation_xml(0);
        assert!(!xml.contains("<p:sldIdLst>"));
    }
}
