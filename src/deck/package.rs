use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{Cursor, Write as _};

use zip::write::{SimpleFileOptions, ZipWriter};

use super::parts::*;
use super::{Deck, DeckError, Picture, Shape, escape_xml};

/// One entry of a `.rels` part.
struct Relationship {
    id: String,
    rel_type: &'static str,
    target: String,
    external: bool,
}

impl Relationship {
    fn internal(id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type,
            target: target.into(),
            external: false,
        }
    }
}

fn rels_xml(rels: &[Relationship]) -> Result<String, DeckError> {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    for rel in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}""#,
            rel.id,
            rel.rel_type,
            escape_xml(&rel.target)
        )?;
        if rel.external {
            xml.push_str(r#" TargetMode="External""#);
        }
        xml.push_str("/>");
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// A rendered slide part and its relationships.
struct SlidePart {
    xml: String,
    rels: String,
}

impl Deck {
    /// Serialize the deck to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DeckError> {
        let mut media: Vec<(String, &[u8])> = Vec::new();
        let mut extensions: BTreeMap<&'static str, &'static str> = BTreeMap::new();
        let mut slide_parts = Vec::with_capacity(self.slides.len());

        for slide in &self.slides {
            // rId1 is always the layout
            let mut rels = vec![Relationship::internal(
                "rId1",
                REL_SLIDE_LAYOUT,
                "../slideLayouts/slideLayout1.xml",
            )];
            let mut rel_ids = Vec::with_capacity(slide.shape_count());

            for shape in slide.shapes() {
                let Shape::Picture { picture, .. } = shape else {
                    rel_ids.push(None);
                    continue;
                };
                let id = format!("rId{}", rels.len() + 1);
                match picture {
                    Picture::Embedded { data, format } => {
                        let name = format!("image{}.{}", media.len() + 1, format.extension());
                        extensions.insert(format.extension(), format.mime_type());
                        rels.push(Relationship::internal(&id, REL_IMAGE, format!("../media/{name}")));
                        media.push((format!("ppt/media/{name}"), data.as_slice()));
                    }
                    Picture::Linked { url } => rels.push(Relationship {
                        id: id.clone(),
                        rel_type: REL_IMAGE,
                        target: url.clone(),
                        external: true,
                    }),
                }
                rel_ids.push(Some(id));
            }

            slide_parts.push(SlidePart {
                xml: slide.to_xml(&rel_ids)?,
                rels: rels_xml(&rels)?,
            });
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut put = |path: &str, content: &[u8]| -> Result<(), DeckError> {
            zip.start_file(path, options)?;
            zip.write_all(content)?;
            Ok(())
        };

        put("[Content_Types].xml", self.content_types_xml(&extensions)?.as_bytes())?;
        put("_rels/.rels", root_rels()?.as_bytes())?;
        put("docProps/app.xml", self.app_xml()?.as_bytes())?;
        put("docProps/core.xml", self.core_xml()?.as_bytes())?;
        put("ppt/presentation.xml", self.presentation_xml()?.as_bytes())?;
        put("ppt/_rels/presentation.xml.rels", self.presentation_rels()?.as_bytes())?;
        put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML.as_bytes())?;
        put("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS.as_bytes())?;
        put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML.as_bytes())?;
        put("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS.as_bytes())?;
        put("ppt/theme/theme1.xml", THEME_XML.as_bytes())?;
        put("ppt/presProps.xml", PRES_PROPS_XML.as_bytes())?;
        put("ppt/viewProps.xml", VIEW_PROPS_XML.as_bytes())?;
        put("ppt/tableStyles.xml", TABLE_STYLES_XML.as_bytes())?;

        for (index, part) in slide_parts.iter().enumerate() {
            let n = index + 1;
            put(&format!("ppt/slides/slide{n}.xml"), part.xml.as_bytes())?;
            put(&format!("ppt/slides/_rels/slide{n}.xml.rels"), part.rels.as_bytes())?;
        }
        for (path, data) in media {
            put(path.as_str(), data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self, extensions: &BTreeMap<&'static str, &'static str>) -> Result<String, DeckError> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        );
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        for (ext, mime) in extensions {
            write!(xml, r#"<Default Extension="{ext}" ContentType="{mime}"/>"#)?;
        }

        let overrides: [(&str, &str); 9] = [
            ("/ppt/presentation.xml", CT_PRESENTATION),
            ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
            ("/ppt/theme/theme1.xml", CT_THEME),
            ("/ppt/presProps.xml", CT_PRES_PROPS),
            ("/ppt/viewProps.xml", CT_VIEW_PROPS),
            ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
            ("/docProps/core.xml", CT_CORE_PROPS),
            ("/docProps/app.xml", CT_EXTENDED_PROPS),
        ];
        for (part, content_type) in overrides {
            write!(xml, r#"<Override PartName="{part}" ContentType="{content_type}"/>"#)?;
        }
        for n in 1..=self.slides.len() {
            write!(xml, r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT_SLIDE}"/>"#)?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }

    fn presentation_xml(&self) -> Result<String, DeckError> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
        )?;
        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (index, slide) in self.slides.iter().enumerate() {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                    slide.slide_id(),
                    index + FIRST_SLIDE_REL
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }
        write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, self.width, self.height)?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");
        Ok(xml)
    }

    fn presentation_rels(&self) -> Result<String, DeckError> {
        let mut rels = vec![
            Relationship::internal("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
            Relationship::internal("rId2", REL_THEME, "theme/theme1.xml"),
            Relationship::internal("rId3", REL_PRES_PROPS, "presProps.xml"),
            Relationship::internal("rId4", REL_VIEW_PROPS, "viewProps.xml"),
            Relationship::internal("rId5", REL_TABLE_STYLES, "tableStyles.xml"),
        ];
        for n in 1..=self.slides.len() {
            rels.push(Relationship::internal(
                format!("rId{}", n - 1 + FIRST_SLIDE_REL),
                REL_SLIDE,
                format!("slides/slide{n}.xml"),
            ));
        }
        rels_xml(&rels)
    }

    fn app_xml(&self) -> Result<String, DeckError> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#);
        xml.push_str(r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
        write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME"))?;
        write!(xml, "<Slides>{}</Slides>", self.slides.len())?;
        xml.push_str("<PresentationFormat>On-screen Show (16:9)</PresentationFormat>");
        xml.push_str("</Properties>");
        Ok(xml)
    }

    fn core_xml(&self) -> Result<String, DeckError> {
        let stamp = self.created.format("%Y-%m-%dT%H:%M:%SZ");
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#);
        xml.push_str(r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#);
        xml.push_str(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
        write!(xml, "<dc:creator>{}</dc:creator>", env!("CARGO_PKG_NAME"))?;
        write!(xml, r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#)?;
        write!(xml, r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#)?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }
}

/// Presentation relationships before the first slide: master, theme and three property parts.
const FIRST_SLIDE_REL: usize = 6;

fn root_rels() -> Result<String, DeckError> {
    rels_xml(&[
        Relationship::internal("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship::internal("rId2", REL_CORE_PROPS, "docProps/core.xml"),
        Relationship::internal("rId3", REL_EXTENDED_PROPS, "docProps/app.xml"),
    ])
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::deck::{ImageFormat, TextBox};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_deck_is_a_valid_package() {
        let bytes = Deck::new().to_bytes().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        assert!(names.contains(&"[Content_Types].xml"));
        assert!(names.contains(&"ppt/presentation.xml"));
        assert!(!names.iter().any(|n| n.starts_with("ppt/slides/")));

        let pres = read_part(&bytes, "ppt/presentation.xml");
        assert!(!pres.contains("sldIdLst"));
        assert!(pres.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
    }

    #[test]
    fn test_slides_and_media_are_wired_up() {
        let mut deck = Deck::new();
        deck.add_slide().add_text(TextBox::new("Hello", 0, 0, 1, 1));
        deck.add_slide()
            .add_text(TextBox::new("Pictured", 0, 0, 1, 1))
            .add_picture(
                Picture::Embedded { data: vec![0x89, b'P', b'N', b'G', 0, 0], format: ImageFormat::Png },
                0,
                0,
                1,
                1,
            )
            .add_picture(Picture::Linked { url: "https://example.com/x.png".to_string() }, 0, 0, 1, 1);

        let bytes = deck.to_bytes().unwrap();

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(types.contains("/ppt/slides/slide2.xml"));

        let pres_rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(pres_rels.contains(r#"Id="rId6""#));
        assert!(pres_rels.contains(r#"Target="slides/slide2.xml""#));

        let slide_rels = read_part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(slide_rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png""#));
        assert!(slide_rels.contains(r#"Target="https://example.com/x.png" TargetMode="External""#));

        let slide = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(slide.contains(r#"r:embed="rId2""#));
        assert!(slide.contains(r#"r:link="rId3""#));

        assert_eq!(read_part(&bytes, "ppt/slides/slide1.xml").matches("<a:t>Hello</a:t>").count(), 1);
    }
}
