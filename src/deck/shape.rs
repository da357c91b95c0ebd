use std::fmt::Write as FmtWrite;

use super::{DeckError, ImageFormat, escape_xml};

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// A text box. Each line of `text` becomes its own paragraph.
#[derive(Debug, Clone)]
pub struct TextBox {
    pub(crate) text: String,
    pub(crate) frame: Frame,
    pub(crate) font_size: Option<f64>,
    pub(crate) bold: bool,
    pub(crate) color: Option<String>,
}

impl TextBox {
    /// A text box at the given position, all values in EMUs.
    pub fn new(text: &str, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            text: text.to_string(),
            frame: Frame { x, y, width, height },
            font_size: None,
            bold: false,
            color: None,
        }
    }

    /// Font size in points.
    pub fn font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Hex RGB colour, e.g. `"333333"`.
    pub fn color(mut self, rgb: &str) -> Self {
        self.color = Some(rgb.trim_start_matches('#').to_uppercase());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Picture source: bytes packed into the deck, or a URL the viewer fetches.
#[derive(Debug, Clone)]
pub enum Picture {
    Embedded { data: Vec<u8>, format: ImageFormat },
    Linked { url: String },
}

#[derive(Debug, Clone)]
pub enum Shape {
    Text(TextBox),
    Picture { picture: Picture, frame: Frame },
}

impl Shape {
    pub(crate) fn to_xml(&self, xml: &mut String, shape_id: u32, rel_id: Option<&str>) -> Result<(), DeckError> {
        match self {
            Shape::Text(text_box) => write_text_box(xml, shape_id, text_box),
            Shape::Picture { picture, frame } => write_picture(xml, shape_id, picture, *frame, rel_id),
        }
    }
}

fn write_xfrm(xml: &mut String, frame: Frame) -> Result<(), DeckError> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, frame.x, frame.y)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, frame.width, frame.height)?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

fn write_run_props(xml: &mut String, text_box: &TextBox, tag: &str) -> Result<(), DeckError> {
    write!(xml, r#"<a:{tag} lang="en-US""#)?;
    if let Some(size) = text_box.font_size {
        write!(xml, r#" sz="{}""#, (size * 100.0).round() as u32)?;
    }
    if text_box.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push_str(r#" dirty="0""#);
    match &text_box.color {
        Some(color) => {
            xml.push('>');
            write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, escape_xml(color))?;
            write!(xml, "</a:{tag}>")?;
        }
        None => xml.push_str("/>"),
    }
    Ok(())
}

fn write_text_box(xml: &mut String, shape_id: u32, text_box: &TextBox) -> Result<(), DeckError> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{shape_id}" name="Text {shape_id}"/>"#)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, text_box.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr>"#);
    xml.push_str("<a:lstStyle/>");
    for line in text_box.text.lines() {
        xml.push_str("<a:p>");
        if !line.is_empty() {
            xml.push_str("<a:r>");
            write_run_props(xml, text_box, "rPr")?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(line))?;
            xml.push_str("</a:r>");
        }
        write_run_props(xml, text_box, "endParaRPr")?;
        xml.push_str("</a:p>");
    }
    if text_box.text.is_empty() {
        xml.push_str("<a:p>");
        write_run_props(xml, text_box, "endParaRPr")?;
        xml.push_str("</a:p>");
    }
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_picture(
    xml: &mut String,
    shape_id: u32,
    picture: &Picture,
    frame: Frame,
    rel_id: Option<&str>,
) -> Result<(), DeckError> {
    let rel_id = rel_id.unwrap_or("rId0");

    xml.push_str("<p:pic>");
    xml.push_str("<p:nvPicPr>");
    write!(xml, r#"<p:cNvPr id="{shape_id}" name="Picture {shape_id}"/>"#)?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    match picture {
        Picture::Embedded { .. } => write!(xml, r#"<a:blip r:embed="{rel_id}"/>"#)?,
        Picture::Linked { .. } => write!(xml, r#"<a:blip r:link="{rel_id}"/>"#)?,
    }
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
    Ok(())
}
