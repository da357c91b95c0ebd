use super::shape::{Frame, Picture, Shape, TextBox};
use super::DeckError;

/// One slide of a [`Deck`](super::Deck).
#[derive(Debug, Clone)]
pub struct DeckSlide {
    slide_id: u32,
    shapes: Vec<Shape>,
}

impl DeckSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn add_text(&mut self, text_box: TextBox) -> &mut Self {
        self.shapes.push(Shape::Text(text_box));
        self
    }

    pub fn add_picture(&mut self, picture: Picture, x: i64, y: i64, width: i64, height: i64) -> &mut Self {
        self.shapes.push(Shape::Picture {
            picture,
            frame: Frame { x, y, width, height },
        });
        self
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Concatenated text of every text box, one box per line.
    pub fn text(&self) -> String {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text(tb) => Some(tb.text()),
                Shape::Picture { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render `ppt/slides/slideN.xml`. `rel_ids[i]` is the relationship id
    /// for shape `i` (pictures only).
    pub(crate) fn to_xml(&self, rel_ids: &[Option<String>]) -> Result<String, DeckError> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#);
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(super::parts::GROUP_SHAPE_PROPS);

        // id 1 is the group shape
        for (index, shape) in self.shapes.iter().enumerate() {
            let rel_id = rel_ids.get(index).and_then(|r| r.as_deref());
            shape.to_xml(&mut xml, index as u32 + 2, rel_id)?;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");
        Ok(xml)
    }
}
