//! Minimal PresentationML (`.pptx`) writer.
//!
//! A [`Deck`] holds slides made of text boxes and pictures; [`Deck::to_bytes`]
//! packs it into an OPC (ZIP) container that PowerPoint, Keynote and
//! LibreOffice open. Coordinates are EMUs (914400 per inch).

mod image;
mod package;
mod parts;
mod shape;
mod slide;

use std::fmt;

pub use image::ImageFormat;
pub use shape::{Frame, Picture, Shape, TextBox};
pub use slide::DeckSlide;

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// 16:9 slide, 10in x 5.625in.
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 5_143_500;

/// Convert inches to EMUs.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

#[derive(Debug)]
pub enum DeckError {
    Zip(zip::result::ZipError),
    Io(std::io::Error),
    Xml(fmt::Error),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Zip(e) => write!(f, "ZIP error: {e}"),
            DeckError::Io(e) => write!(f, "I/O error: {e}"),
            DeckError::Xml(e) => write!(f, "XML error: {e}"),
        }
    }
}

impl std::error::Error for DeckError {}

impl From<zip::result::ZipError> for DeckError {
    fn from(e: zip::result::ZipError) -> Self {
        DeckError::Zip(e)
    }
}

impl From<std::io::Error> for DeckError {
    fn from(e: std::io::Error) -> Self {
        DeckError::Io(e)
    }
}

impl From<fmt::Error> for DeckError {
    fn from(e: fmt::Error) -> Self {
        DeckError::Xml(e)
    }
}

/// An in-memory slide deck.
#[derive(Debug)]
pub struct Deck {
    slides: Vec<DeckSlide>,
    width: i64,
    height: i64,
    created: chrono::DateTime<chrono::Utc>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            width: SLIDE_WIDTH,
            height: SLIDE_HEIGHT,
            created: chrono::Utc::now(),
        }
    }

    /// Append an empty slide and return it for filling in.
    pub fn add_slide(&mut self) -> &mut DeckSlide {
        // Slide ids start at 256 in PresentationML.
        let slide_id = (self.slides.len() + 256) as u32;
        self.slides.push(DeckSlide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[DeckSlide] {
        &self.slides
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape XML special characters.
///
/// C0 control characters other than tab, LF and CR are not allowed in XML 1.0
/// and are dropped.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < '\u{20}' => {}
            c => out.push(c),
        }
    }
    out
}
