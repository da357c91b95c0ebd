use askama::Template;

use crate::models::presentation::Presentation;
use crate::models::slide::{ContentType, Slide};
use crate::storage::BlobStore;

pub const APP_NAME: &str = "Deckhand";

/// Common context shared by all admin pages.
/// Templates access these as `ctx.app_name` and `ctx.is_active(..)`.
pub struct PageContext {
    pub app_name: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(current_path: &str) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            current_path: current_path.to_string(),
        }
    }

    pub fn is_active(&self, href: &str) -> bool {
        self.current_path == href
    }
}

/// Entry of a presentation `<select>`.
pub struct PresentationOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub selected: bool,
}

impl PresentationOption {
    pub fn from_presentations(presentations: &[Presentation], selected_id: Option<&str>) -> Vec<Self> {
        presentations
            .iter()
            .map(|p| Self {
                id: p.id.clone(),
                title: p.title.clone(),
                description: p.description.clone(),
                selected: selected_id == Some(p.id.as_str()),
            })
            .collect()
    }
}

/// A slide as the carousel renders it. Media paths are already resolved to URLs.
pub struct SlideView {
    pub title: String,
    pub kind: ContentType,
    pub content: String,
    pub media_url: Option<String>,
    pub bullets: Vec<String>,
}

impl SlideView {
    pub fn new(slide: &Slide, blobs: &dyn BlobStore) -> Self {
        Self {
            title: slide.title.clone(),
            kind: slide.content_type,
            content: slide.content.clone(),
            media_url: slide
                .file_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| blobs.url(url)),
            bullets: slide.bullet_items().into_iter().map(str::to_string).collect(),
        }
    }
}

/// The presentation picked in the viewer.
pub struct SelectedPresentation {
    pub id: String,
    pub title: String,
    pub download_filename: String,
}

#[derive(Template)]
#[template(path = "admin/viewer.html")]
pub struct ViewerTemplate {
    pub ctx: PageContext,
    pub presentations: Vec<PresentationOption>,
    pub selected: Option<SelectedPresentation>,
    pub slides: Vec<SlideView>,
}

#[derive(Template)]
#[template(path = "admin/presentation_form.html")]
pub struct PresentationFormTemplate {
    pub ctx: PageContext,
}

/// Entry of the content-type `<select>` on the slide form.
pub struct ContentTypeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub takes_file: bool,
}

impl ContentTypeOption {
    pub fn all() -> Vec<Self> {
        ContentType::ALL
            .iter()
            .map(|ct| Self {
                value: ct.as_str(),
                label: ct.label(),
                takes_file: ct.takes_file(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "admin/slide_form.html")]
pub struct SlideFormTemplate {
    pub ctx: PageContext,
    pub presentations: Vec<PresentationOption>,
    pub content_types: Vec<ContentTypeOption>,
}
