pub mod presentation;
pub mod slide;
