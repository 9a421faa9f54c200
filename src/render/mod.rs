// src/render/mod.rs
use chrono::{DateTime, FixedOffset};

use crate::draft::Draft;
use crate::editor::HighlightListEditor;
use crate::error::{Error, Result};

pub mod html;
pub mod json;
pub mod markdown;

/// Everything a renderer needs to describe the capture form.
pub struct Document<'a> {
    pub editor: &'a HighlightListEditor,
    pub source_url: &'a str,
    pub tags: &'a [String],
    pub created_at: DateTime<FixedOffset>,
}

impl Document<'_> {
    pub fn draft(&self) -> Draft {
        Draft::new(self.source_url, self.tags.to_vec(), self.editor.highlights(), self.created_at)
    }
}

pub trait Renderer {
    fn format(&self) -> &'static str;
    fn render(&self, doc: &Document<'_>) -> Result<String>;
}

pub struct RenderManager {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RenderManager {
    pub fn new() -> Self {
        let mut manager = RenderManager { renderers: Vec::new() };
        manager.register(Box::new(markdown::MarkdownRenderer));
        manager.register(Box::new(html::HtmlRenderer));
        manager.register(Box::new(json::JsonRenderer));
        manager
    }

    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub fn formats(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.format()).collect()
    }

    pub fn render(&self, format: &str, doc: &Document<'_>) -> Result<String> {
        self.renderers
            .iter()
            .find(|r| r.format().eq_ignore_ascii_case(format))
            .ok_or_else(|| Error::UnknownFormat(format.to_string()))?
            .render(doc)
    }
}

impl Default for RenderManager {
    fn default() -> Self {
        Self::new()
    }
}
