// src/render/markdown.rs
use super::*;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, doc: &Document<'_>) -> Result<String> {
        doc.draft().to_markdown()
    }
}
