// src/render/json.rs
use serde::Serialize;

use super::*;
use crate::editor::{FieldKind, SectionSpec};

#[derive(Serialize)]
struct JsonSection<'a> {
    #[serde(flatten)]
    spec: &'a SectionSpec,
    quote_text: String,
    commentary_text: String,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    source_url: &'a str,
    tags: &'a [String],
    created_at: String,
    container_id: &'a str,
    add_control_id: &'a str,
    highlight_count: u64,
    sections: Vec<JsonSection<'a>>,
}

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self) -> &'static str {
        "json"
    }

    fn render(&self, doc: &Document<'_>) -> Result<String> {
        let editor = doc.editor;
        let sections = editor
            .sections()
            .iter()
            .map(|s| JsonSection {
                spec: s.spec(),
                quote_text: s.field(FieldKind::Quote).text(),
                commentary_text: s.field(FieldKind::Commentary).text(),
            })
            .collect();

        let value = JsonDocument {
            source_url: doc.source_url,
            tags: doc.tags,
            created_at: doc.created_at.to_rfc3339(),
            container_id: editor.container_id(),
            add_control_id: editor.add_control_id(),
            highlight_count: editor.counter(),
            sections,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
