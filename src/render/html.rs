// src/render/html.rs
use super::*;
use crate::editor::{FieldKind, Section};

/// Renders the highlights container as a form fragment. The trailing script
/// seeds `highlightCount` so a page script continues numbering after the
/// sections rendered here.
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn section(section: &Section) -> String {
        let spec = section.spec();
        let mut out = String::new();

        out.push_str(&format!("  <div class=\"{}\">\n", spec.class));
        out.push_str(&format!("    <h3>{}</h3>\n", escape(&spec.heading)));
        for kind in FieldKind::ALL {
            let field = spec.field(kind);
            out.push_str("    <div class=\"form-group\">\n");
            out.push_str(&format!("      <label for=\"{}\">{}</label>\n", field.id, escape(field.label)));
            out.push_str(&format!(
                "      <textarea id=\"{}\" name=\"{}\" rows=\"{}\" placeholder=\"{}\">{}</textarea>\n",
                field.id,
                field.name,
                field.rows,
                escape(field.placeholder),
                escape(&section.field(kind).text()),
            ));
            out.push_str("    </div>\n");
        }
        out.push_str(&format!(
            "    <button type=\"{}\" class=\"{}\">{}</button>\n",
            spec.remove.button_type,
            spec.remove.classes.join(" "),
            escape(spec.remove.label),
        ));
        out.push_str("  </div>\n");
        out
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> &'static str {
        "html"
    }

    fn render(&self, doc: &Document<'_>) -> Result<String> {
        let editor = doc.editor;
        let mut out = String::new();

        out.push_str(&format!("<div id=\"{}\">\n", escape(editor.container_id())));
        for section in editor.sections() {
            out.push_str(&Self::section(section));
        }
        out.push_str("</div>\n");
        out.push_str(&format!(
            "<button type=\"button\" id=\"{}\" class=\"btn btn-secondary\">+ Add Highlight</button>\n",
            escape(editor.add_control_id())
        ));
        out.push_str(&format!("<script>var highlightCount = {};</script>\n", editor.counter()));
        Ok(out)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
