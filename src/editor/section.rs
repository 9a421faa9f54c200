// src/editor/section.rs
use serde::Serialize;

/// Class every generated section element carries.
pub const SECTION_CLASS: &str = "highlight-section";
/// Marker class the delegated remove listener filters on.
pub const REMOVE_CLASS: &str = "remove-highlight";

const FIELD_ROWS: u16 = 4;
const REMOVE_CLASSES: [&str; 4] = ["btn", "btn-danger", "btn-small", REMOVE_CLASS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Quote,
    Commentary,
}

impl FieldKind {
    pub const ALL: [FieldKind; 2] = [FieldKind::Quote, FieldKind::Commentary];

    pub fn prefix(self) -> &'static str {
        match self {
            FieldKind::Quote => "quote",
            FieldKind::Commentary => "commentary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Quote => "Quote / Highlight",
            FieldKind::Commentary => "Your Commentary",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldKind::Quote => "Paste the quote or highlight here...",
            FieldKind::Commentary => "Add your thoughts, analysis, or notes...",
        }
    }

    pub fn field_id(self, index: u64) -> String {
        format!("{}_{}", self.prefix(), index)
    }
}

/// One text area of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub id: String,
    pub name: String,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub rows: u16,
}

impl FieldSpec {
    fn build(kind: FieldKind, index: u64) -> Self {
        let id = kind.field_id(index);
        FieldSpec {
            kind,
            name: id.clone(),
            id,
            label: kind.label(),
            placeholder: kind.placeholder(),
            rows: FIELD_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlSpec {
    pub label: &'static str,
    /// `button` so activating it never submits the surrounding form.
    pub button_type: &'static str,
    pub classes: Vec<&'static str>,
}

impl ControlSpec {
    fn remove() -> Self {
        ControlSpec {
            label: "Remove",
            button_type: "button",
            classes: REMOVE_CLASSES.to_vec(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Structured description of a highlight section. Renderers turn this into
/// concrete markup or widgets; nothing here knows about presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub index: u64,
    pub class: &'static str,
    pub heading: String,
    pub quote: FieldSpec,
    pub commentary: FieldSpec,
    pub remove: ControlSpec,
}

impl SectionSpec {
    pub fn build(index: u64) -> Self {
        SectionSpec {
            index,
            class: SECTION_CLASS,
            heading: format!("Highlight {}", index + 1),
            quote: FieldSpec::build(FieldKind::Quote, index),
            commentary: FieldSpec::build(FieldKind::Commentary, index),
            remove: ControlSpec::remove(),
        }
    }

    pub fn field(&self, kind: FieldKind) -> &FieldSpec {
        match kind {
            FieldKind::Quote => &self.quote,
            FieldKind::Commentary => &self.commentary,
        }
    }
}
