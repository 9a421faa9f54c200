// src/editor/list.rs
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::buffer::FieldBuffer;
use super::counter::HighlightCounter;
use super::section::{FieldKind, SectionSpec, REMOVE_CLASS};
use crate::draft::Highlight;
use crate::error::{Error, Result};

pub const DEFAULT_CONTAINER_ID: &str = "highlights";
pub const DEFAULT_ADD_CONTROL_ID: &str = "addHighlight";

/// What the surrounding page provides when the editor attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub container_id: Option<String>,
    pub add_control_id: Option<String>,
    /// Counter injected by a page that already rendered some sections.
    pub highlight_count: Option<u32>,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            container_id: Some(DEFAULT_CONTAINER_ID.to_string()),
            add_control_id: Some(DEFAULT_ADD_CONTROL_ID.to_string()),
            highlight_count: None,
        }
    }
}

/// A section living in the container together with its field contents.
#[derive(Debug, Clone)]
pub struct Section {
    spec: SectionSpec,
    quote: FieldBuffer,
    commentary: FieldBuffer,
}

impl Section {
    pub fn new(index: u64) -> Self {
        Section {
            spec: SectionSpec::build(index),
            quote: FieldBuffer::new(),
            commentary: FieldBuffer::new(),
        }
    }

    pub fn with_highlight(index: u64, highlight: &Highlight) -> Self {
        Section {
            spec: SectionSpec::build(index),
            quote: FieldBuffer::from_text(&highlight.quote),
            commentary: FieldBuffer::from_text(&highlight.commentary),
        }
    }

    pub fn spec(&self) -> &SectionSpec {
        &self.spec
    }

    pub fn index(&self) -> u64 {
        self.spec.index
    }

    pub fn field(&self, kind: FieldKind) -> &FieldBuffer {
        match kind {
            FieldKind::Quote => &self.quote,
            FieldKind::Commentary => &self.commentary,
        }
    }

    pub fn field_mut(&mut self, kind: FieldKind) -> &mut FieldBuffer {
        match kind {
            FieldKind::Quote => &mut self.quote,
            FieldKind::Commentary => &mut self.commentary,
        }
    }

    pub fn to_highlight(&self) -> Highlight {
        Highlight::new(self.quote.text().trim(), self.commentary.text().trim())
    }
}

/// Element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    AddControl,
    Element {
        classes: Vec<String>,
        /// Index of the nearest enclosing highlight section, if any.
        section: Option<u64>,
    },
}

impl Target {
    pub fn element<I, S>(classes: I, section: Option<u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::Element {
            classes: classes.into_iter().map(Into::into).collect(),
            section,
        }
    }

    /// The remove control rendered inside section `index`.
    pub fn remove_control(spec: &SectionSpec) -> Self {
        Target::element(spec.remove.classes.iter().copied(), Some(spec.index))
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Target::AddControl => false,
            Target::Element { classes, .. } => classes.iter().any(|c| c == class),
        }
    }

    pub fn enclosing_section(&self) -> Option<u64> {
        match self {
            Target::AddControl => None,
            Target::Element { section, .. } => *section,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClickEvent {
    target: Target,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: Target) -> Self {
        ClickEvent { target, default_prevented: false }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Added(u64),
    Removed(u64),
    Ignored,
}

/// Owns the container of highlight sections and the counter naming them.
#[derive(Debug, Clone)]
pub struct HighlightListEditor {
    container_id: String,
    add_control_id: String,
    counter: HighlightCounter,
    sections: Vec<Section>,
}

impl HighlightListEditor {
    pub fn attach(layout: &PageLayout) -> Result<Self> {
        Self::attach_with(layout, &[])
    }

    /// Attaches to a container that already holds `prerendered` sections at
    /// indices `0..n`. Without an injected count the counter continues at `n`.
    pub fn attach_with(layout: &PageLayout, prerendered: &[Highlight]) -> Result<Self> {
        let container_id = layout.container_id.clone().ok_or(Error::MissingElement("highlights container"))?;
        let add_control_id = layout.add_control_id.clone().ok_or(Error::MissingElement("add highlight control"))?;

        let sections: Vec<Section> = prerendered
            .iter()
            .enumerate()
            .map(|(i, h)| Section::with_highlight(i as u64, h))
            .collect();

        let mut slot = layout
            .highlight_count
            .or_else(|| (!sections.is_empty()).then_some(sections.len() as u32))
            .map(HighlightCounter::seeded);
        let counter = HighlightCounter::init(&mut slot);

        debug!(
            container = %container_id,
            sections = sections.len(),
            counter = counter.current(),
            "highlight editor attached"
        );

        Ok(HighlightListEditor { container_id, add_control_id, counter, sections })
    }

    /// Like [`attach_with`](Self::attach_with), but an incomplete layout is
    /// logged and yields `None` instead of an error.
    pub fn attach_if_present(layout: &PageLayout, prerendered: &[Highlight]) -> Result<Option<Self>> {
        match Self::attach_with(layout, prerendered) {
            Ok(editor) => Ok(Some(editor)),
            Err(Error::MissingElement(element)) => {
                warn!(element, "page layout incomplete, highlight editor not attached");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn add_control_id(&self) -> &str {
        &self.add_control_id
    }

    pub fn counter(&self) -> u64 {
        self.counter.current()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_mut(&mut self, position: usize) -> Option<&mut Section> {
        self.sections.get_mut(position)
    }

    pub fn position_of(&self, index: u64) -> Option<usize> {
        self.sections.iter().position(|s| s.index() == index)
    }

    /// Appends a fresh section as the last child and returns its index.
    pub fn add_section(&mut self) -> u64 {
        let index = self.counter.next_index();
        self.sections.push(Section::new(index));
        debug!(index, container = %self.container_id, "highlight section added");
        index
    }

    /// Single listener for every click inside the container. Remove controls
    /// are recognised by their marker class, so sections that were present at
    /// attach time and sections added later are handled the same way.
    pub fn dispatch_click(&mut self, event: &mut ClickEvent) -> ClickOutcome {
        if *event.target() == Target::AddControl {
            return ClickOutcome::Added(self.add_section());
        }
        if !event.target().has_class(REMOVE_CLASS) {
            return ClickOutcome::Ignored;
        }

        event.prevent_default();
        let position = event.target().enclosing_section().and_then(|index| self.position_of(index));
        match position {
            Some(position) => {
                let section = self.sections.remove(position);
                debug!(index = section.index(), remaining = self.sections.len(), "highlight section removed");
                ClickOutcome::Removed(section.index())
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Field contents in container order, blank sections skipped.
    pub fn highlights(&self) -> Vec<Highlight> {
        self.sections
            .iter()
            .map(Section::to_highlight)
            .filter(|h| !h.is_blank())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_at(count: u32) -> HighlightListEditor {
        let layout = PageLayout { highlight_count: Some(count), ..PageLayout::default() };
        HighlightListEditor::attach(&layout).unwrap()
    }

    fn ids(editor: &HighlightListEditor) -> Vec<String> {
        editor.sections().iter().map(|s| s.spec().quote.id.clone()).collect()
    }

    fn remove(editor: &mut HighlightListEditor, index: u64) -> (ClickOutcome, bool) {
        let position = editor.position_of(index).unwrap();
        let target = Target::remove_control(editor.sections()[position].spec());
        let mut event = ClickEvent::new(target);
        let outcome = editor.dispatch_click(&mut event);
        (outcome, event.default_prevented())
    }

    #[test]
    fn test_attach_defaults_counter_to_one() {
        let editor = HighlightListEditor::attach(&PageLayout::default()).unwrap();
        assert_eq!(editor.counter(), 1);
        assert!(editor.sections().is_empty());
        assert_eq!(editor.container_id(), "highlights");
        assert_eq!(editor.add_control_id(), "addHighlight");
    }

    #[test]
    fn test_attach_missing_container() {
        let layout = PageLayout { container_id: None, ..PageLayout::default() };
        let err = HighlightListEditor::attach(&layout).unwrap_err();
        assert!(matches!(err, Error::MissingElement(_)));
    }

    #[test]
    fn test_attach_if_present_skips_incomplete_layout() {
        let layout = PageLayout { container_id: None, ..PageLayout::default() };
        assert!(HighlightListEditor::attach_if_present(&layout, &[]).unwrap().is_none());

        let highlights = [Highlight::new("a", "")];
        let editor = HighlightListEditor::attach_if_present(&PageLayout::default(), &highlights).unwrap();
        assert_eq!(editor.map(|e| e.counter()), Some(1));
    }

    #[test]
    fn test_attach_missing_add_control() {
        let layout = PageLayout { add_control_id: None, ..PageLayout::default() };
        assert!(HighlightListEditor::attach(&layout).is_err());
    }

    #[test]
    fn test_prerendered_sections_seed_counter() {
        let highlights = vec![Highlight::new("a", ""), Highlight::new("b", "c")];
        let editor = HighlightListEditor::attach_with(&PageLayout::default(), &highlights).unwrap();
        assert_eq!(editor.counter(), 2);
        assert_eq!(ids(&editor), vec!["quote_0", "quote_1"]);
    }

    #[test]
    fn test_injected_count_wins_over_prerendered() {
        let layout = PageLayout { highlight_count: Some(9), ..PageLayout::default() };
        let editor = HighlightListEditor::attach_with(&layout, &[Highlight::new("a", "")]).unwrap();
        assert_eq!(editor.counter(), 9);
    }

    #[test]
    fn test_adds_are_monotonic() {
        let mut editor = editor_at(5);
        let added: Vec<u64> = (0..3).map(|_| editor.add_section()).collect();
        assert_eq!(added, vec![5, 6, 7]);
        let headings: Vec<&str> = editor.sections().iter().map(|s| s.spec().heading.as_str()).collect();
        assert_eq!(headings, vec!["Highlight 6", "Highlight 7", "Highlight 8"]);
        assert_eq!(editor.counter(), 8);
    }

    #[test]
    fn test_max_seed_adds_without_wrapping() {
        let mut editor = editor_at(u32::MAX);
        let first = editor.add_section();
        let second = editor.add_section();
        assert_eq!(first, 4_294_967_295);
        assert_eq!(second, 4_294_967_296);
        assert_eq!(ids(&editor), vec!["quote_4294967295", "quote_4294967296"]);
        assert_eq!(editor.sections()[1].spec().heading, "Highlight 4294967297");
    }

    #[test]
    fn test_add_after_removal_appends_last() {
        let mut editor = editor_at(0);
        editor.add_section();
        editor.add_section();
        editor.add_section();
        remove(&mut editor, 2);
        remove(&mut editor, 0);
        let index = editor.add_section();
        assert_eq!(index, 3);
        assert_eq!(ids(&editor), vec!["quote_1", "quote_3"]);
    }

    #[test]
    fn test_add_control_click() {
        let mut editor = editor_at(1);
        let mut event = ClickEvent::new(Target::AddControl);
        assert_eq!(editor.dispatch_click(&mut event), ClickOutcome::Added(1));
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_remove_is_local() {
        let mut editor = editor_at(0);
        for _ in 0..3 {
            editor.add_section();
        }
        editor.section_mut(0).unwrap().field_mut(FieldKind::Quote).insert_str("first");
        editor.section_mut(2).unwrap().field_mut(FieldKind::Commentary).insert_str("third");

        let (outcome, prevented) = remove(&mut editor, 1);
        assert_eq!(outcome, ClickOutcome::Removed(1));
        assert!(prevented);
        assert_eq!(ids(&editor), vec!["quote_0", "quote_2"]);
        assert_eq!(editor.sections()[0].field(FieldKind::Quote).text(), "first");
        assert_eq!(editor.sections()[1].field(FieldKind::Commentary).text(), "third");
        assert_eq!(editor.sections()[1].spec().commentary.id, "commentary_2");
        assert_eq!(editor.counter(), 3);
    }

    #[test]
    fn test_marker_outside_section_is_noop() {
        let mut editor = editor_at(0);
        editor.add_section();
        let mut event = ClickEvent::new(Target::element(["btn", REMOVE_CLASS], None));
        assert_eq!(editor.dispatch_click(&mut event), ClickOutcome::Ignored);
        assert!(event.default_prevented());
        assert_eq!(editor.sections().len(), 1);
    }

    #[test]
    fn test_stale_section_is_noop() {
        let mut editor = editor_at(0);
        editor.add_section();
        let mut event = ClickEvent::new(Target::element([REMOVE_CLASS], Some(42)));
        assert_eq!(editor.dispatch_click(&mut event), ClickOutcome::Ignored);
        assert_eq!(editor.sections().len(), 1);
    }

    #[test]
    fn test_unmarked_click_is_ignored() {
        let mut editor = editor_at(0);
        editor.add_section();
        let mut event = ClickEvent::new(Target::element(["btn", "btn-danger"], Some(0)));
        assert_eq!(editor.dispatch_click(&mut event), ClickOutcome::Ignored);
        assert!(!event.default_prevented());
        assert_eq!(editor.sections().len(), 1);
    }

    #[test]
    fn test_highlights_skip_blank_sections() {
        let mut editor = editor_at(0);
        editor.add_section();
        editor.add_section();
        editor.section_mut(1).unwrap().field_mut(FieldKind::Quote).insert_str("  kept  ");
        assert_eq!(editor.highlights(), vec![Highlight::new("kept", "")]);
    }
}
