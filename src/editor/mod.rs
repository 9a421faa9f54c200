// src/editor/mod.rs
pub mod buffer;
pub mod counter;
pub mod cursor;
pub mod list;
pub mod section;

pub use buffer::FieldBuffer;
pub use counter::HighlightCounter;
pub use cursor::{Focus, Slot};
pub use list::{ClickEvent, ClickOutcome, HighlightListEditor, PageLayout, Section, Target};
pub use section::{ControlSpec, FieldKind, FieldSpec, SectionSpec, REMOVE_CLASS, SECTION_CLASS};
