// src/tui/app.rs
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::config::KeyBindings;
use crate::editor::{ClickEvent, ClickOutcome, FieldBuffer, FieldKind, Focus, HighlightListEditor, Slot, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppExit {
    Export,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// Dispatched to the editor's click listener.
    Click(Target),
    Field { position: usize, kind: FieldKind },
}

/// Screen region recorded during the last draw, used to resolve mouse clicks.
#[derive(Debug, Clone)]
pub struct Hit {
    pub area: Rect,
    pub target: HitTarget,
}

pub struct App {
    pub(super) editor: HighlightListEditor,
    pub(super) focus: Focus,
    keys: KeyBindings,
    pub(super) source_url: String,
    pub(super) status: String,
    pub(super) hits: Vec<Hit>,
    pub(super) scroll: usize,
    exit: Option<AppExit>,
}

impl App {
    pub fn new(editor: HighlightListEditor, keys: KeyBindings, source_url: impl Into<String>) -> Self {
        let focus = Focus::first(editor.sections().len());
        App {
            editor,
            focus,
            keys,
            source_url: source_url.into(),
            status: String::new(),
            hits: Vec::new(),
            scroll: 0,
            exit: None,
        }
    }

    pub fn editor(&self) -> &HighlightListEditor {
        &self.editor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn exit(&self) -> Option<AppExit> {
        self.exit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.edit(|buf| buf.insert_str(&text)),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let sections = self.editor.sections().len();
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

        if self.keys.quit.matches(&key) || ctrl_c {
            self.exit = Some(AppExit::Quit);
        } else if self.keys.export.matches(&key) {
            self.exit = Some(AppExit::Export);
        } else if self.keys.add.matches(&key) {
            self.click(Target::AddControl);
        } else if self.keys.remove.matches(&key) {
            self.remove_focused();
        } else if self.keys.next.matches(&key) {
            self.focus = self.focus.next(sections);
        } else if self.keys.prev.matches(&key) {
            self.focus = self.focus.prev(sections);
        } else {
            match key.code {
                KeyCode::Enter => match self.focus {
                    Focus::AddControl => {
                        self.click(Target::AddControl);
                    }
                    Focus::Section { slot: Slot::Remove, .. } => self.remove_focused(),
                    Focus::Section { .. } => self.edit(FieldBuffer::insert_newline),
                },
                KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    self.edit(|buf| buf.insert_char(ch));
                }
                KeyCode::Backspace => self.edit(FieldBuffer::delete_char),
                KeyCode::Left => self.edit(|buf| buf.move_cursor(0, -1)),
                KeyCode::Right => self.edit(|buf| buf.move_cursor(0, 1)),
                KeyCode::Up => self.edit(|buf| buf.move_cursor(-1, 0)),
                KeyCode::Down => self.edit(|buf| buf.move_cursor(1, 0)),
                _ => {}
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        // Later hits are nested inside earlier ones.
        let hit = self
            .hits
            .iter()
            .rev()
            .find(|h| contains(h.area, mouse.column, mouse.row))
            .map(|h| h.target.clone());

        match hit {
            Some(HitTarget::Click(target)) => {
                self.click(target);
            }
            Some(HitTarget::Field { position, kind }) => {
                self.focus = Focus::Section { position, slot: Slot::Field(kind) };
            }
            None => {}
        }
    }

    /// Sends a click through the editor's listener and keeps focus on a
    /// live element afterwards.
    pub fn click(&mut self, target: Target) -> ClickOutcome {
        let removed_at = target.enclosing_section().and_then(|index| self.editor.position_of(index));
        let mut event = ClickEvent::new(target);
        let outcome = self.editor.dispatch_click(&mut event);
        let sections = self.editor.sections().len();

        match outcome {
            ClickOutcome::Added(index) => {
                self.focus = Focus::quote(sections - 1);
                self.status = format!("Added highlight {}", index + 1);
            }
            ClickOutcome::Removed(index) => {
                if let Some(position) = removed_at {
                    self.focus = self.focus.after_removal(position, sections);
                }
                self.status = format!("Removed highlight {}", index + 1);
            }
            ClickOutcome::Ignored => debug!(prevented = event.default_prevented(), "click ignored"),
        }
        outcome
    }

    fn remove_focused(&mut self) {
        let target = match self.focus.position().and_then(|p| self.editor.sections().get(p)) {
            Some(section) => Target::remove_control(section.spec()),
            None => return,
        };
        self.click(target);
    }

    fn edit(&mut self, f: impl FnOnce(&mut FieldBuffer)) {
        if let Some((position, kind)) = self.focus.field() {
            if let Some(section) = self.editor.section_mut(position) {
                f(section.field_mut(kind));
            }
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Highlight;
    use crate::editor::PageLayout;

    fn app_with(highlights: &[Highlight]) -> App {
        let editor = HighlightListEditor::attach_with(&PageLayout::default(), highlights).unwrap();
        App::new(editor, KeyBindings::default(), "https://example.com")
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = app_with(&[Highlight::default()]);
        type_str(&mut app, "quote");
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        type_str(&mut app, "note");
        assert_eq!(app.editor().highlights(), vec![Highlight::new("quote", "note")]);
    }

    #[test]
    fn test_add_key_appends_and_focuses() {
        let mut app = app_with(&[Highlight::default()]);
        press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(app.editor().sections().len(), 2);
        assert_eq!(app.focus(), Focus::quote(1));
        assert_eq!(app.status(), "Added highlight 2");
        assert_eq!(app.editor().sections()[1].spec().quote.id, "quote_1");
    }

    #[test]
    fn test_remove_key_keeps_siblings() {
        let mut app = app_with(&[Highlight::new("a", ""), Highlight::new("b", ""), Highlight::new("c", "")]);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus(), Focus::quote(1));

        press(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
        let ids: Vec<&str> = app.editor().sections().iter().map(|s| s.spec().quote.id.as_str()).collect();
        assert_eq!(ids, vec!["quote_0", "quote_2"]);
        assert_eq!(app.focus(), Focus::quote(1));
        assert_eq!(app.editor().counter(), 3);
    }

    #[test]
    fn test_enter_on_add_control() {
        let mut app = app_with(&[]);
        assert_eq!(app.focus(), Focus::AddControl);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.editor().sections().len(), 1);
        assert_eq!(app.editor().sections()[0].spec().heading, "Highlight 2");
    }

    #[test]
    fn test_mouse_click_on_remove_hit() {
        let mut app = app_with(&[Highlight::new("a", ""), Highlight::new("b", "")]);
        let spec = app.editor().sections()[1].spec().clone();
        app.hits = vec![
            Hit { area: Rect::new(0, 0, 40, 13), target: HitTarget::Click(Target::element([spec.class], Some(0))) },
            Hit { area: Rect::new(0, 13, 40, 13), target: HitTarget::Click(Target::element([spec.class], Some(1))) },
            Hit { area: Rect::new(1, 24, 10, 1), target: HitTarget::Click(Target::remove_control(&spec)) },
        ];

        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };

        app.handle_event(click(20, 15));
        assert_eq!(app.editor().sections().len(), 2);

        app.handle_event(click(3, 24));
        assert_eq!(app.editor().sections().len(), 1);
        assert_eq!(app.editor().sections()[0].spec().quote.id, "quote_0");
    }

    #[test]
    fn test_export_and_quit() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(app.exit(), Some(AppExit::Export));

        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.exit(), Some(AppExit::Quit));
    }
}
