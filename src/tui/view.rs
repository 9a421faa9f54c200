// src/tui/view.rs
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthChar;

use super::app::{App, Hit, HitTarget};
use crate::editor::{FieldKind, Focus, Section, SectionSpec, Slot, Target};

const HELP: &str = "Tab/Shift-Tab move | Ctrl-N add | Ctrl-D remove | Ctrl-S export | Esc quit";

/// Terminal columns taken by the first `col` chars of `line`.
fn display_column(line: &str, col: usize) -> usize {
    line.chars().take(col).map(|ch| ch.width().unwrap_or(0)).sum()
}

fn section_height(spec: &SectionSpec) -> u16 {
    let fields: u16 = FieldKind::ALL.iter().map(|k| 1 + spec.field(*k).rows).sum();
    2 + fields + 1
}

pub fn render(f: &mut Frame, app: &mut App) {
    app.hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_sections(f, app, chunks[1]);
    render_add_control(f, app, chunks[2]);

    let status = if app.status.is_empty() { HELP } else { app.status.as_str() };
    f.render_widget(Paragraph::new(status).style(Style::default().fg(Color::DarkGray)), chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;
    let source = if app.source_url.is_empty() { "(no source)" } else { app.source_url.as_str() };
    let info = format!(
        "#{}  {} sections  next index {}",
        editor.container_id(),
        editor.sections().len(),
        editor.counter()
    );

    let paragraph = Paragraph::new(vec![
        Line::from(vec![Span::styled("Source: ", Style::default().add_modifier(Modifier::BOLD)), Span::raw(source)]),
        Line::styled(info, Style::default().fg(Color::DarkGray)),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(paragraph, area);
}

fn render_sections(f: &mut Frame, app: &mut App, area: Rect) {
    let count = app.editor.sections().len();
    if count == 0 || area.height == 0 {
        return;
    }

    let height = section_height(app.editor.sections()[0].spec());
    let visible = ((area.height / height) as usize).max(1);
    if let Some(position) = app.focus.position() {
        if position < app.scroll {
            app.scroll = position;
        } else if position >= app.scroll + visible {
            app.scroll = position + 1 - visible;
        }
    }
    app.scroll = app.scroll.min(count - 1);

    let mut cursor = None;
    let mut y = area.y;
    for position in app.scroll..count {
        let bottom = area.y + area.height;
        if y >= bottom {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, height.min(bottom - y));
        let section = &app.editor.sections()[position];
        if let Some(pos) = render_section(f, section, position, app.focus, rect, &mut app.hits) {
            cursor = Some(pos);
        }
        y += height;
    }

    if let Some((x, y)) = cursor {
        f.set_cursor(x, y);
    }
}

fn render_section(
    f: &mut Frame,
    section: &Section,
    position: usize,
    focus: Focus,
    area: Rect,
    hits: &mut Vec<Hit>,
) -> Option<(u16, u16)> {
    let spec = section.spec();
    let border = if focus.position() == Some(position) {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {} ", spec.heading), Style::default().add_modifier(Modifier::BOLD)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Clicks on the section body reach the listener too; it ignores them.
    hits.push(Hit {
        area,
        target: HitTarget::Click(Target::element([spec.class], Some(spec.index))),
    });

    let dim = Style::default().fg(Color::DarkGray);
    let mut cursor = None;
    let mut y = inner.y;

    for kind in FieldKind::ALL {
        let field = spec.field(kind);
        let focused = focus == (Focus::Section { position, slot: Slot::Field(kind) });

        let label_area = Rect::new(inner.x, y, inner.width, 1).intersection(inner);
        let label = Line::from(vec![
            Span::styled(field.label, Style::default().fg(Color::Yellow)),
            Span::styled(format!("  #{}", field.id), dim),
        ]);
        f.render_widget(Paragraph::new(label), label_area);
        y += 1;

        let rows = field.rows as usize;
        let text_area = Rect::new(inner.x, y, inner.width, field.rows).intersection(inner);
        let buffer = section.field(kind);
        let (line, col) = buffer.cursor();
        let first = line.saturating_sub(rows.saturating_sub(1));

        let lines: Vec<Line> = if buffer.is_blank() && !focused {
            vec![Line::styled(field.placeholder, dim.add_modifier(Modifier::ITALIC))]
        } else {
            buffer.lines().iter().skip(first).take(rows).map(|l| Line::raw(l.as_str())).collect()
        };
        let style = if focused { Style::default().bg(Color::Rgb(30, 30, 40)) } else { Style::default() };
        f.render_widget(Paragraph::new(lines).style(style), text_area);
        hits.push(Hit { area: text_area, target: HitTarget::Field { position, kind } });

        if focused && text_area.width > 0 && text_area.height > 0 {
            let width = buffer.lines().get(line).map_or(0, |l| display_column(l, col));
            let x = text_area.x + (width as u16).min(text_area.width - 1);
            let y = text_area.y + ((line - first) as u16).min(text_area.height - 1);
            cursor = Some((x, y));
        }
        y += field.rows;
    }

    let label = format!("[ {} ]", spec.remove.label);
    let remove_area = Rect::new(inner.x, y, label.len() as u16, 1).intersection(inner);
    let mut style = Style::default().fg(Color::Red);
    if focus == (Focus::Section { position, slot: Slot::Remove }) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    f.render_widget(Paragraph::new(Span::styled(label, style)), remove_area);
    hits.push(Hit { area: remove_area, target: HitTarget::Click(Target::remove_control(spec)) });

    cursor
}

fn render_add_control(f: &mut Frame, app: &mut App, area: Rect) {
    let label = "[ + Add Highlight ]";
    let mut style = Style::default().fg(Color::Green);
    if app.focus == Focus::AddControl {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let button = Rect::new(area.x, area.y, label.len() as u16, area.height).intersection(area);
    f.render_widget(Paragraph::new(Span::styled(label, style)), button);
    app.hits.push(Hit { area: button, target: HitTarget::Click(Target::AddControl) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindings;
    use crate::draft::Highlight;
    use crate::editor::{HighlightListEditor, PageLayout};
    use ratatui::backend::TestBackend;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_sections_and_hits() {
        let highlights = vec![Highlight::new("stay hungry", "")];
        let editor = HighlightListEditor::attach_with(&PageLayout::default(), &highlights).unwrap();
        let mut app = App::new(editor, KeyBindings::default(), "https://example.com/talk");

        let screen = draw(&mut app);
        assert!(screen.contains("Source: https://example.com/talk"));
        assert!(screen.contains("Highlight 1"));
        assert!(screen.contains("#quote_0"));
        assert!(screen.contains("stay hungry"));
        assert!(screen.contains("Add your thoughts, analysis, or notes..."));
        assert!(screen.contains("[ Remove ]"));
        assert!(screen.contains("[ + Add Highlight ]"));

        let removes = app
            .hits
            .iter()
            .filter(|h| matches!(&h.target, HitTarget::Click(t) if t.has_class(crate::editor::REMOVE_CLASS)))
            .count();
        assert_eq!(removes, 1);
        assert!(app.hits.iter().any(|h| h.target == HitTarget::Click(Target::AddControl)));
    }

    #[test]
    fn test_scrolls_to_focused_section() {
        let highlights: Vec<Highlight> = (0..5).map(|i| Highlight::new(format!("q{i}"), "")).collect();
        let editor = HighlightListEditor::attach_with(&PageLayout::default(), &highlights).unwrap();
        let mut app = App::new(editor, KeyBindings::default(), "");
        app.focus = Focus::quote(4);

        let screen = draw(&mut app);
        assert!(screen.contains("Highlight 5"));
        assert!(!screen.contains("Highlight 1 "));
        assert!(app.scroll > 0);
    }

    fn cursor_for(quote: &str) -> (u16, u16) {
        let highlights = vec![Highlight::new(quote, "")];
        let editor = HighlightListEditor::attach_with(&PageLayout::default(), &highlights).unwrap();
        let mut app = App::new(editor, KeyBindings::default(), "");
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        terminal.get_cursor().unwrap()
    }

    #[test]
    fn test_display_column_counts_wide_chars() {
        assert_eq!(display_column("abc", 2), 2);
        assert_eq!(display_column("漢字x", 2), 4);
        assert_eq!(display_column("漢字x", 3), 5);
    }

    #[test]
    fn test_cursor_follows_display_width() {
        let (narrow_x, narrow_y) = cursor_for("ab");
        let (wide_x, wide_y) = cursor_for("漢字");
        assert_eq!(wide_y, narrow_y);
        assert_eq!(wide_x, narrow_x + 2);
    }
}
