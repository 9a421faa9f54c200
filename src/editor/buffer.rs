// src/editor/buffer.rs

/// Multi-line text held by one quote or commentary field. Cursor columns
/// count chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuffer {
    content: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    is_modified: bool,
}

impl FieldBuffer {
    pub fn new() -> Self {
        FieldBuffer {
            content: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            is_modified: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let content: Vec<String> = text.split('\n').map(|s| s.trim_end_matches('\r').to_string()).collect();
        let cursor_line = content.len() - 1;
        let cursor_col = char_len(&content[cursor_line]);

        FieldBuffer {
            content,
            cursor_line,
            cursor_col,
            is_modified: false,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }

        let line = &mut self.content[self.cursor_line];
        let pos = byte_offset(line, self.cursor_col);
        line.insert(pos, ch);
        self.cursor_col += 1;
        self.is_modified = true;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.content[self.cursor_line];
        let pos = byte_offset(line, self.cursor_col);
        let after = line.split_off(pos);

        self.content.insert(self.cursor_line + 1, after);
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.is_modified = true;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.content[self.cursor_line];
            let pos = byte_offset(line, self.cursor_col - 1);
            line.remove(pos);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            // Merge with previous line
            let removed = self.content.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = char_len(&self.content[self.cursor_line]);
            self.content[self.cursor_line].push_str(&removed);
        } else {
            return;
        }
        self.is_modified = true;
    }

    pub fn move_cursor(&mut self, line_delta: i32, col_delta: i32) {
        let new_line = (self.cursor_line as i64 + line_delta as i64).max(0) as usize;
        let new_col = (self.cursor_col as i64 + col_delta as i64).max(0) as usize;

        if new_line < self.content.len() {
            self.cursor_line = new_line;
            self.cursor_col = new_col.min(char_len(&self.content[new_line]));
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    pub fn lines(&self) -> &[String] {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.content.iter().all(|l| l.trim().is_empty())
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}

impl Default for FieldBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_newline() {
        let mut buf = FieldBuffer::new();
        buf.insert_str("ab");
        buf.move_cursor(0, -1);
        buf.insert_newline();
        assert_eq!(buf.lines(), &["a".to_string(), "b".to_string()]);
        assert_eq!(buf.cursor(), (1, 0));
        assert!(buf.is_modified());
    }

    #[test]
    fn test_delete_merges_lines() {
        let mut buf = FieldBuffer::from_text("one\ntwo");
        buf.move_cursor(0, -3);
        buf.delete_char();
        assert_eq!(buf.text(), "onetwo");
        assert_eq!(buf.cursor(), (0, 3));
    }

    #[test]
    fn test_delete_at_start_is_noop() {
        let mut buf = FieldBuffer::new();
        buf.delete_char();
        assert_eq!(buf.text(), "");
        assert!(!buf.is_modified());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = FieldBuffer::from_text("héllo");
        buf.move_cursor(0, -3);
        buf.delete_char();
        assert_eq!(buf.text(), "hllo");
        buf.insert_char('ë');
        assert_eq!(buf.text(), "hëllo");
    }

    #[test]
    fn test_from_text_keeps_trailing_line() {
        let buf = FieldBuffer::from_text("quote\n");
        assert_eq!(buf.lines().len(), 2);
        assert_eq!(buf.cursor(), (1, 0));
        assert_eq!(buf.text(), "quote\n");
    }

    #[test]
    fn test_blank_detection() {
        assert!(FieldBuffer::from_text("  \n ").is_blank());
        assert!(!FieldBuffer::from_text("x").is_blank());
    }
}
