//! Editable text buffer with a character cursor

/// Editing operation applied to a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    InsertStr(String),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Text input state
///
/// The cursor is a character index, so multi-byte input never splits a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl TextField {
    /// Single-line field; newlines are dropped
    pub fn single_line() -> Self {
        Self::default()
    }

    /// Multi-line field
    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Replace the whole value and move the cursor to the end
    pub fn set(&mut self, value: &str) {
        self.value = if self.multiline {
            value.to_string()
        } else {
            value.replace(['\r', '\n'], " ")
        };
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing operation
    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => self.insert_str(&c.to_string()),
            EditOp::InsertStr(s) => self.insert_str(&s),
            EditOp::Newline => self.insert_str("\n"),
            EditOp::Backspace => {
                if self.cursor > 0 {
                    let start = self.byte_index(self.cursor - 1);
                    let end = self.byte_index(self.cursor);
                    self.value.replace_range(start..end, "");
                    self.cursor -= 1;
                }
            }
            EditOp::Delete => {
                if self.cursor < self.len() {
                    let start = self.byte_index(self.cursor);
                    let end = self.byte_index(self.cursor + 1);
                    self.value.replace_range(start..end, "");
                }
            }
            EditOp::Left => self.cursor = self.cursor.saturating_sub(1),
            EditOp::Right => self.cursor = (self.cursor + 1).min(self.len()),
            EditOp::Home => self.cursor = 0,
            EditOp::End => self.cursor = self.len(),
        }
    }

    fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.replace(['\r', '\n'], " ")
        };
        if text.is_empty() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::single_line();
        for c in "Hix".chars() {
            field.apply(EditOp::Insert(c));
        }
        field.apply(EditOp::Backspace);
        assert_eq!(field.value(), "Hi");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_cursor_editing_with_multibyte_chars() {
        let mut field = TextField::single_line();
        field.set("Koi · Fox");
        field.apply(EditOp::Home);
        field.apply(EditOp::Right);
        field.apply(EditOp::Right);
        field.apply(EditOp::Right);
        field.apply(EditOp::Right);
        field.apply(EditOp::Delete);
        assert_eq!(field.value(), "Koi  Fox");
    }

    #[test]
    fn test_single_line_flattens_newlines() {
        let mut field = TextField::single_line();
        field.apply(EditOp::InsertStr("one\ntwo".to_string()));
        field.apply(EditOp::Newline);
        assert_eq!(field.value(), "one two ");
    }

    #[test]
    fn test_multi_line_keeps_newlines() {
        let mut field = TextField::multi_line();
        field.apply(EditOp::InsertStr("a\r\nb".to_string()));
        field.apply(EditOp::Newline);
        assert_eq!(field.value(), "a\nb\n");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut field = TextField::multi_line();
        field.apply(EditOp::Left);
        field.apply(EditOp::Backspace);
        assert_eq!(field.cursor(), 0);
        field.set("abc");
        field.apply(EditOp::Right);
        assert_eq!(field.cursor(), 3);
        field.apply(EditOp::Delete);
        assert_eq!(field.value(), "abc");
    }
}
