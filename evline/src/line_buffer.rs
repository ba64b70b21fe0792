//! Line buffer addressed by character index

use unicode_width::UnicodeWidthStr;

/// The unsubmitted input line.
///
/// Positions are character indices, never byte offsets, so the buffer
/// always holds complete codepoints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    buf: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn get_byte_position(&self, char_index: usize) -> usize {
        self.buf
            .char_indices()
            .nth(char_index)
            .map(|(pos, _)| pos)
            .unwrap_or(self.buf.len())
    }

    /// Split into the text before and after `char_index`
    pub fn split_at(&self, char_index: usize) -> (&str, &str) {
        self.buf.split_at(self.get_byte_position(char_index))
    }

    /// Remove the character at `char_index`, if there is one
    pub fn delete(&mut self, char_index: usize) -> Option<char> {
        let pos = self.get_byte_position(char_index);

        if pos < self.buf.len() {
            Some(self.buf.remove(pos))
        } else {
            None
        }
    }

    pub fn insert_str(&mut self, char_index: usize, s: &str) {
        let pos = self.get_byte_position(char_index);

        self.buf.insert_str(pos, s);
    }

    pub fn replace(&mut self, s: &str) {
        self.buf.clear();
        self.buf.push_str(s);
    }

    /// Monospace cells taken up by the characters before `char_index`
    pub fn width_until(&self, char_index: usize) -> usize {
        self.split_at(char_index).0.width()
    }

    pub fn width(&self) -> usize {
        self.buf.width()
    }
}
