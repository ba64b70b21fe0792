//! Echo policy and the bytes written to redraw the line
//!
//! Only carriage return, erase-to-end-of-line (`ESC [ K`), plain text
//! and backspace are ever emitted. Every frame is assembled in memory
//! so the sink receives it in a single write.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

use crate::error::EvlineError;
use crate::line_buffer::LineBuffer;

pub(crate) const CLEAR_LINE: &[u8] = b"\r\x1b[K";
pub(crate) const NEWLINE: &[u8] = b"\n";
const BACKSPACE: u8 = 0x08;

/// How typed input is reflected on screen
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Echo {
    /// Render the buffer as-is
    #[default]
    Visible,
    /// Render nothing
    Hidden,
    /// Render one copy of the character per buffered character
    Replacement(char),
}

impl Echo {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Echo::Hidden)
    }

    pub(crate) fn render<'a>(&self, buffer: &'a LineBuffer) -> Cow<'a, str> {
        match *self {
            Echo::Visible => Cow::Borrowed(buffer.as_str()),
            Echo::Hidden => Cow::Borrowed(""),
            Echo::Replacement(c) => Cow::Owned(core::iter::repeat(c).take(buffer.len()).collect()),
        }
    }

    /// Column of the visual cursor when placed at `char_index`,
    /// counted from the end of the prompt
    pub(crate) fn cursor_cell(&self, buffer: &LineBuffer, char_index: usize) -> usize {
        match *self {
            Echo::Visible => buffer.width_until(char_index),
            Echo::Hidden => 0,
            Echo::Replacement(c) => char_index.min(buffer.len()) * c.width().unwrap_or(0),
        }
    }

    pub(crate) fn rendered_width(&self, buffer: &LineBuffer) -> usize {
        self.cursor_cell(buffer, buffer.len())
    }
}

impl From<bool> for Echo {
    fn from(enabled: bool) -> Self {
        if enabled {
            Echo::Visible
        } else {
            Echo::Hidden
        }
    }
}

impl From<char> for Echo {
    fn from(c: char) -> Self {
        Echo::Replacement(c)
    }
}

impl TryFrom<&str> for Echo {
    type Error = EvlineError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Echo::Replacement(c)),
            _ => Err(EvlineError::InvalidEcho(s.to_string())),
        }
    }
}

/// Carriage return, erase line, prompt and rendered text, then
/// backspaces to walk the cursor back from the end of the text.
pub(crate) fn redraw(prompt: &str, rendered: &str, backspaces: usize) -> Vec<u8> {
    let capacity = CLEAR_LINE.len() + prompt.len() + rendered.len() + backspaces;
    let mut frame = Vec::with_capacity(capacity);

    frame.extend_from_slice(CLEAR_LINE);
    frame.extend_from_slice(prompt.as_bytes());
    frame.extend_from_slice(rendered.as_bytes());
    frame.extend(core::iter::repeat(BACKSPACE).take(backspaces));

    frame
}

/// Suggestion listing printed on its own line below the prompt
pub(crate) fn suggestions(listing: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(listing.len() + 2 * NEWLINE.len());

    frame.extend_from_slice(NEWLINE);
    frame.extend_from_slice(listing.as_bytes());
    frame.extend_from_slice(NEWLINE);

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(s: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        buffer.replace(s);
        buffer
    }

    #[test]
    fn render() {
        let line = buffer("test");

        assert_eq!(Echo::Visible.render(&line), "test");
        assert_eq!(Echo::Hidden.render(&line), "");
        assert_eq!(Echo::Replacement('*').render(&line), "****");
    }

    #[test]
    fn cursor_cell() {
        let line = buffer("日本go");

        assert_eq!(Echo::Visible.cursor_cell(&line, 1), 2);
        assert_eq!(Echo::Visible.rendered_width(&line), 6);
        assert_eq!(Echo::Replacement('*').cursor_cell(&line, 1), 1);
        assert_eq!(Echo::Replacement('＊').cursor_cell(&line, 3), 6);

        for index in 0..=4 {
            assert_eq!(Echo::Hidden.cursor_cell(&line, index), 0);
        }
    }

    #[test]
    fn conversions() {
        assert_eq!(Echo::from(true), Echo::Visible);
        assert_eq!(Echo::from(false), Echo::Hidden);
        assert_eq!(Echo::try_from("#"), Ok(Echo::Replacement('#')));
        assert_eq!(
            Echo::try_from("**"),
            Err(EvlineError::InvalidEcho("**".to_string()))
        );
        assert!(Echo::try_from("").is_err());
    }

    #[test]
    fn redraw_frame() {
        assert_eq!(redraw("> ", "abc", 2), b"\r\x1b[K> abc\x08\x08");
        assert_eq!(redraw("", "", 0), b"\r\x1b[K");
        assert_eq!(suggestions("foo bar"), b"\nfoo bar\n");
    }
}
