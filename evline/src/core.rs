//! Line editor state machine
//!
//! [`LineEditor`] owns the line buffer, cursor, history and echo
//! policy. It consumes keys and decoded text, redraws the prompt line
//! on its sink after every visible change, and reports committed lines
//! and lifecycle events to its [`Listener`].
//!
//! The editor never reads on its own. Bytes are pushed in with
//! [`LineEditor::feed`], or pulled from a reader by the pumps in
//! [`crate::sync_io`] and [`crate::async_io`].

use embedded_io::Error as _;
use tracing::{debug, trace};

use crate::complete::{self, Completer, Completion, DEFAULT_SUGGESTION_LIMIT};
use crate::error::EvlineError;
use crate::events::Listener;
use crate::history::History;
use crate::input::{Action, Key, Parser, Token};
use crate::line_buffer::LineBuffer;
use crate::output::{self, Echo, CLEAR_LINE, NEWLINE};
use crate::source::Upstream;

pub const DEFAULT_PROMPT: &str = "> ";

/// Everything configurable before construction
pub(crate) struct Settings {
    pub(crate) prompt: String,
    pub(crate) echo: Echo,
    pub(crate) cursor_moves: bool,
    pub(crate) history: History,
    pub(crate) completer: Option<Box<dyn Completer + Send>>,
    pub(crate) suggestion_limit: usize,
    pub(crate) record_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            echo: Echo::Visible,
            cursor_moves: true,
            history: History::default(),
            completer: None,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            record_history: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

/// Event driven line editor writing to `W`, reporting to `L` and
/// controlling the upstream `U`.
///
/// Every operation that writes returns the sink's failure as
/// [`EvlineError::WriteError`]. Once closed, input is ignored and
/// nothing more is written.
pub struct LineEditor<W, L, U = ()>
where
    W: embedded_io::Write,
    L: Listener,
    U: Upstream,
{
    sink: W,
    listener: L,
    upstream: U,
    parser: Parser,
    buffer: LineBuffer,
    cursor: usize,
    prompt: String,
    echo: Echo,
    cursor_moves: bool,
    history: History,
    completer: Option<Box<dyn Completer + Send>>,
    suggestion_limit: usize,
    record_history: bool,
    state: State,
}

impl<W, L, U> LineEditor<W, L, U>
where
    W: embedded_io::Write,
    L: Listener,
    U: Upstream,
{
    /// Create an editor with default settings. Nothing is written
    /// until the first edit or an explicit [`LineEditor::redraw`].
    pub fn new(sink: W, listener: L, upstream: U) -> Self {
        Self::with_settings(sink, listener, upstream, Settings::default())
    }

    pub(crate) fn with_settings(sink: W, listener: L, upstream: U, settings: Settings) -> Self {
        Self {
            sink,
            listener,
            upstream,
            parser: Parser::new(),
            buffer: LineBuffer::new(),
            cursor: 0,
            prompt: settings.prompt,
            echo: settings.echo,
            cursor_moves: settings.cursor_moves,
            history: settings.history,
            completer: settings.completer,
            suggestion_limit: settings.suggestion_limit,
            record_history: settings.record_history,
            state: State::Open,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt. Always redraws.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Result<(), EvlineError> {
        self.prompt = prompt.into();
        self.redraw()
    }

    pub fn echo(&self) -> Echo {
        self.echo
    }

    pub fn set_echo(&mut self, echo: impl Into<Echo>) -> Result<(), EvlineError> {
        let echo = echo.into();

        if echo == self.echo {
            return Ok(());
        }

        self.echo = echo;

        if self.buffer.is_empty() {
            Ok(())
        } else {
            self.redraw()
        }
    }

    pub fn cursor_moves(&self) -> bool {
        self.cursor_moves
    }

    /// Allow or forbid the cursor keys. Allowing them moves the cursor
    /// to the end of the buffer.
    pub fn set_cursor_moves(&mut self, allowed: bool) -> Result<(), EvlineError> {
        let enabled = allowed && !self.cursor_moves;

        self.cursor_moves = allowed;

        if enabled {
            self.set_cursor_position(self.buffer.len())
        } else {
            Ok(())
        }
    }

    /// Cursor as a character index into the buffer
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to the character index `position`. Positions
    /// past the end of the buffer are ignored.
    pub fn set_cursor_position(&mut self, position: usize) -> Result<(), EvlineError> {
        if position > self.buffer.len() || position == self.cursor {
            return Ok(());
        }

        let cell = self.cursor_cell();

        self.cursor = position;

        if self.cursor_cell() == cell {
            Ok(())
        } else {
            self.redraw()
        }
    }

    pub fn move_cursor_by(&mut self, delta: isize) -> Result<(), EvlineError> {
        match self.cursor.checked_add_signed(delta) {
            Some(position) => self.set_cursor_position(position),
            None => Ok(()),
        }
    }

    /// Screen column of the cursor relative to the end of the prompt
    pub fn cursor_cell(&self) -> usize {
        self.echo.cursor_cell(&self.buffer, self.cursor)
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    /// Replace the buffer and move the cursor to its end
    pub fn set_buffer(&mut self, text: &str) -> Result<(), EvlineError> {
        let changed = match self.echo {
            Echo::Replacement(_) => text.chars().count() != self.buffer.len(),
            Echo::Visible | Echo::Hidden => text != self.buffer.as_str(),
        };
        let cell = self.cursor_cell();

        self.buffer.replace(text);
        self.cursor = self.buffer.len();

        if changed || self.cursor_cell() != cell {
            self.redraw()
        } else {
            Ok(())
        }
    }

    /// Insert `text` at the cursor and move the cursor past it
    pub fn insert_text(&mut self, text: &str) -> Result<(), EvlineError> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.chars().count();

        self.redraw()
    }

    /// Delete the character at `index`, keeping the cursor on the same
    /// surviving character. Out of range indices are ignored.
    pub fn delete_char(&mut self, index: usize) -> Result<(), EvlineError> {
        if self.buffer.delete(index).is_none() {
            return Ok(());
        }

        if index < self.cursor {
            self.cursor -= 1;
        }

        self.redraw()
    }

    /// History entries, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.entries()
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history.limit()
    }

    pub fn add_history(&mut self, line: impl Into<String>) -> Result<(), EvlineError> {
        let unsaved = self.history.add(line);

        self.restore(unsaved)
    }

    /// Bound the history to `limit` entries, `None` meaning unbounded.
    /// The oldest entries are dropped first.
    pub fn set_history_limit(&mut self, limit: Option<usize>) -> Result<(), EvlineError> {
        let unsaved = self.history.set_limit(limit);

        self.restore(unsaved)
    }

    pub fn clear_history(&mut self) -> Result<(), EvlineError> {
        let unsaved = self.history.clear();

        self.restore(unsaved)
    }

    fn restore(&mut self, unsaved: Option<String>) -> Result<(), EvlineError> {
        match unsaved {
            Some(text) => self.set_buffer(&text),
            None => Ok(()),
        }
    }

    pub fn set_completer<C>(&mut self, completer: C)
    where
        C: Completer + Send + 'static,
    {
        self.completer = Some(Box::new(completer));
    }

    pub fn clear_completer(&mut self) {
        self.completer = None;
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    pub fn set_suggestion_limit(&mut self, limit: usize) -> Result<(), EvlineError> {
        if limit == 0 {
            return Err(EvlineError::InvalidSuggestionLimit);
        }

        self.suggestion_limit = limit;
        Ok(())
    }

    pub fn record_history(&self) -> bool {
        self.record_history
    }

    /// Append every non-empty committed line to the history
    pub fn set_record_history(&mut self, record: bool) {
        self.record_history = record;
    }

    /// Rewrite the whole prompt line and put the cursor back in place
    pub fn redraw(&mut self) -> Result<(), EvlineError> {
        let backspaces = self.echo.rendered_width(&self.buffer) - self.cursor_cell();
        let frame = {
            let rendered = self.echo.render(&self.buffer);

            output::redraw(&self.prompt, &rendered, backspaces)
        };

        self.write(&frame)
    }

    /// Erase the prompt line so other output can be printed in its
    /// place. Call [`LineEditor::redraw`] afterwards.
    pub fn clear(&mut self) -> Result<(), EvlineError> {
        if self.prompt.is_empty() && self.echo.render(&self.buffer).is_empty() {
            return Ok(());
        }

        self.write(CLEAR_LINE)
    }

    /// Feed raw input bytes. Printable characters arriving together
    /// are inserted as one piece of text.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), EvlineError> {
        let mut text = String::new();

        for &byte in bytes {
            match self.parser.advance(byte) {
                Action::Ignore => (),
                Action::Print(c) => text.push(c),
                Action::InvalidUtf8 => trace!(byte, "dropped invalid utf-8"),
                Action::Token(token) => {
                    self.flush_text(&mut text)?;
                    self.handle_token(token)?;
                }
            }
        }

        self.flush_text(&mut text)
    }

    fn flush_text(&mut self, text: &mut String) -> Result<(), EvlineError> {
        if text.is_empty() {
            return Ok(());
        }

        let text = core::mem::take(text);

        self.handle_text(&text)
    }

    /// Handle decoded text
    pub fn handle_text(&mut self, text: &str) -> Result<(), EvlineError> {
        if self.is_closed() {
            return Ok(());
        }

        trace!(chars = text.chars().count(), "text");

        self.insert_text(text)
    }

    pub fn handle_token(&mut self, token: Token) -> Result<(), EvlineError> {
        match Key::from_token(token) {
            Some(key) => self.handle_key(key),
            None => {
                trace!(?token, "dropped unbound token");
                Ok(())
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Result<(), EvlineError> {
        if self.is_closed() {
            return Ok(());
        }

        trace!(?key, "key");

        match key {
            Key::Enter => {
                let newline = if self.echo.is_enabled() {
                    self.write(NEWLINE)
                } else {
                    Ok(())
                };

                let committed = self.commit();

                newline.and(committed)
            }
            Key::Backspace => match self.cursor.checked_sub(1) {
                Some(index) => self.delete_char(index),
                None => Ok(()),
            },
            Key::Delete => self.delete_char(self.cursor),
            Key::Tab => self.autocomplete(),
            Key::EndOfTransmission => self.end(),
            Key::Up => self.history_up(),
            Key::Down => self.history_down(),
            Key::Left | Key::Right | Key::Home | Key::End if !self.cursor_moves => Ok(()),
            Key::Left => self.move_cursor_by(-1),
            Key::Right => self.move_cursor_by(1),
            Key::Home => self.set_cursor_position(0),
            Key::End => self.set_cursor_position(self.buffer.len()),
            // Reserved
            Key::Insert => Ok(()),
        }
    }

    fn history_up(&mut self) -> Result<(), EvlineError> {
        let entry = match self.history.move_up(self.buffer.as_str()) {
            Some(entry) => entry.to_string(),
            None => return Ok(()),
        };

        self.set_buffer(&entry)
    }

    fn history_down(&mut self) -> Result<(), EvlineError> {
        match self.history.move_down() {
            Some(entry) => self.set_buffer(&entry),
            None => Ok(()),
        }
    }

    fn autocomplete(&mut self) -> Result<(), EvlineError> {
        let Some(completer) = self.completer.as_deref_mut() else {
            return Ok(());
        };

        let (before, after) = self.buffer.split_at(self.cursor);

        match complete::complete(completer, before, after, self.suggestion_limit) {
            None => Ok(()),
            Some(Completion::Suggest(listing)) => {
                self.write(&output::suggestions(&listing))?;
                self.redraw()
            }
            Some(Completion::Insert { line, cursor }) => {
                if line == self.buffer.as_str() && cursor == self.cursor {
                    return Ok(());
                }

                self.buffer.replace(&line);
                self.cursor = cursor;
                self.redraw()
            }
        }
    }

    /// Emit the buffer as a line and start over with an empty one
    fn commit(&mut self) -> Result<(), EvlineError> {
        self.history.reset();

        let line = self.buffer.as_str().to_string();

        let redrawn = if !line.is_empty() {
            self.set_buffer("")
        } else if self.echo.is_enabled() {
            self.redraw()
        } else {
            Ok(())
        };

        if self.record_history && !line.is_empty() {
            self.history.add(line.as_str());
        }

        debug!(chars = line.chars().count(), "line committed");

        self.listener.line(line);

        redrawn
    }

    /// End of input. A pending line is committed before the end is
    /// reported and the editor closes.
    pub fn end(&mut self) -> Result<(), EvlineError> {
        if self.is_closed() {
            return Ok(());
        }

        let committed = if self.buffer.is_empty() {
            Ok(())
        } else {
            self.commit()
        };

        debug!("end of input");

        self.listener.end();
        self.close();

        committed
    }

    /// Report an upstream failure and close
    pub fn error(&mut self, error: EvlineError) {
        if self.is_closed() {
            return;
        }

        debug!(%error, "upstream error");

        self.listener.error(error);
        self.close();
    }

    /// Close the editor and the upstream. Only the first call has an
    /// effect.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }

        self.state = State::Closed;
        self.upstream.close();

        debug!("closed");

        self.listener.close();
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    pub fn is_readable(&self) -> bool {
        !self.is_closed() && self.upstream.is_readable()
    }

    pub fn pause(&mut self) {
        self.upstream.pause();
    }

    pub fn resume(&mut self) {
        self.upstream.resume();
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), EvlineError> {
        if self.is_closed() {
            return Ok(());
        }

        self.sink
            .write_all(bytes)
            .map_err(|e| EvlineError::WriteError(e.kind()))?;

        self.sink
            .flush()
            .map_err(|e| EvlineError::WriteError(e.kind()))
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    pub(crate) fn upstream_mut(&mut self) -> &mut U {
        &mut self.upstream
    }

    /// Consume the editor and return sink, listener and upstream
    pub fn into_parts(self) -> (W, L, U) {
        (self.sink, self.listener, self.upstream)
    }
}
