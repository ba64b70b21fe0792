//! Builder for editors

use crate::async_io::AsyncSource;
use crate::complete::Completer;
use crate::core::{LineEditor, Settings};
use crate::error::EvlineError;
use crate::events::Listener;
use crate::history::History;
use crate::output::Echo;
use crate::source::Upstream;
use crate::sync_io::Source;

/// Builder for [`LineEditor`].
///
/// Building writes nothing. Call [`LineEditor::redraw`] to show the
/// prompt.
///
/// # Example
/// ```
/// use evline::builder::EditorBuilder;
/// use evline::events::Event;
/// use evline::output::Echo;
///
/// let mut output = Vec::<u8>::new();
///
/// let mut editor = EditorBuilder::new()
///     .with_prompt("password: ")
///     .with_echo(Echo::Replacement('*'))
///     .with_unbounded_history()
///     .build(&mut output, Vec::<Event>::new())
///     .unwrap();
///
/// editor.feed(b"hunter2\r").unwrap();
///
/// assert_eq!(editor.listener(), &[Event::Line("hunter2".to_string())]);
/// ```
pub struct EditorBuilder {
    settings: Settings,
    entries: Vec<String>,
}

impl EditorBuilder {
    /// Create builder with default settings: prompt `"> "`, visible
    /// echo, cursor keys enabled and at most 500 history entries.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            entries: Vec::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.settings.prompt = prompt.into();
        self
    }

    /// Set echo from an [`Echo`], a `bool` or a replacement `char`
    pub fn with_echo(mut self, echo: impl Into<Echo>) -> Self {
        self.settings.echo = echo.into();
        self
    }

    pub fn with_cursor_moves(mut self, allowed: bool) -> Self {
        self.settings.cursor_moves = allowed;
        self
    }

    /// Bound the history, `None` meaning unbounded
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.settings.history = History::new(limit);
        self
    }

    pub fn with_unbounded_history(self) -> Self {
        self.with_history_limit(None)
    }

    /// Preload history entries, oldest first. The limit is applied
    /// when building.
    pub fn with_history_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn with_completer<C>(mut self, completer: C) -> Self
    where
        C: Completer + Send + 'static,
    {
        self.settings.completer = Some(Box::new(completer));
        self
    }

    /// Number of completion candidates listed before the rest are
    /// summarized. Must be at least one.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.settings.suggestion_limit = limit;
        self
    }

    /// Append committed lines to the history
    pub fn with_recorded_history(mut self, record: bool) -> Self {
        self.settings.record_history = record;
        self
    }

    fn into_settings(self) -> Result<Settings, EvlineError> {
        let mut settings = self.settings;

        if settings.suggestion_limit == 0 {
            return Err(EvlineError::InvalidSuggestionLimit);
        }

        for entry in self.entries {
            settings.history.add(entry);
        }

        Ok(settings)
    }

    /// Build editor fed through [`LineEditor::feed`]
    pub fn build<W, L>(self, sink: W, listener: L) -> Result<LineEditor<W, L>, EvlineError>
    where
        W: embedded_io::Write,
        L: Listener,
    {
        self.build_with_upstream(sink, listener, ())
    }

    pub fn build_with_upstream<W, L, U>(
        self,
        sink: W,
        listener: L,
        upstream: U,
    ) -> Result<LineEditor<W, L, U>, EvlineError>
    where
        W: embedded_io::Write,
        L: Listener,
        U: Upstream,
    {
        let settings = self.into_settings()?;

        Ok(LineEditor::with_settings(sink, listener, upstream, settings))
    }

    /// Build editor pumped from a blocking reader with [`LineEditor::pump`]
    pub fn build_sync<W, L, R>(
        self,
        sink: W,
        listener: L,
        input: R,
    ) -> Result<LineEditor<W, L, Source<R>>, EvlineError>
    where
        W: embedded_io::Write,
        L: Listener,
        R: embedded_io::Read,
    {
        self.build_with_upstream(sink, listener, Source::new(input))
    }

    /// Build editor pumped from an async reader with
    /// [`LineEditor::pump_async`]
    pub fn build_async<W, L, R>(
        self,
        sink: W,
        listener: L,
        input: R,
    ) -> Result<LineEditor<W, L, AsyncSource<R>>, EvlineError>
    where
        W: embedded_io::Write,
        L: Listener,
        R: embedded_io_async::Read,
    {
        self.build_with_upstream(sink, listener, AsyncSource::new(input))
    }
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::events::Event;
    use crate::testlib::{csi, AsByteVec, RecordingSink, ScriptedReader};

    use super::*;

    #[test]
    fn defaults() {
        let editor = EditorBuilder::new()
            .build(RecordingSink::new(), Vec::<Event>::new())
            .unwrap();

        assert_eq!(editor.prompt(), "> ");
        assert_eq!(editor.echo(), Echo::Visible);
        assert!(editor.cursor_moves());
        assert_eq!(editor.history_limit(), Some(500));
        assert_eq!(editor.suggestion_limit(), 8);
        assert!(!editor.record_history());
        assert!(editor.sink().writes.is_empty());
    }

    #[test]
    fn configured() {
        let mut editor = EditorBuilder::new()
            .with_prompt("$ ")
            .with_echo(false)
            .with_cursor_moves(false)
            .with_history_limit(Some(2))
            .with_history_entries(["a", "b", "c"])
            .with_suggestion_limit(3)
            .with_recorded_history(true)
            .with_completer(|_: &str, _: usize, _: usize| Some(vec!["x".to_string()]))
            .build(RecordingSink::new(), Vec::<Event>::new())
            .unwrap();

        assert_eq!(editor.prompt(), "$ ");
        assert_eq!(editor.echo(), Echo::Hidden);
        assert!(!editor.cursor_moves());
        assert_eq!(editor.history().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(editor.suggestion_limit(), 3);
        assert!(editor.record_history());

        editor.feed(&"\t".as_byte_vec()).unwrap();

        assert_eq!(editor.buffer(), "x ");

        editor.feed(&[csi::UP, "\r"].as_byte_vec()).unwrap();

        assert_eq!(editor.history().collect::<Vec<_>>(), ["c", "c"]);
    }

    #[test]
    fn unbounded_history() {
        let editor = EditorBuilder::new()
            .with_unbounded_history()
            .with_history_entries((0..1000).map(|n| n.to_string()))
            .build(RecordingSink::new(), Vec::<Event>::new())
            .unwrap();

        assert_eq!(editor.history_limit(), None);
        assert_eq!(editor.history().count(), 1000);
    }

    #[test]
    fn zero_suggestion_limit() {
        let result = EditorBuilder::new()
            .with_suggestion_limit(0)
            .build(RecordingSink::new(), Vec::<Event>::new());

        assert!(matches!(result, Err(EvlineError::InvalidSuggestionLimit)));
    }

    #[test]
    fn build_sync() {
        let mut editor = EditorBuilder::new()
            .build_sync(
                RecordingSink::new(),
                Vec::<Event>::new(),
                ScriptedReader::new().chunk("line\r"),
            )
            .unwrap();

        while editor.pump().unwrap() {}

        assert_eq!(
            editor.listener(),
            &[Event::Line("line".to_string()), Event::End, Event::Close]
        );
    }
}
