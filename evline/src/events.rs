//! Events reported by the editor
//!
//! The editor calls one [`Listener`] method per event kind. Collecting
//! into a `Vec<Event>` or sending over a channel are provided.

use crate::error::EvlineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A committed line, without the terminating newline
    Line(String),
    /// The upstream ran out of input
    End,
    /// The upstream failed
    Error(EvlineError),
    /// The editor closed. Reported exactly once.
    Close,
}

/// Observer for lines and lifecycle events
pub trait Listener {
    fn line(&mut self, line: String);

    fn end(&mut self) {}

    fn error(&mut self, _error: EvlineError) {}

    fn close(&mut self) {}
}

impl Listener for Vec<Event> {
    fn line(&mut self, line: String) {
        self.push(Event::Line(line));
    }

    fn end(&mut self) {
        self.push(Event::End);
    }

    fn error(&mut self, error: EvlineError) {
        self.push(Event::Error(error));
    }

    fn close(&mut self) {
        self.push(Event::Close);
    }
}

// A dropped receiver only means nobody is listening anymore.
impl Listener for std::sync::mpsc::Sender<Event> {
    fn line(&mut self, line: String) {
        let _ = self.send(Event::Line(line));
    }

    fn end(&mut self) {
        let _ = self.send(Event::End);
    }

    fn error(&mut self, error: EvlineError) {
        let _ = self.send(Event::Error(error));
    }

    fn close(&mut self) {
        let _ = self.send(Event::Close);
    }
}

#[cfg(feature = "tokio")]
impl Listener for tokio::sync::mpsc::UnboundedSender<Event> {
    fn line(&mut self, line: String) {
        let _ = self.send(Event::Line(line));
    }

    fn end(&mut self) {
        let _ = self.send(Event::End);
    }

    fn error(&mut self, error: EvlineError) {
        let _ = self.send(Event::Error(error));
    }

    fn close(&mut self) {
        let _ = self.send(Event::Close);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use embedded_io::ErrorKind;

    use super::*;

    #[test]
    fn collect() {
        let mut events = Vec::<Event>::new();

        events.line("a".to_string());
        events.error(EvlineError::ReadError(ErrorKind::Other));
        events.end();
        events.close();

        assert_eq!(
            events,
            [
                Event::Line("a".to_string()),
                Event::Error(EvlineError::ReadError(ErrorKind::Other)),
                Event::End,
                Event::Close
            ]
        );
    }

    #[test]
    fn channel() {
        let (mut tx, rx) = mpsc::channel::<Event>();

        tx.line("a".to_string());
        tx.close();

        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            [Event::Line("a".to_string()), Event::Close]
        );

        drop(rx);

        tx.end();
    }

    #[cfg(feature = "tokio")]
    #[test]
    fn tokio_channel() {
        let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

        tx.line("a".to_string());
        tx.error(EvlineError::ReadError(ErrorKind::Other));
        tx.end();
        tx.close();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        assert_eq!(
            events,
            [
                Event::Line("a".to_string()),
                Event::Error(EvlineError::ReadError(ErrorKind::Other)),
                Event::End,
                Event::Close
            ]
        );

        drop(rx);

        tx.line("b".to_string());
    }
}
