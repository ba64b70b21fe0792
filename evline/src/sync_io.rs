//! Blocking input
//!
//! [`Source`] wraps an [`embedded_io::Read`] as the editor's upstream,
//! and [`LineEditor::pump`] performs one read and feeds the result to
//! the editor.
//!
//! ```no_run
//! use evline::builder::EditorBuilder;
//! use evline::events::Event;
//! use evline::sync_io::{StdinWrapper, StdoutWrapper};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel::<Event>();
//!
//! let mut editor = EditorBuilder::new()
//!     .with_prompt("$ ")
//!     .build_sync(StdoutWrapper::new(), tx, StdinWrapper::new())
//!     .unwrap();
//!
//! editor.redraw().unwrap();
//!
//! while editor.pump().unwrap() {
//!     for event in rx.try_iter() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

use embedded_io::Error as _;

use crate::core::LineEditor;
use crate::error::EvlineError;
use crate::events::Listener;
use crate::source::{Flow, Upstream};

const READ_CHUNK: usize = 64;

/// Upstream reading from `R`
pub struct Source<R>
where
    R: embedded_io::Read,
{
    input: R,
    flow: Flow,
}

impl<R> Source<R>
where
    R: embedded_io::Read,
{
    pub fn new(input: R) -> Self {
        Self {
            input,
            flow: Flow::Flowing,
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn is_paused(&self) -> bool {
        self.flow == Flow::Paused
    }

    pub fn get_ref(&self) -> &R {
        &self.input
    }

    /// Consume the source and return the reader
    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<R> Upstream for Source<R>
where
    R: embedded_io::Read,
{
    fn is_readable(&self) -> bool {
        self.flow.is_readable()
    }

    fn pause(&mut self) {
        self.flow.pause();
    }

    fn resume(&mut self) {
        self.flow.resume();
    }

    fn close(&mut self) {
        self.flow = Flow::Closed;
    }
}

impl<W, L, R> LineEditor<W, L, Source<R>>
where
    W: embedded_io::Write,
    L: Listener,
    R: embedded_io::Read,
{
    /// Read once from the source and process what arrived. End of
    /// input and read failures are reported to the listener and close
    /// the editor. A paused source is not read.
    ///
    /// Returns whether the editor is still readable.
    pub fn pump(&mut self) -> Result<bool, EvlineError> {
        if !self.is_readable() {
            return Ok(false);
        }

        if self.upstream().is_paused() {
            return Ok(true);
        }

        let mut buf = [0; READ_CHUNK];

        match self.upstream_mut().input.read(&mut buf) {
            Ok(0) => {
                self.upstream_mut().flow = Flow::Ended;
                self.end()?;
            }
            Ok(n) => self.feed(&buf[..n])?,
            Err(e) => self.error(EvlineError::ReadError(e.kind())),
        }

        Ok(self.is_readable())
    }
}

/// [`embedded_io`] adapters for the standard streams
mod std_io {
    use std::io::{Read, Write};

    /// Wrapper for [`std::io::Stdin`]
    pub struct StdinWrapper(std::io::Stdin);

    impl StdinWrapper {
        pub fn new() -> Self {
            Self(std::io::stdin())
        }
    }

    impl Default for StdinWrapper {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdinWrapper {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for StdinWrapper {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.0.lock().read(buf).map_err(|e| e.kind().into())
        }
    }

    /// Wrapper for [`std::io::Stdout`]
    pub struct StdoutWrapper(std::io::Stdout);

    impl StdoutWrapper {
        pub fn new() -> Self {
            Self(std::io::stdout())
        }
    }

    impl Default for StdoutWrapper {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdoutWrapper {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Write for StdoutWrapper {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.write(buf).map_err(|e| e.kind().into())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.0.flush().map_err(|e| e.kind().into())
        }
    }
}

pub use std_io::{StdinWrapper, StdoutWrapper};
