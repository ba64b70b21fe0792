//! Async input
//!
//! Same as [`crate::sync_io`], for readers implementing
//! [`embedded_io_async::Read`].

use embedded_io::Error as _;

use crate::core::LineEditor;
use crate::error::EvlineError;
use crate::events::Listener;
use crate::source::{Flow, Upstream};

const READ_CHUNK: usize = 64;

/// Upstream reading asynchronously from `R`
pub struct AsyncSource<R>
where
    R: embedded_io_async::Read,
{
    input: R,
    flow: Flow,
}

impl<R> AsyncSource<R>
where
    R: embedded_io_async::Read,
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

    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<R> Upstream for AsyncSource<R>
where
    R: embedded_io_async::Read,
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

impl<W, L, R> LineEditor<W, L, AsyncSource<R>>
where
    W: embedded_io::Write,
    L: Listener,
    R: embedded_io_async::Read,
{
    /// Await one read from the source and process what arrived. See
    /// [`LineEditor::pump`].
    pub async fn pump_async(&mut self) -> Result<bool, EvlineError> {
        if !self.is_readable() {
            return Ok(false);
        }

        if self.upstream().is_paused() {
            return Ok(true);
        }

        let mut buf = [0; READ_CHUNK];

        match self.upstream_mut().input.read(&mut buf).await {
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
