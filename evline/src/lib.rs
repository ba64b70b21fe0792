//! Evline is an event driven line editor. It consumes keystrokes one
//! event at a time, keeps a single editable prompt line up to date on
//! any [`embedded_io::Write`] sink and reports committed lines to a
//! listener. The editor itself never blocks or reads, so it fits
//! blocking loops, async tasks and callback driven event loops alike.
//!
//! Features:
//! - IO-free core state machine
//! - UTF-8 input and wide character aware cursor placement
//! - Visible, hidden or masked echo
//! - Line history with a configurable limit
//! - Tab completion through a [`complete::Completer`]
//!
//! Only carriage return, erase-to-end-of-line, text and backspaces are
//! written to the sink. There is no terminal size negotiation and no
//! multi-line editing.
//!
//! Input can be driven in three ways:
//! - [`LineEditor::feed`] with raw bytes from any source
//! - [`LineEditor::pump`] over an [`embedded_io::Read`] wrapped in [`sync_io::Source`]
//! - [`LineEditor::pump_async`] over an [`embedded_io_async::Read`] wrapped in [`async_io::AsyncSource`]
//!
//! Editors are built using [`builder::EditorBuilder`]. Lines and
//! lifecycle events arrive at an [`events::Listener`].
//!
//! # Example
//! ```no_run
//! use evline::{builder::EditorBuilder, events::Event};
//! use evline::sync_io::{StdinWrapper, StdoutWrapper};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//!
//! let mut editor = EditorBuilder::new()
//!     .with_unbounded_history()
//!     .with_recorded_history(true)
//!     .build_sync(StdoutWrapper::new(), tx, StdinWrapper::new())
//!     .unwrap();
//!
//! editor.redraw().unwrap();
//!
//! while editor.pump().unwrap() {
//!     for event in rx.try_iter() {
//!         if let Event::Line(line) = event {
//!             editor.clear().unwrap();
//!             print!("Read: '{}'\r\n", line);
//!             editor.redraw().unwrap();
//!         }
//!     }
//! }
//! ```

pub mod async_io;
pub mod builder;
pub mod complete;
mod core;
pub mod error;
pub mod events;
pub mod history;
pub mod input;
pub mod line_buffer;
pub mod output;
pub mod source;
pub mod sync_io;
mod utf8;

pub use crate::core::{LineEditor, DEFAULT_PROMPT};
pub use crate::error::EvlineError;
pub use crate::output::Echo;

#[cfg(test)]
pub(crate) mod testlib;
