use std::collections::VecDeque;
use std::convert::Infallible;

use crossbeam::channel::Receiver;
use embedded_io::{ErrorKind, ErrorType};
use unicode_width::UnicodeWidthChar;

use crate::input::{Action, ControlCharacter, Parser, Token, CSI};

use ControlCharacter::*;

pub mod csi {
    pub const UP: &str = "\x1b[A";
    pub const DOWN: &str = "\x1b[B";
    pub const RIGHT: &str = "\x1b[C";
    pub const LEFT: &str = "\x1b[D";
    pub const HOME: &str = "\x1b[1~";
    pub const INSERT: &str = "\x1b[2~";
    pub const DELETE: &str = "\x1b[3~";
    pub const END: &str = "\x1b[4~";
}

/// Sink keeping every write separately, so tests can count frames
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.writes
            .iter()
            .map(|write| String::from_utf8_lossy(write).into_owned())
            .collect()
    }

    pub fn output(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn take(&mut self) -> Vec<String> {
        let frames = self.frames();

        self.writes.clear();
        frames
    }
}

impl ErrorType for RecordingSink {
    type Error = Infallible;
}

impl embedded_io::Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

pub struct FailingSink(pub ErrorKind);

impl ErrorType for FailingSink {
    type Error = ErrorKind;
}

impl embedded_io::Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
        Err(self.0)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Err(self.0)
    }
}

/// Screen model understanding exactly the bytes the editor may emit.
///
/// Wide characters take two cells, the second one holding `'\0'`.
/// Line feed moves to column zero of a new row.
pub struct MockTerminal {
    parser: Parser,
    screen: Vec<Vec<char>>,
    pub column: usize,
    pub writes: usize,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            screen: vec![Vec::new()],
            column: 0,
            writes: 0,
        }
    }

    fn current_row(&mut self) -> &mut Vec<char> {
        let row = self.screen.len() - 1;

        &mut self.screen[row]
    }

    fn print(&mut self, c: char) {
        let width = c.width().unwrap_or(0);
        let column = self.column;
        let row = self.current_row();

        if width == 0 {
            return;
        }

        if row.len() < column + width {
            row.resize(column + width, ' ');
        }

        row[column] = c;

        if width == 2 {
            row[column + 1] = '\0';
        }

        self.column += width;
    }

    pub fn advance(&mut self, byte: u8) {
        match self.parser.advance(byte) {
            Action::Ignore => (),
            Action::Print(c) => self.print(c),
            Action::Token(Token::Control(CarriageReturn)) => self.column = 0,
            Action::Token(Token::Control(LineFeed)) => {
                self.screen.push(Vec::new());
                self.column = 0;
            }
            Action::Token(Token::Control(CtrlH)) => {
                self.column = self.column.saturating_sub(1);
            }
            Action::Token(Token::Csi(CSI::EL(0))) => {
                let column = self.column;

                self.current_row().truncate(column);
            }
            action => panic!("unexpected output: {:?}", action),
        }
    }

    pub fn line(&self, index: usize) -> String {
        self.screen[index].iter().filter(|&&c| c != '\0').collect()
    }

    pub fn current_line(&self) -> String {
        self.line(self.screen.len() - 1)
    }

    pub fn screen_as_string(&self) -> String {
        (0..self.screen.len())
            .map(|index| self.line(index))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ErrorType for MockTerminal {
    type Error = Infallible;
}

impl embedded_io::Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.writes += 1;

        for &byte in buf {
            self.advance(byte);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Reader replaying chunks, one chunk per read. An exhausted script
/// reads as end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    chunks: VecDeque<Result<Vec<u8>, ErrorKind>>,
    pub reads: usize,
}

impl ScriptedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk(mut self, input: impl AsByteVec) -> Self {
        self.chunks.push_back(Ok(input.as_byte_vec()));
        self
    }

    pub fn fail(mut self, kind: ErrorKind) -> Self {
        self.chunks.push_back(Err(kind));
        self
    }

    fn next_chunk(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        self.reads += 1;

        match self.chunks.pop_front() {
            None => Ok(0),
            Some(Err(kind)) => Err(kind),
            Some(Ok(mut chunk)) => {
                let n = chunk.len().min(buf.len());

                buf[..n].copy_from_slice(&chunk[..n]);

                if n < chunk.len() {
                    self.chunks.push_front(Ok(chunk.split_off(n)));
                }

                Ok(n)
            }
        }
    }
}

impl ErrorType for ScriptedReader {
    type Error = ErrorKind;
}

impl embedded_io::Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.next_chunk(buf)
    }
}

impl embedded_io_async::Read for ScriptedReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        tokio::task::yield_now().await;
        self.next_chunk(buf)
    }
}

/// Blocking reader fed from another thread. `None` or a dropped
/// sender reads as end of input.
pub struct ChannelReader {
    rx: Receiver<Option<u8>>,
    ended: bool,
}

impl ChannelReader {
    pub fn new(rx: Receiver<Option<u8>>) -> Self {
        Self { rx, ended: false }
    }
}

impl ErrorType for ChannelReader {
    type Error = Infallible;
}

impl embedded_io::Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;

        if self.ended {
            return Ok(0);
        }

        if let Ok(Some(byte)) = self.rx.recv() {
            buf[0] = byte;
            n = 1;

            while n < buf.len() {
                match self.rx.try_recv() {
                    Ok(Some(byte)) => {
                        buf[n] = byte;
                        n += 1;
                    }
                    Ok(None) => {
                        self.ended = true;
                        break;
                    }
                    Err(_) => break,
                }
            }
        }

        Ok(n)
    }
}

pub trait AsByteVec {
    fn as_byte_vec(self) -> Vec<u8>;
}

impl AsByteVec for &str {
    fn as_byte_vec(self) -> Vec<u8> {
        self.bytes().collect()
    }
}

impl AsByteVec for ControlCharacter {
    fn as_byte_vec(self) -> Vec<u8> {
        vec![self.into()]
    }
}

impl<const N: usize> AsByteVec for [ControlCharacter; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().map(|c| c.into()).collect()
    }
}

impl<const N: usize> AsByteVec for [&str; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().flat_map(|s| s.bytes()).collect()
    }
}

impl AsByteVec for Vec<u8> {
    fn as_byte_vec(self) -> Vec<u8> {
        self
    }
}
