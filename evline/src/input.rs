//! Escape tokenizer and key table
//!
//! [`Parser`] turns raw input bytes into [`Action`]s: printable
//! codepoints pass through the [`Utf8Decoder`], while C0 control bytes
//! and escape sequences become discrete [`Token`]s. [`Key::from_token`]
//! is the fixed table mapping tokens to the keys the editor handles.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::trace;

use crate::utf8::{Utf8Byte, Utf8Decoder, Utf8DecoderStatus};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlCharacter {
    NUL = 0x0,
    CtrlA = 0x1,
    CtrlB = 0x2,
    CtrlC = 0x3,
    CtrlD = 0x4,
    CtrlE = 0x5,
    CtrlF = 0x6,
    CtrlG = 0x7,
    CtrlH = 0x8,
    Tab = 0x9,
    LineFeed = 0xA,
    CtrlK = 0xB,
    CtrlL = 0xC,
    CarriageReturn = 0xD,
    CtrlN = 0xE,
    CtrlO = 0xF,
    CtrlP = 0x10,
    CtrlQ = 0x11,
    CtrlR = 0x12,
    CtrlS = 0x13,
    CtrlT = 0x14,
    CtrlU = 0x15,
    CtrlV = 0x16,
    CtrlW = 0x17,
    CtrlX = 0x18,
    CtrlY = 0x19,
    CtrlZ = 0x1A,
    Escape = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    Backspace = 0x7F,
}

/// Control sequences recognized after `ESC [`
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CSI {
    CUU(usize),
    CUD(usize),
    CUF(usize),
    CUB(usize),
    EL(usize),
    Home,
    Insert,
    Delete,
    End,
    Unknown(u8),
}

impl CSI {
    fn new(byte: u8, arg1: Option<usize>) -> Self {
        match byte {
            b'A' => Self::CUU(arg1.unwrap_or(1)),
            b'B' => Self::CUD(arg1.unwrap_or(1)),
            b'C' => Self::CUF(arg1.unwrap_or(1)),
            b'D' => Self::CUB(arg1.unwrap_or(1)),
            b'K' => Self::EL(arg1.unwrap_or(0)),
            b'~' => match arg1 {
                Some(1) => Self::Home,
                Some(2) => Self::Insert,
                Some(3) => Self::Delete,
                Some(4) => Self::End,
                _ => Self::Unknown(byte),
            },
            _ => Self::Unknown(byte),
        }
    }
}

/// A discrete token recognized by the tokenizer
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Token {
    Control(ControlCharacter),
    Escape(u8),
    Csi(CSI),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Action {
    Ignore,
    Print(char),
    InvalidUtf8,
    Token(Token),
}

impl Action {
    fn control_character(byte: u8) -> Self {
        match ControlCharacter::try_from(byte) {
            Ok(c) => Action::Token(Token::Control(c)),
            Err(_) => Action::Ignore,
        }
    }

    fn csi(byte: u8, arg1: Option<usize>) -> Self {
        Action::Token(Token::Csi(CSI::new(byte, arg1)))
    }
}

#[derive(Debug, Eq, PartialEq)]
enum State {
    Ground,
    Utf8Sequence(Utf8Decoder),
    EscapeSequence,
    CSIStart,
    CSIArg1(Option<usize>),
    CSIArg2(Option<usize>),
}

pub struct Parser {
    state: State,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    fn push_digit(value: Option<usize>, byte: u8) -> Option<usize> {
        Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add((byte - b'0') as usize),
        )
    }

    pub fn advance(&mut self, byte: u8) -> Action {
        match &mut self.state {
            State::Ground => match byte {
                0x1b => {
                    self.state = State::EscapeSequence;
                    Action::Ignore
                }
                0x0..=0x1a | 0x1c..=0x1f | 0x7f => Action::control_character(byte),
                0x20..=0x7e | 0x80..=0xff => {
                    let mut decoder = Utf8Decoder::new();

                    match decoder.advance(byte) {
                        Utf8DecoderStatus::Continuation => {
                            self.state = State::Utf8Sequence(decoder);
                            Action::Ignore
                        }
                        Utf8DecoderStatus::Done(c) => Action::Print(c),
                        Utf8DecoderStatus::Error => Action::InvalidUtf8,
                    }
                }
            },
            State::Utf8Sequence(decoder) => match decoder.advance(byte) {
                Utf8DecoderStatus::Continuation => Action::Ignore,
                Utf8DecoderStatus::Done(c) => {
                    self.state = State::Ground;
                    Action::Print(c)
                }
                Utf8DecoderStatus::Error => {
                    self.state = State::Ground;

                    if byte.utf8_is_continuation() {
                        Action::InvalidUtf8
                    } else {
                        // Truncated sequence, the byte that cut it short
                        // starts over from ground.
                        trace!(byte, "dropped truncated utf-8 sequence");
                        self.advance(byte)
                    }
                }
            },
            State::EscapeSequence => {
                if byte == b'[' {
                    self.state = State::CSIStart;
                    Action::Ignore
                } else {
                    self.state = State::Ground;
                    Action::Token(Token::Escape(byte))
                }
            }
            State::CSIStart => match byte {
                b'0'..=b'9' => {
                    self.state = State::CSIArg1(Self::push_digit(None, byte));
                    Action::Ignore
                }
                b';' => {
                    self.state = State::CSIArg2(None);
                    Action::Ignore
                }
                0x40..=0x7e => {
                    self.state = State::Ground;
                    Action::csi(byte, None)
                }
                _ => Action::Ignore,
            },
            State::CSIArg1(value) => match byte {
                b'0'..=b'9' => {
                    *value = Self::push_digit(*value, byte);
                    Action::Ignore
                }
                b';' => {
                    let arg1 = *value;
                    self.state = State::CSIArg2(arg1);
                    Action::Ignore
                }
                0x40..=0x7e => {
                    let arg1 = *value;
                    self.state = State::Ground;
                    Action::csi(byte, arg1)
                }
                _ => Action::Ignore,
            },
            // Only the first argument carries meaning for the keys we
            // recognize, modifiers in the second one are skipped.
            State::CSIArg2(arg1) => match byte {
                b'0'..=b'9' | b';' => Action::Ignore,
                0x40..=0x7e => {
                    let arg1 = *arg1;
                    self.state = State::Ground;
                    Action::csi(byte, arg1)
                }
                _ => Action::Ignore,
            },
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys understood by the editor
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    EndOfTransmission,
    Up,
    Down,
    Right,
    Left,
    Home,
    Insert,
    Delete,
    End,
}

impl Key {
    /// Look up the key bound to `token`. Unbound tokens yield `None`.
    pub fn from_token(token: Token) -> Option<Self> {
        use ControlCharacter::*;

        Some(match token {
            Token::Control(LineFeed | CarriageReturn) => Key::Enter,
            Token::Control(Backspace | CtrlH) => Key::Backspace,
            Token::Control(Tab) => Key::Tab,
            Token::Control(CtrlD) => Key::EndOfTransmission,
            Token::Csi(CSI::CUU(_)) => Key::Up,
            Token::Csi(CSI::CUD(_)) => Key::Down,
            Token::Csi(CSI::CUF(_)) => Key::Right,
            Token::Csi(CSI::CUB(_)) => Key::Left,
            Token::Csi(CSI::Home) => Key::Home,
            Token::Csi(CSI::Insert) => Key::Insert,
            Token::Csi(CSI::Delete) => Key::Delete,
            Token::Csi(CSI::End) => Key::End,
            _ => return None,
        })
    }
}
