//! Codepoint assembler
//!
//! Collects the bytes of one UTF-8 encoded codepoint and yields the
//! complete `char`. Incomplete sequences stay buffered until the
//! remaining continuation bytes arrive.

enum Utf8ByteType {
    SingleByte,
    StartTwoByte,
    StartThreeByte,
    StartFourByte,
    Continuation,
    Invalid,
}

pub(crate) trait Utf8Byte {
    fn utf8_byte_type(&self) -> Utf8ByteType;
    fn utf8_is_continuation(&self) -> bool;
}

impl Utf8Byte for u8 {
    fn utf8_byte_type(&self) -> Utf8ByteType {
        let byte = *self;

        if byte & 0b10000000 == 0 {
            Utf8ByteType::SingleByte
        } else if byte & 0b11000000 == 0b10000000 {
            Utf8ByteType::Continuation
        } else if byte & 0b11100000 == 0b11000000 {
            Utf8ByteType::StartTwoByte
        } else if byte & 0b11110000 == 0b11100000 {
            Utf8ByteType::StartThreeByte
        } else if byte & 0b11111000 == 0b11110000 {
            Utf8ByteType::StartFourByte
        } else {
            Utf8ByteType::Invalid
        }
    }

    fn utf8_is_continuation(&self) -> bool {
        matches!(self.utf8_byte_type(), Utf8ByteType::Continuation)
    }
}

#[derive(Debug, Eq, PartialEq)]
enum Utf8DecoderState {
    New,
    Expecting(usize),
    Done,
}

#[derive(Debug, Eq, PartialEq)]
pub enum Utf8DecoderStatus {
    Continuation,
    Done(char),
    Error,
}

/// Decoder for a single codepoint. Create a new one for every
/// sequence.
#[derive(Debug, Eq, PartialEq)]
pub struct Utf8Decoder {
    state: Utf8DecoderState,
    buf: [u8; 4],
    pos: usize,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self {
            state: Utf8DecoderState::New,
            buf: [0; 4],
            pos: 0,
        }
    }

    fn insert_byte(&mut self, byte: u8) -> Result<(), ()> {
        if self.pos > 0 && !byte.utf8_is_continuation() {
            return Err(());
        }

        self.buf[self.pos] = byte;
        self.pos += 1;

        Ok(())
    }

    // Overlong encodings and surrogates pass the byte type checks, so
    // the finished sequence is validated once more.
    fn finish(&mut self) -> Utf8DecoderStatus {
        self.state = Utf8DecoderState::Done;

        match core::str::from_utf8(&self.buf[..self.pos])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(c) => Utf8DecoderStatus::Done(c),
            None => Utf8DecoderStatus::Error,
        }
    }

    pub fn advance(&mut self, byte: u8) -> Utf8DecoderStatus {
        match self.state {
            Utf8DecoderState::New => {
                if self.insert_byte(byte).is_err() {
                    self.state = Utf8DecoderState::Done;
                    return Utf8DecoderStatus::Error;
                }

                let expecting = match byte.utf8_byte_type() {
                    Utf8ByteType::SingleByte => return self.finish(),
                    Utf8ByteType::StartTwoByte => 1,
                    Utf8ByteType::StartThreeByte => 2,
                    Utf8ByteType::StartFourByte => 3,
                    Utf8ByteType::Continuation | Utf8ByteType::Invalid => {
                        self.state = Utf8DecoderState::Done;
                        return Utf8DecoderStatus::Error;
                    }
                };

                self.state = Utf8DecoderState::Expecting(expecting);
                Utf8DecoderStatus::Continuation
            }
            Utf8DecoderState::Expecting(remaining) => {
                if self.insert_byte(byte).is_err() {
                    self.state = Utf8DecoderState::Done;
                    return Utf8DecoderStatus::Error;
                }

                if remaining == 1 {
                    self.finish()
                } else {
                    self.state = Utf8DecoderState::Expecting(remaining - 1);
                    Utf8DecoderStatus::Continuation
                }
            }
            Utf8DecoderState::Done => Utf8DecoderStatus::Error,
        }
    }
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}
