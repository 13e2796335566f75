//! PRT-7 frames and the record parser.
//!
//! # Record format
//!
//! ```text
//! ┌──────┬───┬──────────────────────────────┐
//! │ kind │ , │ payload                      │
//! └──────┴───┴──────────────────────────────┘
//!    L         one character, or `Space`
//!    M         optionally signed decimal integer
//! ```
//!
//! Records arrive without their line terminator. Anything shorter than three
//! characters, without the separator, or with an unknown kind is rejected.

use std::{fmt, str::FromStr};

use crate::errors::Rejection;

/// Separator between the frame kind and its payload.
pub const SEPARATOR: char = ',';

/// Payload token that stands for a space character in a load frame.
pub const SPACE_TOKEN: &str = "Space";

/// Kind character of a load frame.
pub const LOAD_KIND: char = 'L';

/// Kind character of a map (rotation) frame.
pub const MAP_KIND: char = 'M';

/// Shortest record that can carry a frame (`L,X`).
const MIN_RECORD_LEN: usize = 3;

/// One protocol unit parsed from a single text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Contributes one character to the hidden message.
    Load {
        /// Raw character to decode.
        symbol: char,
    },

    /// Rotates the cipher wheel.
    Map {
        /// Signed rotation delta. Positive moves forward.
        shift: i32,
    },
}

impl Frame {
    /// Parse one record (line terminator already stripped).
    ///
    /// Load payloads starting with `Space` decode to `' '`; otherwise the
    /// first payload character is taken literally and the rest is ignored.
    /// Map payloads are read like C `atoi`: leading whitespace, optional
    /// sign, then digits up to the first non-digit. Missing digits read as
    /// zero and out-of-range values saturate.
    pub fn parse(record: &str) -> Result<Self, Rejection> {
        let mut chars = record.chars();
        let Some(kind) = chars.next() else {
            return Err(Rejection::Empty);
        };

        let len = record.chars().count();
        if len < MIN_RECORD_LEN {
            return Err(Rejection::TooShort { len });
        }

        match chars.next() {
            Some(SEPARATOR) => {},
            Some(found) => return Err(Rejection::MissingSeparator { found }),
            None => return Err(Rejection::TooShort { len }),
        }

        let payload = chars.as_str();
        match kind {
            LOAD_KIND => Ok(Self::Load { symbol: load_symbol(payload)? }),
            MAP_KIND => Ok(Self::Map { shift: parse_shift(payload) }),
            kind => Err(Rejection::UnknownKind { kind }),
        }
    }

    /// Kind character this frame is written with.
    pub fn kind(&self) -> char {
        match self {
            Self::Load { .. } => LOAD_KIND,
            Self::Map { .. } => MAP_KIND,
        }
    }
}

/// Parse a record, discarding the rejection reason.
pub fn parse_record(record: &str) -> Option<Frame> {
    Frame::parse(record).ok()
}

impl FromStr for Frame {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}", self.kind())?;
        match self {
            Self::Load { symbol: ' ' } => f.write_str(SPACE_TOKEN),
            Self::Load { symbol } => write!(f, "{symbol}"),
            Self::Map { shift } => write!(f, "{shift}"),
        }
    }
}

fn load_symbol(payload: &str) -> Result<char, Rejection> {
    if payload.starts_with(SPACE_TOKEN) {
        return Ok(' ');
    }

    // Unreachable for records that passed the length check.
    payload.chars().next().ok_or(Rejection::TooShort { len: 2 })
}

fn parse_shift(payload: &str) -> i32 {
    let text = payload.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    // Cap one past i32::MAX so the negated value can still reach i32::MIN.
    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| (acc * 10 + i64::from(digit - b'0')).min(limit));

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
