//! Decoding session and frame application.
//!
//! # Architecture: Progress-Returning State Machine
//!
//! - [`Decoder::apply`] takes a parsed frame and mutates the session
//! - It returns a [`Progress`] describing the effect
//! - The driver renders progress however it likes (terminal, log, test)
//!
//! ```text
//!   record ──parse──> Frame ──apply──> Progress
//!                       │
//!          Load ────────┼──> wheel.map_symbol ──> accumulator.append
//!          Map  ────────┴──> wheel.rotate
//! ```
//!
//! Ordering is load-bearing: both the wheel offset and the message are
//! cumulative, so frames must be applied exactly in delivery order.

use std::fmt;

use prt7_proto::Frame;
use tracing::debug;

use crate::{
    accumulator::{Fragments, MessageAccumulator},
    wheel::CipherWheel,
};

/// Observable effect of applying one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A load frame appended a character.
    Loaded {
        /// Symbol carried by the frame.
        input: char,
        /// Symbol appended after mapping through the wheel.
        decoded: char,
        /// Whole message after the append.
        message: Vec<char>,
    },

    /// A map frame rotated the wheel.
    Rotated {
        /// Signed rotation applied.
        shift: i32,
        /// Wheel offset after rotating.
        offset: usize,
    },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { input, decoded, message } => write!(
                f,
                "Fragment '{input}' decoded as '{decoded}'. Message: {}",
                Fragments(message)
            ),
            Self::Rotated { shift, .. } => write!(f, "ROTATING WHEEL {shift:+}."),
        }
    }
}

/// One decoding session: a single wheel and a single message.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    wheel: CipherWheel,
    message: MessageAccumulator,
}

impl Decoder {
    /// Start a session with the wheel at offset zero and an empty message.
    pub fn new() -> Self {
        Self { wheel: CipherWheel::new(), message: MessageAccumulator::new() }
    }

    /// Current wheel state.
    pub fn wheel(&self) -> &CipherWheel {
        &self.wheel
    }

    /// Message decoded so far.
    pub fn message(&self) -> &MessageAccumulator {
        &self.message
    }

    /// Apply one frame to the session.
    pub fn apply(&mut self, frame: &Frame) -> Progress {
        match *frame {
            Frame::Load { symbol } => {
                let decoded = self.wheel.map_symbol(symbol);
                self.message.append(decoded);
                Progress::Loaded {
                    input: symbol,
                    decoded,
                    message: self.message.snapshot().to_vec(),
                }
            },
            Frame::Map { shift } => {
                self.wheel.rotate(shift);
                Progress::Rotated { shift, offset: self.wheel.offset() }
            },
        }
    }

    /// Parse a record and apply it.
    ///
    /// Returns `None` for rejected records, leaving the session untouched.
    pub fn feed(&mut self, record: &str) -> Option<Progress> {
        match Frame::parse(record) {
            Ok(frame) => Some(self.apply(&frame)),
            Err(reason) => {
                debug!(record, %reason, "record rejected");
                None
            },
        }
    }

    /// End the session and return the assembled message.
    pub fn finish(self) -> String {
        self.message.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_appends_decoded_symbol() {
        let mut decoder = Decoder::new();

        let progress = decoder.apply(&Frame::Load { symbol: 'H' });
        assert_eq!(
            progress,
            Progress::Loaded { input: 'H', decoded: 'H', message: vec!['H'] }
        );
        assert_eq!(decoder.message().len(), 1);
    }

    #[test]
    fn map_rotates_without_touching_message() {
        let mut decoder = Decoder::new();
        decoder.apply(&Frame::Load { symbol: 'A' });

        let progress = decoder.apply(&Frame::Map { shift: -3 });
        assert_eq!(progress, Progress::Rotated { shift: -3, offset: 24 });
        assert_eq!(decoder.wheel().offset(), 24);
        assert_eq!(decoder.message().render(), "A");
    }

    #[test]
    fn feed_skips_rejected_records() {
        let mut decoder = Decoder::new();
        decoder.feed("M,4");
        let wheel_before = decoder.wheel().clone();

        for record in ["", "X", "LY", "Q,1", "L;A"] {
            assert_eq!(decoder.feed(record), None);
        }

        assert_eq!(decoder.wheel(), &wheel_before);
        assert!(decoder.message().is_empty());
    }

    #[test]
    fn feed_malformed_shift_is_zero_rotation() {
        let mut decoder = Decoder::new();

        let progress = decoder.feed("M,abc");
        assert_eq!(progress, Some(Progress::Rotated { shift: 0, offset: 0 }));
        assert_eq!(decoder.wheel().offset(), 0);
    }

    #[test]
    fn feed_space_token_adds_one_space() {
        let mut decoder = Decoder::new();
        decoder.feed("L,A");

        decoder.feed("L,Space");
        assert_eq!(decoder.message().len(), 2);
        assert_eq!(decoder.finish(), "A ");
    }

    #[test]
    fn loaded_report_text() {
        let mut decoder = Decoder::new();
        decoder.feed("L,H");
        decoder.feed("L,O");

        let progress = decoder.feed("L,Space").unwrap();
        insta::assert_snapshot!(progress.to_string(), @"Fragment ' ' decoded as ' '. Message: [H][O][ ]");
    }

    #[test]
    fn rotated_report_text_is_signed() {
        let mut decoder = Decoder::new();

        let forward = decoder.apply(&Frame::Map { shift: 2 });
        insta::assert_snapshot!(forward.to_string(), @"ROTATING WHEEL +2.");

        let backward = decoder.apply(&Frame::Map { shift: -2 });
        insta::assert_snapshot!(backward.to_string(), @"ROTATING WHEEL -2.");

        let zero = decoder.apply(&Frame::Map { shift: 0 });
        insta::assert_snapshot!(zero.to_string(), @"ROTATING WHEEL +0.");
    }
}
