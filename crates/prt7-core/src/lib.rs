//! PRT-7 decoding core
//!
//! Pure state machine logic for reassembling a hidden message from PRT-7
//! frames, completely decoupled from I/O.
//!
//! # Architecture
//!
//! A decoding session owns exactly one [`CipherWheel`] and one
//! [`MessageAccumulator`]. Frames are applied one at a time, in delivery
//! order, by [`Decoder::apply`]. Each application returns a [`Progress`]
//! value describing what happened; the caller decides how to report it.
//!
//! Nothing here reads from a port, writes to a terminal, or fails. Every
//! operation is total, and malformed records are simply skipped.
//!
//! # Components
//!
//! - [`wheel`]: Rotating 27-symbol cipher wheel
//! - [`accumulator`]: Append-only decoded message
//! - [`decoder`]: Session state and frame application

pub mod accumulator;
pub mod decoder;
pub mod wheel;

pub use accumulator::{Fragments, MessageAccumulator};
pub use decoder::{Decoder, Progress};
pub use wheel::{ALPHABET, ALPHABET_LEN, CipherWheel};
