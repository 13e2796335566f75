//! Record syntax for the PRT-7 frame protocol.
//!
//! A PRT-7 transmitter sends one frame per text record over a serial line.
//! Records are short ASCII strings with a one-letter kind, a comma, and a
//! payload:
//!
//! ```text
//! L,<X>      load one character (<X> is a literal character or `Space`)
//! M,<N>      rotate the cipher wheel by a signed decimal amount
//! ```
//!
//! This crate only turns records into typed [`Frame`] values and back. It
//! holds no state and performs no I/O. Applying frames lives in `prt7-core`.
//!
//! Malformed records are not errors in the protocol sense: the receiver skips
//! them and keeps going. [`Frame::parse`] still reports *why* a record was
//! refused through [`Rejection`] so drivers can log it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod frame;

pub use errors::Rejection;
pub use frame::{Frame, parse_record};
