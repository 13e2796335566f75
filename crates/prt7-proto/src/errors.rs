//! Reasons a record is refused by the parser.

use thiserror::Error;

/// Why a text record did not produce a [`crate::Frame`].
///
/// Rejections are a normal outcome, not a failure: the receiver drops the
/// record and continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The record was empty.
    #[error("empty record")]
    Empty,

    /// The record is shorter than `<kind>,<payload>`.
    #[error("record too short ({len} chars, need at least 3)")]
    TooShort {
        /// Length of the record in characters.
        len: usize,
    },

    /// The second character is not the `,` separator.
    #[error("expected ',' after frame kind, found {found:?}")]
    MissingSeparator {
        /// The character found where the separator belongs.
        found: char,
    },

    /// The first character is not a known frame kind.
    #[error("unknown frame kind {kind:?}")]
    UnknownKind {
        /// The unrecognized kind character.
        kind: char,
    },
}
