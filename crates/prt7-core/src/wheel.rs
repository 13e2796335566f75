//! Rotating substitution wheel.
//!
//! The wheel is the cyclic alphabet `A..Z` followed by a space, plus a
//! rotation offset marking the current zero position:
//!
//! ```text
//!             offset
//!               │
//!   … X Y Z ␠ [ A ] B C D …   (cyclic, 27 symbols)
//! ```
//!
//! Rotation composes modulo 27: `rotate(a); rotate(b)` leaves the wheel where
//! `rotate(a + b)` would.

use tracing::trace;

/// Number of symbols on the wheel.
pub const ALPHABET_LEN: usize = 27;

/// Canonical symbol order, `A..Z` then space.
pub const ALPHABET: [char; ALPHABET_LEN] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ',
];

/// Cipher wheel state for one decoding session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CipherWheel {
    /// Index into [`ALPHABET`] of the current zero position, always `< 27`.
    offset: usize,
}

impl CipherWheel {
    /// Create a wheel at offset zero.
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Current rotation offset in `[0, 27)`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Symbol sitting at the current zero position.
    pub fn head(&self) -> char {
        self.symbol_at(0)
    }

    /// Advance the zero position by `steps`. Negative values move backward.
    ///
    /// Total for every `i32`; only `steps mod 27` matters.
    pub fn rotate(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }

        let delta = steps.rem_euclid(ALPHABET_LEN as i32) as usize;
        self.offset = (self.offset + delta) % ALPHABET_LEN;

        trace!(steps, offset = self.offset, head = %self.head(), "wheel rotated");
    }

    /// Map an input symbol through the wheel.
    ///
    /// Scans forward from the zero position to find `input`, then walks the
    /// same number of steps from the zero position again and returns that
    /// symbol. Both walks share a starting point, so every alphabet symbol
    /// maps to itself at any offset. Symbols outside the alphabet pass
    /// through unchanged.
    pub fn map_symbol(&self, input: char) -> char {
        let Some(steps) = (0..ALPHABET_LEN).find(|&step| self.symbol_at(step) == input) else {
            return input;
        };

        self.symbol_at(steps)
    }

    fn symbol_at(&self, steps_from_head: usize) -> char {
        ALPHABET[(self.offset + steps_from_head) % ALPHABET_LEN]
    }
}
