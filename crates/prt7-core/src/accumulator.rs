//! Append-only store for the decoded message.

use std::fmt;

/// Ordered sequence of decoded characters.
///
/// Never shrinks and never reorders. Its length equals the number of load
/// frames applied in the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageAccumulator {
    chars: Vec<char>,
}

impl MessageAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Append one decoded character.
    pub fn append(&mut self, c: char) {
        self.chars.push(c);
    }

    /// Number of characters decoded so far.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether nothing has been decoded yet.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Full ordered content.
    pub fn snapshot(&self) -> &[char] {
        &self.chars
    }

    /// Message as a plain string.
    pub fn render(&self) -> String {
        self.chars.iter().collect()
    }

    /// Message as bracketed fragments, e.g. `[H][O][L]`.
    pub fn fragments(&self) -> Fragments<'_> {
        Fragments(&self.chars)
    }
}

/// Display adaptor rendering each character in its own brackets.
///
/// An empty message renders as `[]`.
#[derive(Debug, Clone, Copy)]
pub struct Fragments<'a>(pub &'a [char]);

impl fmt::Display for Fragments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("[]");
        }

        for c in self.0 {
            write!(f, "[{c}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let acc = MessageAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.len(), 0);
        assert_eq!(acc.render(), "");
        assert_eq!(acc.fragments().to_string(), "[]");
    }

    #[test]
    fn append_keeps_order() {
        let mut acc = MessageAccumulator::new();
        for c in "HOLA".chars() {
            acc.append(c);
        }

        assert_eq!(acc.len(), 4);
        assert_eq!(acc.snapshot(), &['H', 'O', 'L', 'A']);
        assert_eq!(acc.render(), "HOLA");
    }

    #[test]
    fn snapshot_does_not_consume() {
        let mut acc = MessageAccumulator::new();
        acc.append('A');

        let first = acc.snapshot().to_vec();
        assert_eq!(acc.snapshot(), first.as_slice());

        acc.append('B');
        assert_eq!(acc.snapshot(), &['A', 'B']);
        assert_eq!(first, vec!['A']);
    }

    #[test]
    fn fragments_bracket_each_char() {
        let mut acc = MessageAccumulator::new();
        for c in "HI T".chars() {
            acc.append(c);
        }

        assert_eq!(acc.fragments().to_string(), "[H][I][ ][T]");
    }
}
