// Validated bit sequences: input streams, output sequences and patterns.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::bit::Bit;
use crate::{Field, MAX_PATTERN_LEN, ValidationError};

/// A finite sequence of bits.
///
/// Values produced by [`BitString::parse`] are guaranteed non-empty.
/// Simulator output is built with [`FromIterator`] and has the same length
/// as its input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitString {
    bits: Vec<Bit>,
}

impl BitString {
    /// Validate `text` as a non-empty string of `0`/`1` characters.
    ///
    /// Nothing is trimmed or skipped: whitespace is an invalid symbol.
    pub fn parse(text: &str, field: Field) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        let bits = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                Bit::from_char(c).ok_or(ValidationError::InvalidSymbol {
                    field,
                    symbol: c,
                    position: i + 1,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }

    pub fn from_bits(bits: Vec<Bit>) -> Self {
        Self { bits }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// 1-based positions of every `1` in the sequence.
    ///
    /// Applied to simulator output these are the end positions of detected
    /// occurrences.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_one())
            .map(|(i, _)| i + 1)
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| b.is_one()).count()
    }
}

impl AsRef<[Bit]> for BitString {
    fn as_ref(&self) -> &[Bit] {
        &self.bits
    }
}

impl FromIterator<Bit> for BitString {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Field::InputStream)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The fixed sequence a detector looks for.
///
/// Always non-empty and at most [`MAX_PATTERN_LEN`] symbols long. A pattern
/// of length `n` yields a detector with `n + 1` states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    bits: BitString,
}

impl Pattern {
    /// Validate `text` as a pattern.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::new(BitString::parse(text, Field::Pattern)?)
    }

    /// Wrap an already-built bit sequence, enforcing the pattern invariants.
    pub fn new(bits: BitString) -> Result<Self, ValidationError> {
        if bits.is_empty() {
            return Err(ValidationError::Empty {
                field: Field::Pattern,
            });
        }
        if bits.len() > MAX_PATTERN_LEN {
            return Err(ValidationError::TooLong {
                field: Field::Pattern,
                len: bits.len(),
                max: MAX_PATTERN_LEN,
            });
        }
        Ok(Self { bits })
    }

    /// Pattern length `n`, which is also the accepting state.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn bits(&self) -> &[Bit] {
        self.bits.as_slice()
    }

    /// Symbol at `index`, if `index < n`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits.as_slice().get(index).copied()
    }

    /// The first `len` symbols (clamped to `n`).
    #[inline]
    pub fn prefix(&self, len: usize) -> &[Bit] {
        let bits = self.bits.as_slice();
        &bits[..len.min(bits.len())]
    }

    pub fn as_bit_string(&self) -> &BitString {
        &self.bits
    }
}

impl FromStr for Pattern {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bits.fmt(f)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_stream() {
        let s = BitString::parse("10110", Field::InputStream).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(
            s.as_slice(),
            &[Bit::One, Bit::Zero, Bit::One, Bit::One, Bit::Zero]
        );
        assert_eq!(s.to_string(), "10110");
    }

    #[test]
    fn reject_empty_stream() {
        let err = BitString::parse("", Field::InputStream).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: Field::InputStream
            }
        );
    }

    #[test]
    fn reject_non_binary_symbol() {
        let err = BitString::parse("1021", Field::InputStream).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidSymbol {
                field: Field::InputStream,
                symbol: '2',
                position: 3,
            }
        );
    }

    #[test]
    fn whitespace_is_not_skipped() {
        assert!(matches!(
            BitString::parse("10 1", Field::InputStream),
            Err(ValidationError::InvalidSymbol { symbol: ' ', .. })
        ));
    }

    #[test]
    fn position_counts_chars_not_bytes() {
        let err = BitString::parse("1ä0", Field::InputStream).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidSymbol {
                symbol: 'ä',
                position: 2,
                ..
            }
        ));
    }

    #[test]
    fn ones_are_one_based() {
        let s: BitString = "00101".parse().unwrap();
        assert_eq!(s.ones().collect::<Vec<_>>(), vec![3, 5]);
        assert_eq!(s.count_ones(), 2);
    }

    #[test]
    fn collect_from_bits() {
        let s: BitString = [Bit::Zero, Bit::One].into_iter().collect();
        assert_eq!(s.to_string(), "01");
        assert!(BitString::default().is_empty());
    }

    #[test]
    fn pattern_parse_and_prefix() {
        let p = Pattern::parse("1011").unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.get(1), Some(Bit::Zero));
        assert_eq!(p.get(4), None);
        assert_eq!(p.prefix(2), &[Bit::One, Bit::Zero]);
        assert_eq!(p.prefix(10).len(), 4);
        assert!(p.prefix(0).is_empty());
    }

    #[test]
    fn pattern_errors_name_the_pattern() {
        assert_eq!(
            Pattern::parse("").unwrap_err(),
            ValidationError::Empty {
                field: Field::Pattern
            }
        );
        assert_eq!(Pattern::parse("1a").unwrap_err().field(), Field::Pattern);
        assert!(Pattern::new(BitString::default()).is_err());
    }

    #[test]
    fn serialize_as_text() {
        let p = Pattern::parse("101").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"101\"");
    }
}
