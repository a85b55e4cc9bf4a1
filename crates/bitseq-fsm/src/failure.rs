//! Failure function: where matching falls back to when the next bit does not
//! extend the current partial match.
//!
//! Two interchangeable engines:
//!
//! - [`longest_prefix_suffix`] rescans one candidate from the longest
//!   feasible overlap downward. Called once per `(state, bit)` pair this
//!   makes construction quadratic in the pattern length.
//! - [`FailureTable`] is the classical Knuth-Morris-Pratt prefix function,
//!   computed once per pattern in linear time. The builder derives every
//!   fallback from it in constant time.
//!
//! Both produce identical transition tables.

use bitseq_core::Bit;

/// Length of the longest prefix of `pattern` that is also a suffix of
/// `candidate`.
///
/// Checks every `j` from `min(candidate.len(), pattern.len())` down to 1 and
/// returns the first match, so the longest overlap wins. Returns 0 when no
/// non-empty prefix matches, including for an empty candidate.
pub fn longest_prefix_suffix(pattern: &[Bit], candidate: &[Bit]) -> usize {
    let max = candidate.len().min(pattern.len());
    (1..=max)
        .rev()
        .find(|&j| pattern[..j] == candidate[candidate.len() - j..])
        .unwrap_or(0)
}

/// Precomputed prefix function of a pattern.
///
/// `border(len)` is the length of the longest proper prefix of
/// `pattern[..len]` that is also a suffix of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureTable {
    /// `borders[k]` is the border of the prefix of length `k + 1`.
    borders: Vec<usize>,
}

impl FailureTable {
    pub fn new(pattern: &[Bit]) -> Self {
        let mut borders = vec![0; pattern.len()];
        let mut k = 0;
        for q in 1..pattern.len() {
            while k > 0 && pattern[k] != pattern[q] {
                k = borders[k - 1];
            }
            if pattern[k] == pattern[q] {
                k += 1;
            }
            borders[q] = k;
        }
        Self { borders }
    }

    /// Border of the prefix of length `len`. The empty prefix has border 0.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the pattern length.
    #[inline]
    pub fn border(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.borders[len - 1] }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.borders
    }
}
