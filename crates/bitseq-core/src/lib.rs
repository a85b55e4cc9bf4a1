//! Shared types for bitseq sequence detectors.
//!
//! This crate is the validation boundary: text only becomes a [`Pattern`] or
//! a [`BitString`] after it has been checked to be non-empty and binary.
//! Everything downstream (construction, simulation, rendering) accepts these
//! types and never re-validates.
//!
//! - [`bit`] -- the two-symbol alphabet
//! - [`bits`] -- validated bit sequences and patterns
//! - [`enums`] -- output convention and occurrence semantics

pub mod bit;
pub mod bits;
pub mod enums;

pub use bit::Bit;
pub use bits::{BitString, Pattern};
pub use enums::{Convention, Overlap, ParseEnumError};

use std::fmt;

use serde::Serialize;

/// Largest pattern length a detector table can address.
///
/// Edge records pack the target state into 31 bits, and the pattern length
/// `n` is itself a state.
pub const MAX_PATTERN_LEN: usize = 0x7FFF_FFFF;

/// Which argument a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The sequence to detect.
    Pattern,
    /// The bitstream fed to the simulator.
    InputStream,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Pattern => f.write_str("pattern"),
            Field::InputStream => f.write_str("input stream"),
        }
    }
}

/// Error type for rejected patterns and input streams.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: Field },
    /// `position` is 1-based and counts characters, not bytes.
    #[error("{field} must contain only 0s and 1s (found {symbol:?} at position {position})")]
    InvalidSymbol {
        field: Field,
        symbol: char,
        position: usize,
    },
    #[error("{field} is too long: {len} symbols (maximum {max})")]
    TooLong { field: Field, len: usize, max: usize },
}

impl ValidationError {
    /// The argument that failed validation.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Empty { field }
            | ValidationError::InvalidSymbol { field, .. }
            | ValidationError::TooLong { field, .. } => *field,
        }
    }
}
