//! Binary sequence detector automata.
//!
//! Builds deterministic finite-state machines that flag every occurrence of
//! a fixed bit pattern in an input bitstream, and runs them.
//!
//! # Architecture
//!
//! - [`failure`] -- Fallback computation (rescanning and prefix-function engines)
//! - [`transition`] -- Packed per-state transition records
//! - [`builder`] -- Table construction for both output conventions
//! - [`moore`] -- State-output detector
//! - [`mealy`] -- Transition-output detector
//! - [`simulate`] -- Single-pass simulation and streaming cursor
//! - [`format`] -- Compiled table encoding and decoding
//! - [`render`] -- Text table and serializable snapshot
//! - [`dot`] -- Graphviz diagram output
//!
//! A detector for a pattern of length `n` has states `0..=n`. State `i`
//! means the longest suffix of the consumed input that is also a prefix of
//! the pattern has length `i`; state `n` is a completed match.

pub mod builder;
pub mod dot;
pub mod failure;
pub mod format;
pub mod mealy;
pub mod moore;
pub mod render;
pub mod simulate;
pub mod transition;

pub use builder::{BuildOptions, FallbackStrategy, build, build_with};
pub use mealy::MealyDetector;
pub use moore::MooreDetector;

use bitseq_core::{Bit, BitString, Convention, Overlap, Pattern, ValidationError};

use crate::transition::StateRecord;

/// State index: length of the current partial match.
pub type State = usize;

/// Error type for compiled table decoding.
#[derive(Debug, thiserror::Error)]
pub enum FsmError {
    #[error("invalid magic number in compiled table header")]
    InvalidMagic,
    #[error("data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("unsupported compiled table version {0}")]
    UnsupportedVersion(u16),
    #[error("invalid flag byte 0x{0:02x}")]
    InvalidFlags(u8),
    #[error("state count {state_count} does not match pattern length {pattern_len}")]
    StateCountMismatch {
        pattern_len: usize,
        state_count: usize,
    },
    #[error("transition from state {state} targets state {target}, beyond the last state {max}")]
    TargetOutOfRange {
        state: State,
        target: State,
        max: State,
    },
    #[error("transition from state {state} on {bit} outputs {found}, expected {expected}")]
    OutputMismatch {
        state: State,
        bit: Bit,
        found: Bit,
        expected: Bit,
    },
    #[error("{0} unexpected trailing bytes after transition table")]
    TrailingBytes(usize),
    #[error("invalid pattern in compiled table: {0}")]
    InvalidPattern(#[from] ValidationError),
}

/// Read access to a built detector, shared by both output conventions.
///
/// Detectors are immutable once built; simulation and rendering only read
/// through this trait.
pub trait Detector {
    fn pattern(&self) -> &Pattern;

    fn convention(&self) -> Convention;

    fn overlap(&self) -> Overlap;

    /// One record per state, indexed by state.
    fn records(&self) -> &[StateRecord];

    /// Take the transition for `bit` out of `state`.
    ///
    /// Returns the destination state and the emitted output symbol: the
    /// destination's output for Moore detectors, the transition's own output
    /// for Mealy detectors.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not a state of this detector.
    fn step(&self, state: State, bit: Bit) -> (State, Bit);

    /// Output attached to `state`, for detectors that label states.
    fn state_output(&self, state: State) -> Option<Bit>;

    /// Number of states, `n + 1`.
    #[inline]
    fn state_count(&self) -> usize {
        self.records().len()
    }

    /// The state reached after a complete match, `n`.
    #[inline]
    fn accepting_state(&self) -> State {
        self.pattern().len()
    }

    #[inline]
    fn next_state(&self, state: State, bit: Bit) -> State {
        self.records()[state].target(bit)
    }
}

/// A detector of either convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Automaton {
    Moore(MooreDetector),
    Mealy(MealyDetector),
}

impl Automaton {
    /// Run the detector over `input` from the initial state.
    pub fn run(&self, input: &BitString) -> BitString {
        simulate::run(self, input)
    }

    fn inner(&self) -> &dyn Detector {
        match self {
            Automaton::Moore(d) => d,
            Automaton::Mealy(d) => d,
        }
    }
}

impl Detector for Automaton {
    fn pattern(&self) -> &Pattern {
        self.inner().pattern()
    }

    fn convention(&self) -> Convention {
        match self {
            Automaton::Moore(_) => Convention::Moore,
            Automaton::Mealy(_) => Convention::Mealy,
        }
    }

    fn overlap(&self) -> Overlap {
        self.inner().overlap()
    }

    fn records(&self) -> &[StateRecord] {
        self.inner().records()
    }

    #[inline]
    fn step(&self, state: State, bit: Bit) -> (State, Bit) {
        match self {
            Automaton::Moore(d) => d.step(state, bit),
            Automaton::Mealy(d) => d.step(state, bit),
        }
    }

    fn state_output(&self, state: State) -> Option<Bit> {
        self.inner().state_output(state)
    }
}

impl From<MooreDetector> for Automaton {
    fn from(d: MooreDetector) -> Self {
        Automaton::Moore(d)
    }
}

impl From<MealyDetector> for Automaton {
    fn from(d: MealyDetector) -> Self {
        Automaton::Mealy(d)
    }
}
