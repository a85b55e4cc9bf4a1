//! Running detectors over bitstreams.
//!
//! [`run`] consumes a whole validated input in one left-to-right pass.
//! [`Cursor`] does the same one bit at a time, in constant memory, for
//! inputs that arrive incrementally.

use bitseq_core::{Bit, BitString, Field, ValidationError};

use crate::{Detector, State};

/// Incremental simulation state over a borrowed detector.
///
/// Many cursors may share one detector; the detector is never mutated.
#[derive(Debug, Clone)]
pub struct Cursor<'a, D: Detector + ?Sized> {
    detector: &'a D,
    state: State,
    consumed: usize,
}

impl<'a, D: Detector + ?Sized> Cursor<'a, D> {
    /// Start in state 0.
    pub fn new(detector: &'a D) -> Self {
        Self {
            detector,
            state: 0,
            consumed: 0,
        }
    }

    /// Consume one bit and return the emitted output.
    #[inline]
    pub fn feed(&mut self, bit: Bit) -> Bit {
        let (next, output) = self.detector.step(self.state, bit);
        self.state = next;
        self.consumed += 1;
        output
    }

    /// Consume `bits` in order, returning one output per input bit.
    pub fn feed_all(&mut self, bits: &[Bit]) -> BitString {
        bits.iter().map(|&bit| self.feed(bit)).collect()
    }

    /// Current state (length of the live partial match).
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of bits consumed since creation or the last reset.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn detector(&self) -> &'a D {
        self.detector
    }

    /// Return to state 0, forgetting all history.
    pub fn reset(&mut self) {
        self.state = 0;
        self.consumed = 0;
    }
}

/// Run `detector` over `input` from state 0.
///
/// The output has exactly one symbol per input symbol; a 1 marks the
/// position where an occurrence of the pattern ends.
pub fn run<D: Detector + ?Sized>(detector: &D, input: &BitString) -> BitString {
    let mut cursor = Cursor::new(detector);
    let output = cursor.feed_all(input.as_slice());
    tracing::debug!(
        input_len = input.len(),
        detections = output.count_ones(),
        final_state = cursor.state(),
        "simulation finished"
    );
    output
}

/// Validate `text` as an input stream, then run `detector` over it.
///
/// Nothing is simulated when validation fails.
pub fn run_str<D: Detector + ?Sized>(detector: &D, text: &str) -> Result<BitString, ValidationError> {
    let input = BitString::parse(text, Field::InputStream)?;
    Ok(run(detector, &input))
}

/// 1-based end positions of every detected occurrence in `input`.
pub fn detections<D: Detector + ?Sized>(detector: &D, input: &BitString) -> Vec<usize> {
    run(detector, input).ones().collect()
}
