// State-output (Moore) detector.

use bitseq_core::{Bit, Convention, Overlap, Pattern};

use crate::builder::{self, FallbackStrategy};
use crate::transition::StateRecord;
use crate::{Detector, State};

/// Detector whose output is a function of the state alone.
///
/// The accepting state `n` outputs 1, every other state outputs 0; each
/// input bit emits the output of the state it leads to.
#[derive(Clone, PartialEq, Eq)]
pub struct MooreDetector {
    pattern: Pattern,
    overlap: Overlap,
    /// Transition records, output flags always clear.
    records: Vec<StateRecord>,
    /// Output of each state.
    outputs: Vec<Bit>,
}

impl std::fmt::Debug for MooreDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MooreDetector")
            .field("pattern", &format_args!("{}", self.pattern))
            .field("overlap", &self.overlap)
            .field("state_count", &self.records.len())
            .finish()
    }
}

impl MooreDetector {
    /// Build with the default fallback strategy.
    pub fn build(pattern: &Pattern, overlap: Overlap) -> Self {
        let targets = builder::transition_targets(pattern, overlap, FallbackStrategy::default());
        Self::from_targets(pattern.clone(), overlap, &targets)
    }

    pub(crate) fn from_targets(pattern: Pattern, overlap: Overlap, targets: &[[State; 2]]) -> Self {
        let records = targets
            .iter()
            .map(|&[t0, t1]| StateRecord::new([(t0, Bit::Zero), (t1, Bit::Zero)]))
            .collect();
        Self::from_records(pattern, overlap, records)
    }

    /// Assemble a detector from records whose targets are already known to
    /// be in range. Edge output flags are ignored.
    pub(crate) fn from_records(pattern: Pattern, overlap: Overlap, records: Vec<StateRecord>) -> Self {
        let n = pattern.len();
        debug_assert_eq!(records.len(), n + 1);
        let records = records.into_iter().map(StateRecord::without_outputs).collect();
        let outputs = (0..=n).map(|state| Bit::from(state == n)).collect();
        Self {
            pattern,
            overlap,
            records,
            outputs,
        }
    }

    /// Output of every state, indexed by state.
    pub fn outputs(&self) -> &[Bit] {
        &self.outputs
    }
}

impl Detector for MooreDetector {
    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn convention(&self) -> Convention {
        Convention::Moore
    }

    fn overlap(&self) -> Overlap {
        self.overlap
    }

    fn records(&self) -> &[StateRecord] {
        &self.records
    }

    #[inline]
    fn step(&self, state: State, bit: Bit) -> (State, Bit) {
        let next = self.records[state].target(bit);
        (next, self.outputs[next])
    }

    fn state_output(&self, state: State) -> Option<Bit> {
        self.outputs.get(state).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(p: &str, overlap: Overlap) -> MooreDetector {
        MooreDetector::build(&Pattern::parse(p).unwrap(), overlap)
    }

    #[test]
    fn only_accepting_state_outputs_one() {
        let d = detector("1011", Overlap::Overlapping);
        assert_eq!(
            d.outputs(),
            &[Bit::Zero, Bit::Zero, Bit::Zero, Bit::Zero, Bit::One]
        );
        assert_eq!(d.state_output(4), Some(Bit::One));
        assert_eq!(d.state_output(5), None);
    }

    #[test]
    fn edges_carry_no_output() {
        let d = detector("11", Overlap::Overlapping);
        for record in d.records() {
            for bit in Bit::ALL {
                assert_eq!(record.output(bit), Bit::Zero);
            }
        }
    }

    #[test]
    fn step_emits_destination_output() {
        let d = detector("11", Overlap::Overlapping);
        assert_eq!(d.step(0, Bit::One), (1, Bit::Zero));
        assert_eq!(d.step(1, Bit::One), (2, Bit::One));
        // Overlap: a third 1 completes another match.
        assert_eq!(d.step(2, Bit::One), (2, Bit::One));
        assert_eq!(d.step(2, Bit::Zero), (0, Bit::Zero));
    }

    #[test]
    fn non_overlapping_restarts() {
        let d = detector("11", Overlap::NonOverlapping);
        assert_eq!(d.step(2, Bit::One), (1, Bit::Zero));
        assert_eq!(d.step(2, Bit::Zero), (0, Bit::Zero));
    }

    #[test]
    fn debug_is_compact() {
        let d = detector("101", Overlap::Overlapping);
        let dbg = format!("{d:?}");
        assert!(dbg.contains("pattern: 101"));
        assert!(dbg.contains("state_count: 4"));
    }
}
