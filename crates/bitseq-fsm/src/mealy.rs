// Transition-output (Mealy) detector.

use bitseq_core::{Bit, Convention, Overlap, Pattern};

use crate::builder::{self, FallbackStrategy};
use crate::transition::StateRecord;
use crate::{Detector, State};

/// Detector whose output is attached to each transition.
///
/// A transition outputs 1 exactly when it lands on the accepting state `n`.
/// That covers the match-extending edge out of state `n - 1` and, with
/// overlapping semantics, any fallback edge out of `n` that completes
/// another occurrence straight away (pattern `11` on a third `1`). The
/// emitted sequence is therefore the same as that of the Moore detector for
/// the same pattern and semantics.
#[derive(Clone, PartialEq, Eq)]
pub struct MealyDetector {
    pattern: Pattern,
    overlap: Overlap,
    records: Vec<StateRecord>,
}

impl std::fmt::Debug for MealyDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MealyDetector")
            .field("pattern", &format_args!("{}", self.pattern))
            .field("overlap", &self.overlap)
            .field("state_count", &self.records.len())
            .finish()
    }
}

impl MealyDetector {
    /// Build with the default fallback strategy.
    pub fn build(pattern: &Pattern, overlap: Overlap) -> Self {
        let targets = builder::transition_targets(pattern, overlap, FallbackStrategy::default());
        Self::from_targets(pattern.clone(), overlap, &targets)
    }

    pub(crate) fn from_targets(pattern: Pattern, overlap: Overlap, targets: &[[State; 2]]) -> Self {
        let n = pattern.len();
        let edge = |target: State| (target, Bit::from(target == n));
        let records = targets
            .iter()
            .map(|&[t0, t1]| StateRecord::new([edge(t0), edge(t1)]))
            .collect();
        Self {
            pattern,
            overlap,
            records,
        }
    }

    /// Assemble a detector from decoded records; targets are already checked.
    pub(crate) fn from_records(pattern: Pattern, overlap: Overlap, records: Vec<StateRecord>) -> Self {
        debug_assert_eq!(records.len(), pattern.len() + 1);
        Self {
            pattern,
            overlap,
            records,
        }
    }
}

impl Detector for MealyDetector {
    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn convention(&self) -> Convention {
        Convention::Mealy
    }

    fn overlap(&self) -> Overlap {
        self.overlap
    }

    fn records(&self) -> &[StateRecord] {
        &self.records
    }

    #[inline]
    fn step(&self, state: State, bit: Bit) -> (State, Bit) {
        let record = &self.records[state];
        (record.target(bit), record.output(bit))
    }

    fn state_output(&self, _state: State) -> Option<Bit> {
        None
    }
}
