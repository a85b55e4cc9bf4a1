// Detector construction: transition targets for every (state, bit) pair.

use bitseq_core::{Bit, Convention, Overlap, Pattern};
use serde::Serialize;

use crate::failure::{FailureTable, longest_prefix_suffix};
use crate::mealy::MealyDetector;
use crate::moore::MooreDetector;
use crate::{Automaton, State};

/// How fallback transitions are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Rescan `prefix + bit` for every pair. Quadratic in the pattern length.
    #[default]
    Rescan,
    /// Derive fallbacks from a precomputed [`FailureTable`]. Linear.
    FailureArray,
}

/// Options for [`build_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BuildOptions {
    pub convention: Convention,
    pub overlap: Overlap,
    pub strategy: FallbackStrategy,
}

impl BuildOptions {
    pub fn new(convention: Convention, overlap: Overlap) -> Self {
        Self {
            convention,
            overlap,
            strategy: FallbackStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: FallbackStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Build a detector for `pattern` with the default fallback strategy.
pub fn build(pattern: &Pattern, convention: Convention, overlap: Overlap) -> Automaton {
    build_with(pattern, &BuildOptions::new(convention, overlap))
}

/// Build a detector for `pattern`.
///
/// Construction is pure: the same pattern and options always produce the
/// same table.
pub fn build_with(pattern: &Pattern, options: &BuildOptions) -> Automaton {
    let targets = transition_targets(pattern, options.overlap, options.strategy);
    tracing::debug!(convention = %options.convention, "assembling detector");
    match options.convention {
        Convention::Moore => {
            Automaton::Moore(MooreDetector::from_targets(pattern.clone(), options.overlap, &targets))
        }
        Convention::Mealy => {
            Automaton::Mealy(MealyDetector::from_targets(pattern.clone(), options.overlap, &targets))
        }
    }
}

/// Target state of every transition, as `targets[state][bit.index()]`.
///
/// For `i < n` and `bit == pattern[i]` the match extends to `i + 1`; every
/// other pair falls back. Without overlap the accepting state `n` restarts
/// from an empty history.
pub(crate) fn transition_targets(
    pattern: &Pattern,
    overlap: Overlap,
    strategy: FallbackStrategy,
) -> Vec<[State; 2]> {
    let mut targets = match strategy {
        FallbackStrategy::Rescan => rescan_targets(pattern),
        FallbackStrategy::FailureArray => failure_array_targets(pattern),
    };

    if !overlap.is_overlapping() {
        let n = pattern.len();
        let restart = Bit::ALL.map(|bit| longest_prefix_suffix(pattern.bits(), &[bit]));
        targets[n] = restart;
    }

    debug_assert_eq!(targets.len(), pattern.len() + 1);
    tracing::debug!(
        pattern = %pattern,
        states = targets.len(),
        overlap = %overlap,
        strategy = ?strategy,
        "computed transition table"
    );
    targets
}

fn rescan_targets(pattern: &Pattern) -> Vec<[State; 2]> {
    let n = pattern.len();
    let bits = pattern.bits();
    let mut candidate = Vec::with_capacity(n + 1);

    (0..=n)
        .map(|i| {
            Bit::ALL.map(|bit| {
                if pattern.get(i) == Some(bit) {
                    return i + 1;
                }
                candidate.clear();
                candidate.extend_from_slice(pattern.prefix(i));
                candidate.push(bit);
                let target = longest_prefix_suffix(bits, &candidate);
                tracing::trace!(state = i, bit = %bit, next = target, "fallback");
                target
            })
        })
        .collect()
}

fn failure_array_targets(pattern: &Pattern) -> Vec<[State; 2]> {
    let n = pattern.len();
    let failure = FailureTable::new(pattern.bits());
    let mut targets: Vec<[State; 2]> = Vec::with_capacity(n + 1);

    for i in 0..=n {
        let row = Bit::ALL.map(|bit| {
            if pattern.get(i) == Some(bit) {
                i + 1
            } else if i == 0 {
                0
            } else {
                // border(i) < i, so that row is already filled.
                targets[failure.border(i)][bit.index()]
            }
        });
        targets.push(row);
    }
    targets
}
