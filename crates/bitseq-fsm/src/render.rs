// Read-only views of a detector for presentation: text table and serde snapshot.

use std::fmt::{self, Write};

use bitseq_core::{Bit, Convention, Overlap, Pattern};
use serde::Serialize;

use crate::{Detector, State};

/// Display label of a state.
pub fn state_label(state: State) -> String {
    format!("S{state}")
}

/// Write one line per state, in state order.
///
/// Moore: `S0 (Output: 0): {'0': S0, '1': S1}`
/// Mealy: `S0: {'0': (S0, 0), '1': (S1, 0)}`
pub fn write_table<D: Detector + ?Sized, W: Write>(detector: &D, out: &mut W) -> fmt::Result {
    for (state, record) in detector.records().iter().enumerate() {
        let [e0, e1] = Bit::ALL.map(|bit| {
            let target = state_label(record.target(bit));
            match detector.convention() {
                Convention::Moore => target,
                Convention::Mealy => format!("({target}, {})", record.output(bit)),
            }
        });
        match detector.state_output(state) {
            Some(output) => writeln!(
                out,
                "{} (Output: {output}): {{'0': {e0}, '1': {e1}}}",
                state_label(state)
            )?,
            None => writeln!(out, "{}: {{'0': {e0}, '1': {e1}}}", state_label(state))?,
        }
    }
    Ok(())
}

/// The text table as a string.
pub fn table<D: Detector + ?Sized>(detector: &D) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_table(detector, &mut out);
    out
}

/// Serializable snapshot of a detector's full table.
#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
    pub pattern: &'a Pattern,
    pub convention: Convention,
    pub overlap: Overlap,
    pub initial_state: State,
    pub accepting_state: State,
    pub states: Vec<StateView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub id: State,
    pub label: String,
    /// Present for Moore detectors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Bit>,
    pub on_zero: EdgeView,
    pub on_one: EdgeView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub target: State,
    /// Present for Mealy detectors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Bit>,
}

impl<'a> TableView<'a> {
    pub fn new<D: Detector + ?Sized>(detector: &'a D) -> Self {
        let mealy = detector.convention() == Convention::Mealy;
        let states = detector
            .records()
            .iter()
            .enumerate()
            .map(|(id, record)| {
                let [on_zero, on_one] = Bit::ALL.map(|bit| EdgeView {
                    target: record.target(bit),
                    output: mealy.then(|| record.output(bit)),
                });
                StateView {
                    id,
                    label: state_label(id),
                    output: detector.state_output(id),
                    on_zero,
                    on_one,
                }
            })
            .collect();

        Self {
            pattern: detector.pattern(),
            convention: detector.convention(),
            overlap: detector.overlap(),
            initial_state: 0,
            accepting_state: detector.accepting_state(),
            states,
        }
    }
}
