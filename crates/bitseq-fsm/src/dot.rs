//! Graphviz DOT output.
//!
//! Nodes are filled from a fixed pastel palette indexed by state number, so
//! the same detector always renders to the same text.

use std::fmt::{self, Write};

use bitseq_core::{Bit, Convention};

use crate::Detector;
use crate::render::state_label;

const PALETTE: [&str; 20] = [
    "#FFD1DC", "#D1FFD7", "#D1E9FF", "#FFF9D1", "#E6D1FF", "#FFE4E1", "#E1FFE4", "#FFDFD1",
    "#D1FFF4", "#F0D1FF", "#FFF0D1", "#D1DFFF", "#F9D1FF", "#FFEFD1", "#D1FFF8", "#FFD1F9",
    "#E1E1FF", "#FFE9D1", "#E1FFF5", "#F4FFD1",
];

/// Diagram title, e.g. `Moore Overlapping Sequence Detector for sequence: 1011`.
pub fn title<D: Detector + ?Sized>(detector: &D) -> String {
    format!(
        "{} {} Sequence Detector for sequence: {}",
        detector.convention().title(),
        detector.overlap().title(),
        detector.pattern()
    )
}

/// Default output file name without extension,
/// e.g. `fsm_mealy_101_nonoverlap`.
pub fn default_file_stem<D: Detector + ?Sized>(detector: &D) -> String {
    format!(
        "fsm_{}_{}_{}",
        detector.convention().name(),
        detector.pattern(),
        detector.overlap().slug()
    )
}

/// Write the DOT source of `detector` into `out`.
pub fn write_dot<D: Detector + ?Sized, W: Write>(detector: &D, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph fsm {{")?;
    writeln!(out, "    rankdir=LR;")?;
    writeln!(out, "    dpi=300;")?;
    writeln!(out, "    label=\"{}\";", title(detector))?;
    writeln!(out, "    labelloc=t;")?;
    writeln!(out, "    fontsize=20;")?;

    for state in 0..detector.state_count() {
        let name = state_label(state);
        let color = PALETTE[state % PALETTE.len()];
        let (label, shape) = match detector.state_output(state) {
            Some(output) => (
                format!("{name}/{output}"),
                if output.is_one() { "doublecircle" } else { "circle" },
            ),
            None => (name.clone(), "circle"),
        };
        writeln!(
            out,
            "    {name} [label=\"{label}\", shape={shape}, style=filled, fillcolor=\"{color}\"];"
        )?;
    }

    for (state, record) in detector.records().iter().enumerate() {
        for bit in Bit::ALL {
            let label = match detector.convention() {
                Convention::Moore => bit.to_string(),
                Convention::Mealy => format!("{bit}/{}", record.output(bit)),
            };
            writeln!(
                out,
                "    {} -> {} [label=\"{label}\"];",
                state_label(state),
                state_label(record.target(bit))
            )?;
        }
    }

    writeln!(out, "}}")
}

/// DOT source of `detector` as a string.
pub fn to_dot<D: Detector + ?Sized>(detector: &D) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dot(detector, &mut out);
    out
}
