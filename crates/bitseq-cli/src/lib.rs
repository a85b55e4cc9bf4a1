// bitseq-cli: shared utilities for CLI tools.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use bitseq_core::{BitString, Convention, Field, Overlap, Pattern};
use bitseq_fsm::{Automaton, BuildOptions, Detector, FallbackStrategy, build_with, dot, format};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `bitseq_fsm=trace`).
pub const LOG_ENV: &str = "BITSEQ_LOG";

/// Detector construction flags shared by every tool.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorArgs {
    /// Attach outputs to transitions (Mealy) instead of states (Moore)
    #[arg(long)]
    pub mealy: bool,

    /// Restart matching from an empty history after each detection
    #[arg(long)]
    pub non_overlapping: bool,

    /// Derive fallbacks from a precomputed failure array (linear-time build)
    #[arg(long)]
    pub failure_array: bool,
}

impl DetectorArgs {
    pub fn options(&self) -> BuildOptions {
        let convention = if self.mealy {
            Convention::Mealy
        } else {
            Convention::Moore
        };
        let strategy = if self.failure_array {
            FallbackStrategy::FailureArray
        } else {
            FallbackStrategy::Rescan
        };
        BuildOptions::new(convention, Overlap::from_bool(!self.non_overlapping))
            .with_strategy(strategy)
    }
}

/// Install the stderr log subscriber. Defaults to `warn` when
/// `BITSEQ_LOG` is unset or unparsable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Validate `pattern` and build a detector for it.
pub fn build_detector(pattern: &str, args: &DetectorArgs) -> anyhow::Result<Automaton> {
    let pattern = Pattern::parse(pattern)?;
    Ok(build_with(&pattern, &args.options()))
}

/// Load a compiled detector written by `bitseq-compile`.
pub fn load_compiled(path: &Path) -> anyhow::Result<Automaton> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let detector = format::read(&data)
        .with_context(|| format!("failed to load compiled detector {}", path.display()))?;
    tracing::info!(path = %path.display(), pattern = %detector.pattern(), "loaded compiled detector");
    Ok(detector)
}

/// Validate every input stream before any is simulated.
///
/// `texts` are taken as-is; callers trim stdin lines themselves. Inputs are
/// numbered from 1 in the order given, so for stdin the number is the line.
pub fn parse_inputs<S: AsRef<str>>(texts: &[S]) -> anyhow::Result<Vec<BitString>> {
    if texts.is_empty() {
        anyhow::bail!("no input streams");
    }
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            BitString::parse(text.as_ref(), Field::InputStream)
                .with_context(|| format!("input #{} rejected", i + 1))
        })
        .collect()
}

/// Read every line from `reader`, trimmed.
///
/// Blank lines are kept so that validation rejects them and line numbers
/// stay aligned with input numbers.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| l.trim().to_string()))
        .collect()
}

/// Heading printed above a transition table.
pub fn table_heading<D: Detector + ?Sized>(detector: &D) -> String {
    format!(
        "Generated FSM ({}, {}):",
        detector.convention().title(),
        detector.overlap().title()
    )
}

/// Print the detection result for one input stream.
pub fn write_report<W: Write>(
    out: &mut W,
    input: &BitString,
    output: &BitString,
    positions: bool,
) -> io::Result<()> {
    writeln!(out, "Input Stream: {input}")?;
    writeln!(out, "Detection Output: {output}")?;
    if positions {
        let ends: Vec<String> = output.ones().map(|p| p.to_string()).collect();
        if ends.is_empty() {
            writeln!(out, "Matches: none")?;
        } else {
            writeln!(out, "Matches: {}", ends.join(", "))?;
        }
    }
    Ok(())
}

/// Settings gathered by [`interactive_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub convention: Convention,
    pub pattern: Pattern,
    pub input: BitString,
    pub overlap: Overlap,
    pub save_diagram: bool,
}

/// Ask a question and return the trimmed answer.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on stdin"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for every setting, validating each answer as soon as it is given.
///
/// Overlap is on only for an explicit `y`; anything else means
/// non-overlapping.
pub fn interactive_session<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<Session> {
    writeln!(out, "FSM Sequence Detector\n----------------------")?;
    let convention: Convention = prompt(input, out, "Choose FSM type (moore/mealy): ")?.parse()?;
    let pattern = Pattern::parse(&prompt(
        input,
        out,
        "Enter the binary sequence to detect (e.g., 1011): ",
    )?)?;
    let stream = BitString::parse(
        &prompt(input, out, "Enter input bitstream (e.g., 1101011011): ")?,
        Field::InputStream,
    )?;
    let overlap = Overlap::from_bool(prompt(input, out, "Overlapping? (y/n): ")?.eq_ignore_ascii_case("y"));
    let save_diagram = prompt(input, out, "Save FSM diagram? (y/n): ")?.eq_ignore_ascii_case("y");

    Ok(Session {
        convention,
        pattern,
        input: stream,
        overlap,
        save_diagram,
    })
}

/// Ask whether to visualize the detector; on `y` print its DOT source.
///
/// The diagram is written to `dir` only when it is both visualized and
/// `save` was requested. Returns the saved path, if any.
pub fn visualize_step<R: BufRead, W: Write, D: Detector + ?Sized>(
    input: &mut R,
    out: &mut W,
    detector: &D,
    save: bool,
    dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if !prompt(input, out, "Visualize FSM? (y/n): ")?.eq_ignore_ascii_case("y") {
        return Ok(None);
    }
    let source = dot::to_dot(detector);
    write!(out, "{source}")?;
    if !save {
        writeln!(out, "Diagram not saved.")?;
        return Ok(None);
    }
    let path = dir.join(format!("{}.dot", dot::default_file_stem(detector)));
    std::fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(out, "FSM diagram saved as {}", path.display())?;
    Ok(Some(path))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: impl Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
