// bitseq-detect: Run a sequence detector over bitstreams.
//
// Builds a detector for PATTERN (or loads a compiled one) and prints the
// detection output for each input stream. Inputs come from the arguments,
// or from stdin (one per line) when none are given. Every input is
// validated before any is simulated.
//
// With no PATTERN, or with -i, every setting is asked for interactively.
// --compiled cannot be combined with the detector construction flags.
//
// Usage:
//   bitseq-detect [OPTIONS] [PATTERN] [INPUT...]
//   bitseq-detect --compiled FILE [INPUT...]
//   bitseq-detect -i
//
// Logging:
//   BITSEQ_LOG=debug bitseq-detect 1011 1101011011

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bitseq_cli::{DetectorArgs, Session};
use bitseq_fsm::{Automaton, BuildOptions, build_with, render, simulate};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitseq-detect", version, about = "Detect a bit pattern in bitstreams")]
struct Cli {
    /// Pattern to detect, e.g. 1011
    pattern: Option<String>,

    /// Input bitstreams; read from stdin (one per line) when omitted
    inputs: Vec<String>,

    #[command(flatten)]
    detector: DetectorArgs,

    /// Load a compiled detector instead of building one; every positional
    /// argument is then an input
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["mealy", "non_overlapping", "failure_array"]
    )]
    compiled: Option<PathBuf>,

    /// Print the transition table before the results
    #[arg(long)]
    table: bool,

    /// List the 1-based positions where detections end
    #[arg(long)]
    positions: bool,

    /// Ask for every setting interactively
    #[arg(short, long)]
    interactive: bool,
}

fn main() {
    let cli = Cli::parse();
    bitseq_cli::init_tracing();

    let result = if cli.interactive || (cli.pattern.is_none() && cli.compiled.is_none()) {
        run_interactive()
    } else {
        run_batch(cli)
    };
    if let Err(e) = result {
        bitseq_cli::fatal(format!("{e:#}"));
    }
}

fn run_batch(cli: Cli) -> anyhow::Result<()> {
    let (detector, texts) = match &cli.compiled {
        Some(path) => {
            let detector = bitseq_cli::load_compiled(path)?;
            let texts: Vec<String> = cli.pattern.iter().cloned().chain(cli.inputs).collect();
            (detector, texts)
        }
        None => {
            let pattern = cli.pattern.as_deref().unwrap_or_default();
            (bitseq_cli::build_detector(pattern, &cli.detector)?, cli.inputs)
        }
    };

    let texts = if texts.is_empty() {
        bitseq_cli::read_lines(io::stdin().lock()).context("failed to read stdin")?
    } else {
        texts
    };
    let inputs = bitseq_cli::parse_inputs(&texts)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.table {
        writeln!(out, "{}", bitseq_cli::table_heading(&detector))?;
        write!(out, "{}", render::table(&detector))?;
        writeln!(out)?;
    }

    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let output = simulate::run(&detector, input);
        bitseq_cli::write_report(&mut out, input, &output, cli.positions)?;
    }
    out.flush()?;
    Ok(())
}

fn run_interactive() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut answers = stdin.lock();
    let session = bitseq_cli::interactive_session(&mut answers, &mut stdout.lock())?;
    let Session {
        convention,
        pattern,
        input,
        overlap,
        save_diagram,
    } = session;

    let detector: Automaton = build_with(&pattern, &BuildOptions::new(convention, overlap));
    let output = simulate::run(&detector, &input);

    let mut out = BufWriter::new(stdout.lock());
    writeln!(out)?;
    writeln!(out, "{}", bitseq_cli::table_heading(&detector))?;
    write!(out, "{}", render::table(&detector))?;
    writeln!(out)?;
    bitseq_cli::write_report(&mut out, &input, &output, false)?;
    out.flush()?;

    bitseq_cli::visualize_step(
        &mut answers,
        &mut out,
        &detector,
        save_diagram,
        Path::new("."),
    )?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compiled_conflicts_with_build_flags() {
        for flag in ["--mealy", "--non-overlapping", "--failure-array"] {
            let err = Cli::try_parse_from(["bitseq-detect", "--compiled", "d.bsqd", flag, "101"])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{flag}");
        }
    }

    #[test]
    fn compiled_takes_positionals_as_inputs() {
        let cli = Cli::try_parse_from(["bitseq-detect", "--compiled", "d.bsqd", "101", "11"]).unwrap();
        assert_eq!(cli.compiled, Some(PathBuf::from("d.bsqd")));
        assert_eq!(cli.pattern.as_deref(), Some("101"));
        assert_eq!(cli.inputs, vec!["11"]);
    }
}
