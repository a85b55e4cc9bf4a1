// bitseq-table: Print the transition table of a sequence detector.
//
// Usage:
//   bitseq-table [--mealy] [--non-overlapping] [--failure-array] [--json] PATTERN
//
// The text form lists one row per state with the next state (and, for
// Mealy detectors, the emitted bit) for inputs 0 and 1. --json prints the
// same table as a structured document.

use std::io::{self, BufWriter, Write};

use bitseq_cli::DetectorArgs;
use bitseq_fsm::render::{self, TableView};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitseq-table", version, about = "Print a detector's transition table")]
struct Cli {
    /// Pattern to detect, e.g. 1011
    pattern: String,

    #[command(flatten)]
    detector: DetectorArgs,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    bitseq_cli::init_tracing();
    if let Err(e) = run(&cli) {
        bitseq_cli::fatal(format!("{e:#}"));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let detector = bitseq_cli::build_detector(&cli.pattern, &cli.detector)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &TableView::new(&detector))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", bitseq_cli::table_heading(&detector))?;
        write!(out, "{}", render::table(&detector))?;
    }
    out.flush()?;
    Ok(())
}
