// bitseq-compile: Build a sequence detector and save its compiled table.
//
// The file can be loaded back with `bitseq-detect --compiled FILE`, which
// skips construction entirely.
//
// Usage:
//   bitseq-compile [--mealy] [--non-overlapping] [--failure-array] PATTERN -o FILE

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bitseq_cli::DetectorArgs;
use bitseq_fsm::format;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitseq-compile", version, about = "Compile a detector to a binary table")]
struct Cli {
    /// Pattern to detect, e.g. 1011
    pattern: String,

    #[command(flatten)]
    detector: DetectorArgs,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
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
    let bytes = format::write(&detector);
    fs::write(&cli.output, &bytes)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), bytes = bytes.len(), "wrote compiled detector");
    println!("Compiled detector saved as {}", cli.output.display());
    Ok(())
}
