// bitseq-dot: Render a sequence detector as a Graphviz DOT diagram.
//
// Usage:
//   bitseq-dot [DETECTOR OPTIONS] PATTERN              # DOT to stdout
//   bitseq-dot [DETECTOR OPTIONS] PATTERN -o FILE      # DOT to FILE
//   bitseq-dot [DETECTOR OPTIONS] PATTERN --save       # fsm_<type>_<pattern>_<overlap>.dot
//
// Render with e.g. `dot -Tpng fsm_moore_1011_overlap.dot -o fsm.png`.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use bitseq_cli::DetectorArgs;
use bitseq_fsm::dot;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitseq-dot", version, about = "Render a detector as a DOT diagram")]
struct Cli {
    /// Pattern to detect, e.g. 1011
    pattern: String,

    #[command(flatten)]
    detector: DetectorArgs,

    /// Write the diagram to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write the diagram to the default file name in the current directory
    #[arg(long)]
    save: bool,
}

fn main() {
    let cli = Cli::parse();
    bitseq_cli::init_tracing();
    if let Err(e) = run(cli) {
        bitseq_cli::fatal(format!("{e:#}"));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let detector = bitseq_cli::build_detector(&cli.pattern, &cli.detector)?;
    let source = dot::to_dot(&detector);

    let path = match cli.output {
        Some(path) => Some(path),
        None if cli.save => Some(PathBuf::from(format!(
            "{}.dot",
            dot::default_file_stem(&detector)
        ))),
        None => None,
    };

    match path {
        Some(path) => {
            fs::write(&path, source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote diagram");
            println!("FSM diagram saved as {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(source.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
