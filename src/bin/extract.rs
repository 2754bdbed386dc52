use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn, Level};

use chunkev::{encode_mark, read_textgrid, WordTokenizer, UTT_BOUNDARY};

/// Extract BIO training data from bracket-annotated TextGrid transcripts.
///
/// The token/tag stream is written to standard output; diagnostics go to
/// standard error. A malformed input file is skipped and reported through
/// the exit code.
#[derive(Parser)]
#[command(name = "chunkev-extract", version, about)]
struct Cli {
    /// TextGrid input files
    #[arg(required = true)]
    inputfiles: Vec<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let tokenizer = WordTokenizer;
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut all_ok = true;
    for path in &cli.inputfiles {
        let grid = match read_textgrid(path) {
            Ok(grid) => grid,
            Err(err) => {
                error!("{err}");
                all_ok = false;
                continue;
            }
        };
        for tier in &grid.tiers {
            for interval in &tier.intervals {
                let encoded = encode_mark(&interval.mark, &tokenizer);
                if let Some(err) = encoded.error {
                    warn!("skipping rest of fragment ({err}): {}", interval.mark);
                }
                for token in &encoded.tokens {
                    writeln!(out, "{token}")?;
                }
                if !encoded.tokens.is_empty() {
                    writeln!(out, "{UTT_BOUNDARY}")?;
                }
            }
        }
    }
    out.flush()?;
    Ok(all_ok)
}
