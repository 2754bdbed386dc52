use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use either::Either;
use itertools::Itertools;
use tracing::{error, info, warn, Level};

use chunkev::{
    reference_spans, score_sentence, ClassEval, EvalConfig, EvalConfigBuilder, EvalReport,
    MatchMode, Record, RunAggregate, ServiceTagger, StreamFormatError, TaggedToken, Tagger,
    TaggerConfig, DEFAULT_NERSET,
};

/// Evaluate an external tagging service against reference BIO annotations.
///
/// Reads token/tag streams produced by chunkev-extract, reconstructs the
/// reference entity spans per sentence, obtains predictions for the same
/// sentence text from the tagging service, and prints a macro/micro
/// precision-recall report to standard output. Per-sentence diagnostics go
/// to standard error.
#[derive(Parser)]
#[command(name = "chunkev-eval", version, about)]
struct Cli {
    /// Named-entity set URI handed to the tagging service
    #[arg(short = 's', long, default_value = DEFAULT_NERSET)]
    nerset: String,

    /// Tagging service configuration file (JSON)
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// Loose evaluation: case-insensitive suffix matching instead of exact
    #[arg(long = "notexact")]
    notexact: bool,

    /// Abort the run when the tagging service fails instead of assuming
    /// zero predictions for the sentence
    #[arg(long)]
    fail_on_tagger_error: bool,

    /// Token/tag stream files (`-` reads standard input)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            if err.is::<StreamFormatError>() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
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

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mode = if cli.notexact {
        MatchMode::Loose
    } else {
        MatchMode::Exact
    };
    let config = EvalConfigBuilder::new()
        .mode(mode)
        .nerset(cli.nerset.clone())
        .fail_on_tagger_error(cli.fail_on_tagger_error)
        .build();
    let tagger_config = TaggerConfig::from_file(&cli.config)?;
    let tagger = ServiceTagger::new(&tagger_config, config.nerset.clone())?;

    let mut classes = ClassEval::new();
    let mut aggregate = RunAggregate::new();
    for path in &cli.files {
        let reader = open_input(path)?;
        evaluate_stream(reader, &tagger, &config, &mut classes, &mut aggregate)?;
    }

    let (precision_samples, recall_samples) = aggregate.samples();
    info!(
        "collected {} precision and {} recall samples",
        precision_samples, recall_samples
    );
    print!("{}", EvalReport::new(&aggregate, &classes));
    Ok(())
}

fn open_input(path: &Path) -> anyhow::Result<Either<BufReader<File>, BufReader<io::Stdin>>> {
    if path.as_os_str() == "-" {
        Ok(Either::Right(BufReader::new(io::stdin())))
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Either::Left(BufReader::new(file)))
    }
}

fn evaluate_stream<R: BufRead, T: Tagger>(
    reader: R,
    tagger: &T,
    config: &EvalConfig,
    classes: &mut ClassEval,
    aggregate: &mut RunAggregate,
) -> anyhow::Result<()> {
    let mut sentence: Vec<TaggedToken> = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read input stream")?;
        match Record::parse(&line)? {
            Record::Boundary => {
                flush_sentence(&mut sentence, tagger, config, classes, aggregate)?
            }
            Record::Token(token) => sentence.push(token),
        }
    }
    if !sentence.is_empty() {
        warn!("input ended without an utterance boundary, scoring the trailing sentence");
        flush_sentence(&mut sentence, tagger, config, classes, aggregate)?;
    }
    Ok(())
}

fn flush_sentence<T: Tagger>(
    sentence: &mut Vec<TaggedToken>,
    tagger: &T,
    config: &EvalConfig,
    classes: &mut ClassEval,
    aggregate: &mut RunAggregate,
) -> anyhow::Result<()> {
    if sentence.is_empty() {
        return Ok(());
    }
    let text = sentence.iter().map(|t| t.token.as_str()).join(" ");
    let reference = reference_spans(sentence);
    info!("processing: {}", text);
    info!(
        "reference entities: [{}]",
        reference.iter().map(ToString::to_string).join(", ")
    );
    let predicted = match tagger.tag(&text) {
        Ok(predicted) => predicted,
        Err(err) if config.fail_on_tagger_error => return Err(err.into()),
        Err(err) => {
            warn!("{err}, assuming zero predictions");
            Vec::new()
        }
    };
    info!(
        "predicted entities: [{}]",
        predicted.iter().map(ToString::to_string).join(", ")
    );
    let score = score_sentence(&reference, &predicted, config.mode, classes);
    info!("precision={:?} recall={:?}", score.precision, score.recall);
    aggregate.add(score);
    sentence.clear();
    Ok(())
}
