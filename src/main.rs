use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::info;

use urlfence::config::{self, CliOverrides, Config};
use urlfence::input::InputSource;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("URLFENCE_BUILD_GIT_HASH"),
    " ",
    env!("URLFENCE_BUILD_PROFILE"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "urlfence",
    version = VERSION,
    about = "Extract URLs from text, trimming brackets and quotes around them"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input text file (use `-` for stdin; piped stdin is read when omitted)
    input: Option<PathBuf>,

    /// Report each URL only once
    #[arg(long, global = true)]
    unique: bool,

    /// Only report URLs with an explicit scheme (`https://…`)
    #[arg(long, global = true)]
    scheme_only: bool,

    /// Prefix each URL with its byte span (`start..end<TAB>url`)
    #[arg(long, global = true)]
    indices: bool,

    /// Register an extra enclosure pair (repeatable)
    #[arg(
        long,
        global = true,
        num_args = 2,
        value_names = ["OPEN", "CLOSE"],
        action = ArgAction::Append
    )]
    add_enclosure: Vec<String>,

    /// Unregister an enclosure pair (repeatable; fails if not registered)
    #[arg(
        long,
        global = true,
        num_args = 2,
        value_names = ["OPEN", "CLOSE"],
        action = ArgAction::Append
    )]
    remove_enclosure: Vec<String>,

    /// Log output file path (logs go to stderr via RUST_LOG otherwise)
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the enclosure pairs in effect, one pair per line
    Enclosures,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_path) = &cli.log {
        let file = match std::fs::File::create(log_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: failed to open log file {}: {e}", log_path.display());
                std::process::exit(1);
            }
        };
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    } else {
        env_logger::init();
    }

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Load config file and merge CLI overrides
    let mut cfg = config::load_config()?;
    cfg.merge_cli(CliOverrides {
        unique: cli.unique,
        scheme_only: cli.scheme_only,
        indices: cli.indices,
        add_enclosures: into_pairs(cli.add_enclosure),
        remove_enclosures: into_pairs(cli.remove_enclosure),
    });
    let config = cfg.resolve()?;

    match cli.command {
        Some(Command::Enclosures) => cmd_enclosures(&config),
        None => {
            let source = InputSource::from_arg(cli.input).ok_or_else(|| {
                anyhow::anyhow!("input file required (or pipe via stdin)")
            })?;
            cmd_extract(&source, &config)
        }
    }
}

/// clap hands `num_args = 2` values over flattened; regroup them.
fn into_pairs(values: Vec<String>) -> Vec<(String, String)> {
    let mut values = values.into_iter();
    let mut pairs = Vec::new();
    while let (Some(open), Some(close)) = (values.next(), values.next()) {
        pairs.push((open, close));
    }
    pairs
}

fn cmd_extract(source: &InputSource, config: &Config) -> Result<()> {
    let start = Instant::now();
    let text = source.read_to_string()?;
    let extractor = config.extractor();
    let matches = extractor.find_matches(&text);

    let mut out = BufWriter::new(io::stdout().lock());
    for m in &matches {
        if config.indices {
            writeln!(out, "{}..{}\t{}", m.span.start, m.span.end, m.as_str(&text))?;
        } else {
            writeln!(out, "{}", m.as_str(&text))?;
        }
    }
    out.flush().context("failed to write output")?;

    info!(
        "cmd_extract: {} url(s) from {} ({} bytes) in {:.1}ms",
        matches.len(),
        source.display_name(),
        text.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn cmd_enclosures(config: &Config) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for pair in config.enclosures.iter() {
        writeln!(out, "{pair}")?;
    }
    out.flush().context("failed to write output")?;
    Ok(())
}
