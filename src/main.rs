use anyhow::Context;
use artinorm::{run, RunOptions};
use artinorm_core::{Config, Pipeline};
use artinorm_feeds::Framing;
use clap::{Parser, ValueEnum};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artinorm", about = "Normalize forensic artifact records into timeline documents")]
struct Cli {
    /// Read records from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Input line framing.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Path recorded on records that do not carry one.
    #[arg(long)]
    source_path: Option<String>,

    /// Configuration file (defaults to ~/.config/artinorm/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Emit only expanded events for artifacts that have them.
    #[arg(long)]
    no_base: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Prefixed,
}

impl From<Format> for Framing {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Framing::Json,
            Format::Prefixed => Framing::Prefixed,
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.no_base {
        config.output.emit_base = false;
    }
    let pipeline = Pipeline::new(&config).context("building pipeline")?;

    let options = RunOptions {
        framing: cli.format.into(),
        source_path: cli.source_path,
    };
    let stdout = std::io::stdout();
    let output = BufWriter::new(stdout.lock());

    let stats = match &cli.input {
        Some(path) => {
            let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
            run(&pipeline, &options, BufReader::new(file), output)?
        }
        None => run(&pipeline, &options, std::io::stdin().lock(), output)?,
    };

    if stats.skipped > 0 {
        tracing::warn!(skipped = stats.skipped, "some input lines were skipped");
    }
    Ok(())
}
