use anyhow::{Context, Result, anyhow};
use clap::Parser;
use memns_core::global;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

mod log_level;
mod output;
mod shell;

use log_level::LogLevel;
use output::OutputWriter;
use shell::RunOptions;

/// memns - An in-memory hierarchical namespace shell
#[derive(Debug, Parser)]
#[command(name = "memns")]
#[command(about = "Run namespace commands against an in-memory tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Script to run (defaults to MEMNS_SCRIPT env var, then stdin)
    script: Option<PathBuf>,

    /// Emit one JSON object per command
    #[arg(long)]
    json: bool,

    /// Keep executing after a command fails
    #[arg(short, long)]
    keep_going: bool,

    /// Log verbosity
    #[arg(long, short, default_value = "warn", value_enum)]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli);
    debug!("Parsed CLI arguments: {cli:?}");

    // Determine script source: CLI arg > MEMNS_SCRIPT env var > stdin
    let script = cli
        .script
        .clone()
        .or_else(|| std::env::var("MEMNS_SCRIPT").ok().map(PathBuf::from));

    let mut ns = global()
        .lock()
        .map_err(|_| anyhow!("Namespace lock poisoned"))?;
    let mut output = OutputWriter::new(cli.json);

    let failures = match script {
        Some(path) => {
            let reader = open_script(&path)?;
            let options = RunOptions {
                keep_going: cli.keep_going,
                interactive: false,
            };
            shell::run(&mut ns, reader, &mut output, options)?
        }
        None => {
            let interactive = atty::is(atty::Stream::Stdin);
            let options = RunOptions {
                keep_going: cli.keep_going || interactive,
                interactive,
            };
            shell::run(&mut ns, io::stdin().lock(), &mut output, options)?
        }
    };

    if failures > 0 {
        debug!("{failures} command(s) failed");
        std::process::exit(1);
    }

    Ok(())
}

fn open_script(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open script {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn setup_tracing(cli: &Cli) {
    if let Some(level) = cli.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
