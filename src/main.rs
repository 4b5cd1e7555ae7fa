mod input;
mod report;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use input::{TimeZoneArg, parse_hex_message, read_message_lines};
use report::StatusReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Decode MySentry pump status messages from hex.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Hex-encoded 36-byte message bodies.
    messages: Vec<String>,
    /// Read messages from a file, one per line ("-" for stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Time zone of the pump clock: local, utc, or an offset like +02:00.
    #[arg(long, default_value_t = TimeZoneArg::Local)]
    timezone: TimeZoneArg,
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

/// Log to stderr (stdout carries decoded output) and optionally to a file.
fn setup_logging(log_file: Option<&Path>, verbosity: &Verbosity<InfoLevel>) -> Result<Option<WorkerGuard>> {
    let (file_writer, guard) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file at: {:?}", path))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false).without_time())
        .with(file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false)))
        .init();

    Ok(guard)
}

fn collect_messages(cli: &Cli) -> Result<Vec<String>> {
    let mut messages = cli.messages.clone();
    match &cli.input {
        Some(path) if path.as_os_str() == "-" => {
            messages.extend(read_message_lines(io::stdin().lock())?);
        }
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open input file {:?}", path))?;
            messages.extend(read_message_lines(BufReader::new(file))?);
        }
        None if messages.is_empty() => {
            messages.extend(read_message_lines(io::stdin().lock())?);
        }
        None => {}
    }
    Ok(messages)
}

/// Decode and print every message; returns the number that failed.
fn run(cli: &Cli) -> Result<usize> {
    let messages = collect_messages(cli)?;
    info!(count = messages.len(), timezone = %cli.timezone, "Decoding messages");

    let mut failures = 0;
    for (index, message) in messages.iter().enumerate() {
        let bytes = match parse_hex_message(message) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(index, "{:#}", e);
                failures += 1;
                continue;
            }
        };

        let status = match cli.timezone.decode(&bytes) {
            Ok(status) => status,
            Err(e) => {
                error!(index, raw = %hex::encode(&bytes), "Failed to decode message: {}", e);
                failures += 1;
                continue;
            }
        };

        match cli.format {
            OutputFormat::Text => println!("{status}"),
            OutputFormat::Json => {
                let line = serde_json::to_string(&StatusReport::from(&status))
                    .context("Failed to serialize status report")?;
                println!("{line}");
            }
        }
    }

    Ok(failures)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let guard = setup_logging(cli.log_file.as_deref(), &cli.verbose)?;

    let failed = match run(&cli) {
        Ok(0) => false,
        Ok(failures) => {
            error!(failures, "Some messages could not be decoded");
            true
        }
        Err(e) => {
            error!("Decoding failed: {:?}", e);
            true
        }
    };

    // flush the log file before exiting
    drop(guard);
    if failed {
        process::exit(1);
    }
    Ok(())
}
