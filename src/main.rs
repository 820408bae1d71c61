use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use alf::config::{Config, OutputMode};
use alf::render::{parse_columns, Renderer};
use alf::{LogFile, ValueErrorPolicy};

#[derive(Parser)]
#[command(name = "alf", about = "Parse Apache access logs with a LogFormat string")]
struct Cli {
    /// LogFormat string, or a nickname such as `common` or `combined`.
    #[arg(short, long, default_value = "common")]
    format: String,

    /// Comma-separated attributes to print (`clientIP,lastStatus,reqHeader:Referer`).
    #[arg(short, long)]
    select: Option<String>,

    /// Output mode; defaults to the config file's `[output] mode`.
    #[arg(short, long, value_parser = ["json", "tsv"])]
    output: Option<String>,

    /// What to do with undecodable values: default, skip-line or abort.
    #[arg(long)]
    on_value_error: Option<ValueErrorPolicy>,

    /// Read configuration from this file instead of `~/.config/alf/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,

    /// Log file to parse; stdin when omitted.
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to built-in config");
            Config::defaults()
        }),
    };

    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let format = config.resolve_format(&cli.format).to_string();
    let policy = cli.on_value_error.unwrap_or(config.extract.on_value_error);
    let mode = match cli.output.as_deref() {
        Some("tsv") => OutputMode::Tsv,
        Some(_) => OutputMode::Json,
        None => config.output.mode,
    };
    let columns = match &cli.select {
        Some(list) => parse_columns(list)?,
        None => Vec::new(),
    };
    if mode == OutputMode::Tsv && columns.is_empty() {
        anyhow::bail!("--output tsv needs --select");
    }

    tracing::info!(%format, ?policy, "parsing log");
    let log = LogFile::new(text, format).with_policy(policy);
    let renderer = Renderer::new(mode, columns, config.output.timestamp_format.clone());

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    if let Some(header) = renderer.header() {
        writeln!(out, "{header}")?;
    }
    for record in log.records()? {
        writeln!(out, "{}", renderer.render(record)?)?;
    }
    out.flush()?;
    Ok(())
}
