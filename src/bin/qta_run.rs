//! Run one registered indicator over quotes read from a JSON file.
//!
//! Usage:
//!     qta_run <quotes.json> <indicator> [--param key=value]... [--log-level LEVEL]
//!     qta_run --list
//!
//! Input is `{"open": [..], "high": [..], "low": [..], "close": [..]}` with
//! optional `volume` and `time` arrays; `null` cells read as NaN. The result
//! is written to stdout as a JSON object of field name to array, NaN as
//! `null`. Logs go to stderr.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use qta_core::{FieldAccess, ParamValue, Params, Quotes};
use qta_indicators::registry;

#[derive(Debug, Parser)]
#[command(name = "qta_run", version)]
#[command(about = "Run a technical indicator over OHLCV quotes", long_about = None)]
struct Cli {
    /// Quotes JSON file
    #[arg(required_unless_present = "list")]
    quotes: Option<PathBuf>,

    /// Indicator name, see --list
    #[arg(required_unless_present = "list")]
    indicator: Option<String>,

    /// Indicator parameter; values parse as integer, then float, then string
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, ParamValue)>,

    /// List registered indicators and exit
    #[arg(long)]
    list: bool,

    /// Log filter, e.g. "debug" (default: RUST_LOG, then "warn")
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuotesInput {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Option<Vec<Option<f64>>>,
    #[serde(default)]
    time: Option<Vec<i64>>,
}

fn parse_param(raw: &str) -> std::result::Result<(String, ParamValue), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), ParamValue::parse(value))),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn nan_filled(column: Vec<Option<f64>>) -> Vec<f64> {
    column.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn load_quotes(path: &Path) -> Result<Quotes<f64>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let input: QuotesInput = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse quotes from {}", path.display()))?;

    let mut quotes = Quotes::from_arrays(
        &nan_filled(input.open),
        &nan_filled(input.high),
        &nan_filled(input.low),
        &nan_filled(input.close),
    )?;
    if let Some(volume) = input.volume {
        quotes = quotes.with_volume(&nan_filled(volume))?;
    }
    if let Some(time) = input.time {
        quotes = quotes.with_time(&time)?;
    }
    Ok(quotes)
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

fn list_indicators(out: &mut impl Write) -> Result<()> {
    for entry in registry::entries() {
        writeln!(out, "{:<16} {}", entry.name, entry.description)?;
        writeln!(out, "{:<16} ({})", "", entry.signature)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.list {
        list_indicators(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    let (Some(path), Some(name)) = (cli.quotes, cli.indicator) else {
        bail!("quotes file and indicator name are required");
    };

    let quotes = load_quotes(&path)?;
    info!(bars = quotes.len(), path = %path.display(), "loaded quotes");

    let params: Params = cli.params.into_iter().collect();
    debug!(?params, "parsed parameters");

    let result = registry::call(&name, &quotes, &params)
        .with_context(|| format!("failed to compute '{name}'"))?;

    serde_json::to_writer(&mut out, &result)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
