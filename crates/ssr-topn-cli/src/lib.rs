//! Command-line front end for SpeedSkatingResults Top-N queries
//!
//! Parses arguments, applies caller-side limits (multi-distance Top-N cap,
//! default country), runs the query and renders the report.
//!
//! # Usage
//!
//! ```text
//! ssr-topn --ageclass FA2 --distance 500,1000 --start-season 2015 \
//!     --country FIN --format csv --output top.csv
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, ValueEnum};
use ssr_topn_core::{
    ALLOWED_DISTANCES, ClientConfig, DEFAULT_POLITE_DELAY_MS, MULTI_DISTANCE_TOP_N_CAP, TopnQuery,
    TopnReport, TopnScraper, clamp_top_n, is_allowed_distance, suggested_file_name, to_csv_bytes,
};
use tracing::warn;

/// Country used when the flag is given but empty
pub const DEFAULT_COUNTRY: &str = "FIN";

/// Errors shown per distance in the summary
const MAX_ERRORS_SHOWN: usize = 10;

/// Output format for the ranked rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ssr-topn", version, about = "Season-range Top-N lists from SpeedSkatingResults")]
pub struct Args {
    /// Age class, e.g. FA2 or MB2
    #[arg(short, long, default_value = "FA2")]
    pub ageclass: String,

    /// Distances in metres (repeat or comma separate)
    #[arg(short, long = "distance", value_delimiter = ',', default_value = "500",
          value_parser = parse_distance)]
    pub distances: Vec<u32>,

    /// First season (start year)
    #[arg(long, default_value_t = 2007, value_parser = clap::value_parser!(i32).range(1800..=2100))]
    pub start_season: i32,

    /// Last season (start year), defaults to the current year
    #[arg(long, value_parser = clap::value_parser!(i32).range(1800..=2100))]
    pub end_season: Option<i32>,

    /// Rows per distance (capped at 15 when several distances are requested)
    #[arg(short = 'n', long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub top_n: u16,

    /// Minimum rows fetched per season
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=300))]
    pub buffer: u16,

    /// Country code (FIN, world, or numeric id)
    #[arg(short, long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write rows to this file (`-` for stdout); with no value for csv, a
    /// name is derived from the query
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API endpoint
    #[arg(long, env = "SSR_TOPN_BASE_URL", default_value = ssr_topn_core::API_BASE)]
    pub base_url: String,

    /// Per-attempt request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Attempts per request
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Backoff base in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub backoff_ms: u64,

    /// Pause between requests in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLITE_DELAY_MS)]
    pub delay_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_distance(s: &str) -> std::result::Result<u32, String> {
    let d: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a distance in metres", s))?;
    if is_allowed_distance(d) {
        Ok(d)
    } else {
        Err(format!("{} is not one of {:?}", d, ALLOWED_DISTANCES))
    }
}

impl Args {
    /// Client configuration from the tuning flags
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            max_attempts: self.retries,
            backoff_base_ms: self.backoff_ms,
            ..Default::default()
        }
    }

    /// Country with the empty-input default applied
    pub fn country(&self) -> &str {
        let c = self.country.trim();
        if c.is_empty() { DEFAULT_COUNTRY } else { c }
    }
}

/// Builds the core query, applying the caller-side limits
///
/// Distances are sorted; with more than one distance, Top-N above
/// [`MULTI_DISTANCE_TOP_N_CAP`] is clamped.
pub fn build_query(args: &Args) -> TopnQuery {
    let mut distances = args.distances.clone();
    distances.sort_unstable();
    distances.dedup();

    let requested = usize::from(args.top_n);
    let top_n = clamp_top_n(distances.len(), requested);
    if top_n != requested {
        warn!(
            requested,
            cap = MULTI_DISTANCE_TOP_N_CAP,
            "multi-distance query, Top-N clamped to {}",
            top_n
        );
    }

    TopnQuery {
        ageclass: args.ageclass.trim().to_string(),
        distances,
        start_season: args.start_season,
        end_season: args
            .end_season
            .unwrap_or_else(|| chrono::Local::now().year()),
        top_n,
        per_season_buffer: usize::from(args.buffer),
        country: args.country().to_string(),
    }
}

/// Runs the query described by `args`
pub async fn execute(args: &Args) -> Result<(TopnQuery, TopnReport)> {
    let query = build_query(args);
    let scraper = TopnScraper::with_config(args.client_config())
        .context("failed to build HTTP client")?
        .with_polite_delay(Duration::from_millis(args.delay_ms));

    let report = scraper
        .run_query(&query)
        .await
        .context("invalid query")?;
    Ok((query, report))
}

/// Entry point shared by the binary: run, then render
pub async fn run(args: Args) -> Result<()> {
    let (query, report) = execute(&args).await?;

    let stderr = io::stderr();
    render_summary(&mut stderr.lock(), &report)?;

    if report.is_empty() {
        eprintln!("No results for the given filters.");
    }

    let rendered = render_rows(&report, args.format)?;
    match output_target(&args, &query) {
        Some(path) if path.as_os_str() != "-" => {
            fs::write(&path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} row(s) to {}", report.rows.len(), path.display());
        }
        _ => {
            io::stdout()
                .lock()
                .write_all(&rendered)
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn output_target(args: &Args, query: &TopnQuery) -> Option<PathBuf> {
    match (&args.output, args.format) {
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Csv) => Some(PathBuf::from(suggested_file_name(
            &query.ageclass,
            &query.distances,
            query.start_season,
            query.end_season,
            &query.country,
        ))),
        (None, _) => None,
    }
}

/// Per-distance summary: unique skaters, raw rows, written rows, errors
pub fn render_summary<W: Write>(out: &mut W, report: &TopnReport) -> io::Result<()> {
    for (distance, summary) in &report.summary {
        writeln!(
            out,
            "{}m: {} unique skater(s), {} raw row(s), {} written",
            distance, summary.unique_skaters, summary.raw_rows, summary.written
        )?;
        if !summary.errors.is_empty() {
            writeln!(out, "  {} error(s):", summary.errors.len())?;
            for err in summary.errors.iter().take(MAX_ERRORS_SHOWN) {
                writeln!(out, "  - {}", err)?;
            }
        }
    }
    Ok(())
}

/// Renders rows in the chosen format
pub fn render_rows(report: &TopnReport, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => Ok(to_csv_bytes(&report.rows)?),
        OutputFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(report)?;
            bytes.push(b'\n');
            Ok(bytes)
        }
        OutputFormat::Table => {
            let mut out = Vec::new();
            for row in &report.rows {
                writeln!(
                    out,
                    "{:>4}  {:<4} {:>6}m  {:<10}  {:<32}  {:<40}  {:>9}",
                    row.rank,
                    row.age,
                    row.distance,
                    row.date,
                    row.skater_name,
                    row.event,
                    row.time
                )?;
            }
            Ok(out)
        }
    }
}
