//! SpeedSkatingResults Top-N Core Library
//!
//! Builds season-range Top-N lists from the SpeedSkatingResults XML API.
//!
//! # Overview
//!
//! One query walks every (distance, season) pair in order:
//! - HTTP client with linear-backoff retries fetches the season's Top-N page
//! - XML parser and row extractor turn it into timed results
//! - Leaderboard keeps each skater's best time per distance and ranks them
//! - CSV exporter writes the ranked rows
//!
//! A failed season is recorded in the summary and the query moves on; only
//! invalid input aborts a query.
//!
//! # Example
//!
//! ```no_run
//! use ssr_topn_core::{TopnQuery, TopnScraper, Result, to_csv_bytes};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = TopnScraper::new()?;
//!
//!     let report = scraper
//!         .run_query(&TopnQuery {
//!             ageclass: "FA2".to_string(),
//!             distances: vec![500, 1000],
//!             start_season: 2015,
//!             end_season: 2024,
//!             top_n: 15,
//!             per_season_buffer: 5,
//!             country: "FIN".to_string(),
//!         })
//!         .await?;
//!
//!     for (distance, summary) in &report.summary {
//!         println!("{}m: {} unique skaters", distance, summary.unique_skaters);
//!     }
//!
//!     std::fs::write("top.csv", to_csv_bytes(&report.rows)?).ok();
//!     Ok(())
//! }
//! ```

pub mod aggregate;
mod client;
mod error;
pub mod export;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, RetryPolicy, SsrClient, USER_AGENT};

// Re-export error types
pub use error::{Result, TopnError};

// Re-export parser functions
pub use parser::{build_skater_name, extract_rows, parse_ageclass, parse_time_to_seconds};

// Re-export main query API
pub use scraper::{
    DEFAULT_POLITE_DELAY_MS, MAX_PER_SEASON_FETCH, TopnQuery, TopnScraper, clamp_top_n,
};

// Re-export data types
pub use types::{
    ALLOWED_DISTANCES, AgeClass, DedupKey, Gender, MULTI_DISTANCE_TOP_N_CAP, OutputRow,
    QuerySummary, ResultRow, SkaterKey, TopnReport, is_allowed_distance, normalize_name,
};

// Re-export export helpers for convenience
pub use export::{CSV_HEADER, suggested_file_name, to_csv_bytes};

// Re-export URL helper functions for convenience
pub use url::{API_BASE, build_topn_url, normalize_country};
