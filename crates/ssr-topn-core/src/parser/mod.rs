//! Parsers for Top-N responses and query inputs
//!
//! Contains modules for parsing XML documents, result rows, time strings
//! and age classes.

pub mod ageclass;
pub mod rows;
pub mod time;
pub mod xml;

pub use ageclass::parse_ageclass;
pub use rows::{UNKNOWN_SKATER, build_skater_name, extract_rows};
pub use time::parse_time_to_seconds;
pub use xml::{ResultEntry, ResultsDocument, SkaterEntry, parse_results_document};
