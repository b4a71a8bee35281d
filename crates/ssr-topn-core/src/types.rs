//! Core data types for the Top-N query pipeline
//!
//! Contains the records flowing from the row extractor through the
//! aggregator to the CSV exporter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Distances (metres) the upstream Top-N endpoint accepts
pub const ALLOWED_DISTANCES: [u32; 7] = [300, 500, 1000, 1500, 3000, 5000, 10000];

/// Top-N ceiling applied by callers when more than one distance is requested
pub const MULTI_DISTANCE_TOP_N_CAP: usize = 15;

/// Returns true if `distance` is in [`ALLOWED_DISTANCES`]
pub fn is_allowed_distance(distance: u32) -> bool {
    ALLOWED_DISTANCES.contains(&distance)
}

/// Competitor gender as encoded in the first letter of an age class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Value of the `gender` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }
}

/// Age class split into gender and age-group token ("FA2" -> Female, "A2")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgeClass {
    pub gender: Gender,
    pub age: String,
}

/// A single parsed result with a resolvable time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Age class code as requested, e.g. "FA2"
    pub age: String,

    /// Distance in metres
    pub distance: u32,

    /// Event date exactly as given upstream
    pub date: String,

    /// Event name
    pub event: String,

    /// Display name built from the skater node
    pub skater_name: String,

    /// Upstream skater id, empty when missing
    pub skater_id: String,

    /// Original time text, e.g. "1.23,45"
    pub time_text: String,

    /// Resolved time in seconds
    pub time_seconds: f64,
}

/// Identity of a skater for deduplication
///
/// Name-based identities are a separate variant so an id can never collide
/// with a normalized name that happens to have the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkaterKey {
    Id(String),
    Name(String),
}

/// Deduplication key: one retained row per (distance, skater)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub distance: u32,
    pub skater: SkaterKey,
}

impl DedupKey {
    /// Builds the key for a row: skater id when present, else normalized name
    pub fn for_row(row: &ResultRow) -> Self {
        let id = row.skater_id.trim();
        let skater = if id.is_empty() {
            SkaterKey::Name(normalize_name(&row.skater_name))
        } else {
            SkaterKey::Id(id.to_string())
        };
        Self {
            distance: row.distance,
            skater,
        }
    }
}

/// Lower-cases and collapses whitespace runs to single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display-ready ranked row
///
/// Field names serialize in PascalCase to match the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputRow {
    /// 1-based rank within the distance
    pub rank: u32,
    pub age: String,
    pub distance: u32,
    pub date: String,
    pub event: String,
    pub skater_name: String,
    pub skater_id: String,
    /// Original time text
    pub time: String,
    /// Resolved time rounded to milliseconds
    pub time_seconds: f64,
}

impl OutputRow {
    pub(crate) fn ranked(rank: u32, row: ResultRow) -> Self {
        Self {
            rank,
            age: row.age,
            distance: row.distance,
            date: row.date,
            event: row.event,
            skater_name: row.skater_name,
            skater_id: row.skater_id,
            time: row.time_text,
            time_seconds: round_millis(row.time_seconds),
        }
    }
}

fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Per-distance bookkeeping for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySummary {
    /// Rows extracted across all seasons, before dedup
    pub raw_rows: usize,

    /// Distinct skaters after dedup
    pub unique_skaters: usize,

    /// Rows written to the output, `min(top_n, unique_skaters)`
    pub written: usize,

    /// One message per failed season fetch
    pub errors: Vec<String>,
}

/// Final result of a Top-N query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopnReport {
    /// Ranked rows ordered by (distance, time)
    pub rows: Vec<OutputRow>,

    /// Summary keyed by distance
    pub summary: BTreeMap<u32, QuerySummary>,
}

impl TopnReport {
    /// True when no rows survived; a valid "no results" outcome
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to one distance, in rank order
    pub fn rows_for(&self, distance: u32) -> impl Iterator<Item = &OutputRow> {
        self.rows.iter().filter(move |r| r.distance == distance)
    }
}
