//! Row extractor
//!
//! Converts parsed result entries into [`ResultRow`]s for one
//! (age class, distance) fetch.

use crate::parser::time::parse_time_to_seconds;
use crate::parser::xml::{ResultsDocument, SkaterEntry};
use crate::types::ResultRow;

/// Placeholder name for skaters without any name fields
pub const UNKNOWN_SKATER: &str = "(unknown)";

/// Builds a display name for a skater
///
/// Uses given + family name; falls back to the native-script fields when
/// both are blank, then to [`UNKNOWN_SKATER`].
pub fn build_skater_name(skater: &SkaterEntry) -> String {
    let mut given = skater.given_name.trim();
    let mut family = skater.family_name.trim();

    if given.is_empty() && family.is_empty() {
        given = skater.given_native.trim();
        family = skater.family_native.trim();
    }

    let name = [given, family]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        UNKNOWN_SKATER.to_string()
    } else {
        name
    }
}

/// Extracts rows with a resolvable time from a fetched document
///
/// Entries whose time does not parse (DNS, DQ, blanks) are skipped
/// without error.
pub fn extract_rows(document: &ResultsDocument, ageclass: &str, distance: u32) -> Vec<ResultRow> {
    document
        .results
        .iter()
        .filter_map(|entry| {
            let time_seconds = parse_time_to_seconds(&entry.time)?;

            let (skater_id, skater_name) = match &entry.skater {
                Some(skater) => (skater.id.trim().to_string(), build_skater_name(skater)),
                None => (String::new(), UNKNOWN_SKATER.to_string()),
            };

            Some(ResultRow {
                age: ageclass.to_string(),
                distance,
                date: entry.date.trim().to_string(),
                event: entry.event.trim().to_string(),
                skater_name,
                skater_id,
                time_text: entry.time.trim().to_string(),
                time_seconds,
            })
        })
        .collect()
}
