//! CSV export of ranked rows

use crate::error::Result;
use crate::types::OutputRow;

/// Column order of the exported CSV
pub const CSV_HEADER: [&str; 9] = [
    "Rank",
    "Age",
    "Distance",
    "Date",
    "Event",
    "SkaterName",
    "SkaterId",
    "Time",
    "TimeSeconds",
];

/// Serializes rows as UTF-8 CSV, header first, rows in the given order
///
/// An empty slice still produces the header line.
///
/// # Example
/// ```
/// use ssr_topn_core::to_csv_bytes;
/// let bytes = to_csv_bytes(&[]).unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "Rank,Age,Distance,Date,Event,SkaterName,SkaterId,Time,TimeSeconds\n"
/// );
/// ```
pub fn to_csv_bytes(rows: &[OutputRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for row in rows {
        writer.write_record([
            row.rank.to_string(),
            row.age.clone(),
            row.distance.to_string(),
            row.date.clone(),
            row.event.clone(),
            row.skater_name.clone(),
            row.skater_id.clone(),
            row.time.clone(),
            row.time_seconds.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}

/// Suggested file name for an export
///
/// `top_{ageclass}_{d1-d2..}_{first}-{last}_{country}.csv` with distances
/// ascending, the season range normalized and spaces replaced by `_`.
/// An empty country is shown as "FIN".
///
/// # Example
/// ```
/// use ssr_topn_core::export::suggested_file_name;
/// assert_eq!(
///     suggested_file_name("FA2", &[1000, 500], 2023, 2007, "FIN"),
///     "top_FA2_500-1000_2007-2023_FIN.csv"
/// );
/// ```
pub fn suggested_file_name(
    ageclass: &str,
    distances: &[u32],
    start_season: i32,
    end_season: i32,
    country: &str,
) -> String {
    let mut sorted = distances.to_vec();
    sorted.sort_unstable();
    let dist_part = sorted
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("-");
    let country = if country.is_empty() { "FIN" } else { country };

    format!(
        "top_{}_{}_{}-{}_{}.csv",
        ageclass,
        dist_part,
        start_season.min(end_season),
        start_season.max(end_season),
        country
    )
    .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_row(rank: u32, name: &str, event: &str) -> OutputRow {
        OutputRow {
            rank,
            age: "FA2".to_string(),
            distance: 500,
            date: "2021-02-14".to_string(),
            event: event.to_string(),
            skater_name: name.to_string(),
            skater_id: "123".to_string(),
            time: "38,12".to_string(),
            time_seconds: 38.12,
        }
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let text = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(
            text.trim_end(),
            "Rank,Age,Distance,Date,Event,SkaterName,SkaterId,Time,TimeSeconds"
        );
    }

    #[test]
    fn test_export_rows_in_given_order() {
        let rows = vec![output_row(2, "Eeva Korhonen", "Cup"), output_row(1, "Anna Virtanen", "Cup")];
        let text = String::from_utf8(to_csv_bytes(&rows).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2,FA2,500,2021-02-14,Cup,Eeva Korhonen,123,\"38,12\",38.12");
        assert!(lines[2].starts_with("1,FA2,500"));
    }

    #[test]
    fn test_export_quotes_delimiters() {
        let rows = vec![output_row(1, "Anna \"Speedy\" Virtanen", "Cup, Helsinki")];
        let text = String::from_utf8(to_csv_bytes(&rows).unwrap()).unwrap();
        assert!(text.contains("\"Cup, Helsinki\""));
        assert!(text.contains("\"Anna \"\"Speedy\"\" Virtanen\""));
    }

    #[test]
    fn test_export_keeps_utf8() {
        let rows = vec![output_row(1, "Sari Mäkinen", "SM-kisat")];
        let bytes = to_csv_bytes(&rows).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("Sari Mäkinen"));
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(
            suggested_file_name("MB2", &[500], 2010, 2012, "world"),
            "top_MB2_500_2010-2012_world.csv"
        );
        assert_eq!(
            suggested_file_name("FA 2", &[500], 2010, 2012, ""),
            "top_FA_2_500_2010-2012_FIN.csv"
        );
    }
}
