//! Deduplication and ranking state for one Top-N query
//!
//! Fetch results are fed in as they arrive; [`Leaderboard::finish`] turns
//! the accumulated best times into ranked output rows and summaries.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::types::{DedupKey, OutputRow, QuerySummary, ResultRow, TopnReport};

#[derive(Debug)]
struct BestRow {
    /// Insertion order of the key, breaks ranking ties
    seq: usize,
    row: ResultRow,
}

/// Per-query accumulator of best rows, raw counts and fetch errors
#[derive(Debug, Default)]
pub struct Leaderboard {
    best: HashMap<DedupKey, BestRow>,
    raw_rows: BTreeMap<u32, usize>,
    errors: BTreeMap<u32, Vec<String>>,
    next_seq: usize,
}

impl Leaderboard {
    /// Creates an empty leaderboard that reports on every listed distance
    pub fn new(distances: impl IntoIterator<Item = u32>) -> Self {
        let mut board = Self::default();
        for d in distances {
            board.raw_rows.entry(d).or_insert(0);
            board.errors.entry(d).or_default();
        }
        board
    }

    /// Feeds rows fetched for `distance`
    ///
    /// A row replaces the stored best for its key only if its time is
    /// strictly smaller; on ties the earlier row stays.
    pub fn record_rows(&mut self, distance: u32, rows: Vec<ResultRow>) {
        *self.raw_rows.entry(distance).or_insert(0) += rows.len();
        self.errors.entry(distance).or_default();

        for row in rows {
            let key = DedupKey::for_row(&row);
            match self.best.get_mut(&key) {
                Some(best) => {
                    if row.time_seconds < best.row.time_seconds {
                        best.row = row;
                    }
                }
                None => {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.best.insert(key, BestRow { seq, row });
                }
            }
        }
    }

    /// Records a failed season fetch for `distance`
    pub fn record_error(&mut self, distance: u32, season: i32, message: impl std::fmt::Display) {
        self.raw_rows.entry(distance).or_insert(0);
        self.errors
            .entry(distance)
            .or_default()
            .push(format!("season={}: {}", season, message));
    }

    /// Number of distinct skaters currently retained for `distance`
    pub fn unique_skaters(&self, distance: u32) -> usize {
        self.best.keys().filter(|k| k.distance == distance).count()
    }

    /// Ranks each distance and builds the final report
    ///
    /// Ranks restart at 1 per distance and cover the first `top_n` rows by
    /// ascending time. Output is ordered by (distance, time).
    pub fn finish(self, top_n: usize) -> TopnReport {
        let Leaderboard {
            best,
            raw_rows,
            mut errors,
            ..
        } = self;

        let distances: BTreeSet<u32> = raw_rows
            .keys()
            .copied()
            .chain(best.keys().map(|k| k.distance))
            .collect();

        let mut by_distance: BTreeMap<u32, Vec<BestRow>> = BTreeMap::new();
        for (key, best_row) in best {
            by_distance.entry(key.distance).or_default().push(best_row);
        }

        let mut rows = Vec::new();
        let mut summary = BTreeMap::new();

        for distance in distances {
            let mut d_rows = by_distance.remove(&distance).unwrap_or_default();
            d_rows.sort_by(|a, b| {
                a.row
                    .time_seconds
                    .total_cmp(&b.row.time_seconds)
                    .then(a.seq.cmp(&b.seq))
            });

            let unique_skaters = d_rows.len();
            let written = top_n.min(unique_skaters);

            summary.insert(
                distance,
                QuerySummary {
                    raw_rows: raw_rows.get(&distance).copied().unwrap_or(0),
                    unique_skaters,
                    written,
                    errors: errors.remove(&distance).unwrap_or_default(),
                },
            );

            rows.extend(
                d_rows
                    .into_iter()
                    .take(top_n)
                    .zip(1u32..)
                    .map(|(best, rank)| OutputRow::ranked(rank, best.row)),
            );
        }

        rows.sort_by(compare_output_rows);

        TopnReport { rows, summary }
    }
}

/// Global output order: distance, then time; stable so ranks stay in order
fn compare_output_rows(a: &OutputRow, b: &OutputRow) -> Ordering {
    a.distance
        .cmp(&b.distance)
        .then(a.time_seconds.total_cmp(&b.time_seconds))
}
