//! Main query API
//!
//! Combines the HTTP client, row extractor and leaderboard into a single
//! season-range Top-N query.

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::aggregate::Leaderboard;
use crate::client::{ClientConfig, SsrClient};
use crate::error::{Result, TopnError};
use crate::parser::{extract_rows, parse_ageclass};
use crate::types::{AgeClass, MULTI_DISTANCE_TOP_N_CAP, TopnReport, is_allowed_distance};
use crate::url::{TopnParams, normalize_country};

/// Upper bound on rows requested per (season, distance)
pub const MAX_PER_SEASON_FETCH: usize = 300;

/// Default pause between successive fetches, in milliseconds
pub const DEFAULT_POLITE_DELAY_MS: u64 = 20;

/// Input of a Top-N query
///
/// Hashable so callers can use it directly as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopnQuery {
    /// Age class code, e.g. "FA2"
    pub ageclass: String,
    /// Distances in metres, each from [`crate::ALLOWED_DISTANCES`]
    pub distances: Vec<u32>,
    /// First season (either end of the range)
    pub start_season: i32,
    /// Last season (either end of the range)
    pub end_season: i32,
    /// Rows kept per distance
    pub top_n: usize,
    /// Minimum rows fetched per season
    pub per_season_buffer: usize,
    /// "FIN", "world", numeric id, or empty
    pub country: String,
}

impl TopnQuery {
    /// Inclusive season range with the ends in ascending order
    pub fn seasons(&self) -> std::ops::RangeInclusive<i32> {
        let start = self.start_season.min(self.end_season);
        let end = self.start_season.max(self.end_season);
        start..=end
    }

    /// Rows to request per (season, distance)
    ///
    /// Over-fetches so that duplicate appearances of one skater still
    /// leave enough distinct skaters after dedup.
    pub fn per_season_fetch(&self) -> usize {
        self.per_season_buffer
            .max(MAX_PER_SEASON_FETCH.min(self.top_n.saturating_mul(3)))
    }

    /// Checks distances and age class without touching the network
    ///
    /// Returns the parsed age class and the distinct distances in
    /// ascending order.
    pub fn validate(&self) -> Result<(AgeClass, Vec<u32>)> {
        if self.distances.is_empty() {
            return Err(TopnError::NoDistances);
        }
        if let Some(&bad) = self.distances.iter().find(|d| !is_allowed_distance(**d)) {
            return Err(TopnError::DisallowedDistance(bad));
        }
        let ageclass = parse_ageclass(&self.ageclass)?;
        let distances: BTreeSet<u32> = self.distances.iter().copied().collect();
        Ok((ageclass, distances.into_iter().collect()))
    }
}

/// Caps Top-N for multi-distance queries
///
/// With more than one distance, values above
/// [`MULTI_DISTANCE_TOP_N_CAP`] are clamped to it.
///
/// # Example
/// ```
/// use ssr_topn_core::clamp_top_n;
/// assert_eq!(clamp_top_n(2, 30), 15);
/// assert_eq!(clamp_top_n(1, 30), 30);
/// ```
pub fn clamp_top_n(distance_count: usize, top_n: usize) -> usize {
    if distance_count > 1 {
        top_n.min(MULTI_DISTANCE_TOP_N_CAP)
    } else {
        top_n
    }
}

/// Main query API for SpeedSkatingResults Top-N lists
///
/// Runs one request at a time: distances ascending, seasons ascending,
/// with a short pause between requests.
pub struct TopnScraper {
    client: SsrClient,
    polite_delay: Duration,
}

impl TopnScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = SsrClient::with_config(config)?;
        Ok(Self {
            client,
            polite_delay: Duration::from_millis(DEFAULT_POLITE_DELAY_MS),
        })
    }

    /// Sets the pause between successive fetches
    pub fn with_polite_delay(mut self, delay: Duration) -> Self {
        self.polite_delay = delay;
        self
    }

    /// Run a Top-N query over a season range
    ///
    /// Failed season fetches are recorded in the distance's summary and
    /// the query continues. An empty report is a valid outcome.
    ///
    /// # Errors
    /// - `NoDistances` if no distance was given
    /// - `DisallowedDistance` for a distance outside the allowed set
    /// - `InvalidAgeClass` for a malformed age class
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> ssr_topn_core::Result<()> {
    /// use ssr_topn_core::{TopnQuery, TopnScraper};
    /// let scraper = TopnScraper::new()?;
    /// let report = scraper
    ///     .run_query(&TopnQuery {
    ///         ageclass: "FA2".to_string(),
    ///         distances: vec![500],
    ///         start_season: 2018,
    ///         end_season: 2023,
    ///         top_n: 30,
    ///         per_season_buffer: 5,
    ///         country: "FIN".to_string(),
    ///     })
    ///     .await?;
    /// for row in &report.rows {
    ///     println!("{} {} {}", row.rank, row.skater_name, row.time);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_query(&self, query: &TopnQuery) -> Result<TopnReport> {
        let (ageclass, distances) = query.validate()?;
        let country = normalize_country(&query.country);
        let max = query.per_season_fetch();
        let seasons = query.seasons();

        info!(
            ageclass = %query.ageclass,
            ?distances,
            seasons = %format!("{}-{}", seasons.start(), seasons.end()),
            top_n = query.top_n,
            per_season_fetch = max,
            country = country.as_deref().unwrap_or("world"),
            "running top-n query"
        );

        let mut board = Leaderboard::new(distances.iter().copied());
        let mut first_fetch = true;

        for &distance in &distances {
            for season in seasons.clone() {
                if !first_fetch && !self.polite_delay.is_zero() {
                    sleep(self.polite_delay).await;
                }
                first_fetch = false;

                let params = TopnParams {
                    season,
                    gender: ageclass.gender,
                    distance,
                    max,
                    age: Some(ageclass.age.clone()),
                    country: country.clone(),
                };

                match self.client.fetch_topn(&params).await {
                    Ok(document) => {
                        let rows = extract_rows(&document, &query.ageclass, distance);
                        debug!(
                            season,
                            distance,
                            entries = document.len(),
                            rows = rows.len(),
                            "extracted rows"
                        );
                        board.record_rows(distance, rows);
                    }
                    Err(e) => {
                        warn!(season, distance, error = %e, "season fetch failed, continuing");
                        board.record_error(distance, season, e);
                    }
                }
            }
        }

        let report = board.finish(query.top_n);
        info!(rows = report.rows.len(), "top-n query finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> TopnQuery {
        TopnQuery {
            ageclass: "FA2".to_string(),
            distances: vec![500],
            start_season: 2020,
            end_season: 2021,
            top_n: 30,
            per_season_buffer: 5,
            country: "FIN".to_string(),
        }
    }

    #[test]
    fn test_scraper_creation() {
        let scraper = TopnScraper::new();
        assert!(scraper.is_ok());
    }

    #[test]
    fn test_seasons_order_independent() {
        let mut q = query();
        q.start_season = 2023;
        q.end_season = 2019;
        assert_eq!(q.seasons(), 2019..=2023);
    }

    #[test]
    fn test_per_season_fetch_formula() {
        let mut q = query();
        q.top_n = 30;
        q.per_season_buffer = 5;
        assert_eq!(q.per_season_fetch(), 90);

        q.per_season_buffer = 120;
        assert_eq!(q.per_season_fetch(), 120);

        q.top_n = 200;
        q.per_season_buffer = 5;
        assert_eq!(q.per_season_fetch(), 300);

        q.per_season_buffer = 400;
        assert_eq!(q.per_season_fetch(), 400);
    }

    #[test]
    fn test_validate_sorts_and_dedups_distances() {
        let mut q = query();
        q.distances = vec![1500, 500, 1500];
        let (class, distances) = q.validate().unwrap();
        assert_eq!(distances, vec![500, 1500]);
        assert_eq!(class.age, "A2");
    }

    #[test]
    fn test_validate_rejects_empty_distances() {
        let mut q = query();
        q.distances.clear();
        assert!(matches!(q.validate(), Err(TopnError::NoDistances)));
    }

    #[test]
    fn test_validate_rejects_disallowed_distance() {
        let mut q = query();
        q.distances = vec![500, 700];
        assert!(matches!(q.validate(), Err(TopnError::DisallowedDistance(700))));
    }

    #[test]
    fn test_validate_rejects_bad_ageclass() {
        let mut q = query();
        q.ageclass = "A2".to_string();
        assert!(matches!(q.validate(), Err(TopnError::InvalidAgeClass(_))));
    }

    #[test]
    fn test_clamp_top_n() {
        assert_eq!(clamp_top_n(1, 200), 200);
        assert_eq!(clamp_top_n(2, 200), 15);
        assert_eq!(clamp_top_n(3, 10), 10);
        assert_eq!(clamp_top_n(0, 40), 40);
    }

    #[tokio::test]
    async fn test_run_query_validation_fails_before_io() {
        // Unroutable base URL: reaching the network would fail differently
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9/topn".to_string(),
            max_attempts: 1,
            ..Default::default()
        };
        let scraper = TopnScraper::with_config(config).unwrap();
        let mut q = query();
        q.distances = vec![400];
        match scraper.run_query(&q).await {
            Err(e) => assert!(e.is_validation()),
            Ok(_) => panic!("Expected validation error"),
        }
    }
}
