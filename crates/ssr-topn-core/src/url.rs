//! URL helper functions for the SpeedSkatingResults Top-N endpoint
//!
//! Provides the request parameter set and the query-string builder.

use crate::types::Gender;

/// Base path of the Top-N XML endpoint
pub const API_BASE: &str = "https://speedskatingresults.com/api/xml/topn";

/// Query parameters for one (season, distance) request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopnParams {
    pub season: i32,
    pub gender: Gender,
    pub distance: u32,
    /// Maximum number of rows to request
    pub max: usize,
    /// Age-group token, e.g. "A2"
    pub age: Option<String>,
    /// Already normalized country filter, see [`normalize_country`]
    pub country: Option<String>,
}

/// Builds the full request URL for one Top-N fetch
///
/// Parameters appear in a fixed order: season, gender, distance, max,
/// then age and country when set.
///
/// # Example
/// ```
/// use ssr_topn_core::Gender;
/// use ssr_topn_core::url::{build_topn_url, TopnParams};
/// let params = TopnParams {
///     season: 2020,
///     gender: Gender::Female,
///     distance: 500,
///     max: 90,
///     age: Some("A2".to_string()),
///     country: Some("FIN".to_string()),
/// };
/// assert_eq!(
///     build_topn_url("https://speedskatingresults.com/api/xml/topn", &params),
///     "https://speedskatingresults.com/api/xml/topn?season=2020&gender=f&distance=500&max=90&age=A2&country=FIN"
/// );
/// ```
pub fn build_topn_url(base: &str, params: &TopnParams) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("season", params.season.to_string()),
        ("gender", params.gender.as_param().to_string()),
        ("distance", params.distance.to_string()),
        ("max", params.max.to_string()),
    ];
    if let Some(age) = params.age.as_deref().filter(|a| !a.is_empty()) {
        pairs.push(("age", age.to_string()));
    }
    if let Some(country) = params.country.as_deref().filter(|c| !c.is_empty()) {
        pairs.push(("country", country.to_string()));
    }

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", base.trim_end_matches('?'), query)
}

/// Normalizes a caller-supplied country filter into the query value
///
/// Empty input or "world" (any case) means no restriction. Purely
/// alphabetic codes are upper-cased; anything else (numeric country ids)
/// passes through trimmed but otherwise unchanged.
///
/// # Example
/// ```
/// use ssr_topn_core::url::normalize_country;
/// assert_eq!(normalize_country("fin"), Some("FIN".to_string()));
/// assert_eq!(normalize_country("World"), None);
/// assert_eq!(normalize_country("123"), Some("123".to_string()));
/// ```
pub fn normalize_country(country: &str) -> Option<String> {
    let trimmed = country.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("world") {
        return None;
    }
    if trimmed.chars().all(char::is_alphabetic) {
        Some(trimmed.to_uppercase())
    } else {
        Some(trimmed.to_string())
    }
}
