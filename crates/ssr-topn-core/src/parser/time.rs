//! Time string parser
//!
//! Upstream prints times in several notations ("37,45", "1:10.23",
//! "2.33,86") and uses letter codes for non-finishes. Everything resolves
//! to seconds or to `None`.

use std::sync::LazyLock;

use regex::Regex;

/// `m.ss,cc` and `m.ss.cc`
static DOTTED_MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]{2})[.,]([0-9]{2})$").expect("valid dotted-minutes regex")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid decimal regex"));

/// Parses a printed skating time into seconds
///
/// Returns `None` for blanks, placeholders ("-", "--"), status codes such
/// as "DNS" or "DQ", and anything not matching a known notation.
///
/// # Example
/// ```
/// use ssr_topn_core::parse_time_to_seconds;
/// assert_eq!(parse_time_to_seconds("37,45"), Some(37.45));
/// let secs = parse_time_to_seconds("2.33,86").unwrap();
/// assert!((secs - 153.86).abs() < 1e-9);
/// assert_eq!(parse_time_to_seconds("DQ"), None);
/// ```
pub fn parse_time_to_seconds(text: &str) -> Option<f64> {
    let s = text.trim().trim_matches('"');
    if matches!(s, "" | "-" | "--") {
        return None;
    }

    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }

    if let Some(secs) = parse_dotted_minutes(&s) {
        return Some(secs);
    }

    let s = s.replace(',', ".");

    if s.contains(':') {
        return parse_colon_minutes(&s);
    }

    if DECIMAL.is_match(&s) {
        return s.parse::<f64>().ok();
    }

    None
}

fn parse_dotted_minutes(s: &str) -> Option<f64> {
    let caps = DOTTED_MINUTES.captures(s)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;
    let hundredths: u64 = caps[3].parse().ok()?;
    Some(minutes as f64 * 60.0 + seconds as f64 + hundredths as f64 / 100.0)
}

/// `m:ss` with an optional fraction, comma already normalized to dot
fn parse_colon_minutes(s: &str) -> Option<f64> {
    let (minutes, seconds) = s.split_once(':')?;
    if seconds.contains(':') {
        return None;
    }
    if !DIGITS.is_match(minutes) || !DECIMAL.is_match(seconds) {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes as f64 * 60.0 + seconds)
}
