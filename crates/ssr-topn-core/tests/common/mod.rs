#![allow(dead_code)]

use ssr_topn_core::{ClientConfig, TopnScraper};
use std::time::Duration;
use wiremock::MockServer;

/// (skater id, given name, family name, time text)
pub type Entry<'a> = (&'a str, &'a str, &'a str, &'a str);

pub fn topn_xml(entries: &[Entry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<topn>\n");
    for (i, (id, given, family, time)) in entries.iter().enumerate() {
        xml.push_str(&format!(
            "  <result>\n    <time>{time}</time>\n    <date>2021-01-{day:02}</date>\n    <event>Race {i}</event>\n    <skater>\n      <id>{id}</id>\n      <givenname>{given}</givenname>\n      <familyname>{family}</familyname>\n    </skater>\n  </result>\n",
            day = i % 28 + 1,
        ));
    }
    xml.push_str("</topn>\n");
    xml
}

pub fn fast_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: format!("{}/topn", server.uri()),
        timeout_secs: 5,
        max_attempts: 3,
        backoff_base_ms: 0,
        ..Default::default()
    }
}

pub fn fast_scraper(server: &MockServer) -> TopnScraper {
    TopnScraper::with_config(fast_config(server))
        .expect("client should build")
        .with_polite_delay(Duration::ZERO)
}
