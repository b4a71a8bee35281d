//! Debug script to inspect one season's Top-N page
//!
//! Run with: cargo run --example debug_season -p ssr-topn-core -- 2020 500 FA2

use ssr_topn_core::url::TopnParams;
use ssr_topn_core::{SsrClient, extract_rows, parse_ageclass};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let season: i32 = args.next().as_deref().unwrap_or("2020").parse()?;
    let distance: u32 = args.next().as_deref().unwrap_or("500").parse()?;
    let ageclass = args.next().unwrap_or_else(|| "FA2".to_string());
    let class = parse_ageclass(&ageclass)?;

    let client = SsrClient::new()?;
    let params = TopnParams {
        season,
        gender: class.gender,
        distance,
        max: 20,
        age: Some(class.age.clone()),
        country: Some("FIN".to_string()),
    };

    println!("Fetching {}\n", client.url_for(&params));

    let document = client.fetch_topn(&params).await?;
    let rows = extract_rows(&document, &ageclass, distance);

    println!(
        "{} result entries, {} with a usable time:\n",
        document.len(),
        rows.len()
    );

    for row in &rows {
        println!(
            "{:>9} ({:>8.3}s)  {:<30} {:<8} {}",
            row.time_text, row.time_seconds, row.skater_name, row.skater_id, row.event
        );
    }

    Ok(())
}
