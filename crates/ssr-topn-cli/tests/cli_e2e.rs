use clap::Parser;
use ssr_topn_cli::{Args, OutputFormat, execute, render_rows};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml_with_skaters(count: usize, base_secs: u32) -> String {
    let mut xml = String::from("<topn>");
    for i in 0..count {
        xml.push_str(&format!(
            "<result><time>{},{:02}</time><date>2021-02-01</date><event>Cup</event>\
             <skater><id>{}</id><givenname>Skater</givenname><familyname>{}</familyname></skater></result>",
            base_secs + i as u32,
            i % 100,
            1000 + i,
            i
        ));
    }
    xml.push_str("</topn>");
    xml
}

fn args(server: &MockServer, extra: &[&str]) -> Args {
    let base = format!("{}/topn", server.uri());
    let mut argv = vec![
        "ssr-topn",
        "--base-url",
        base.as_str(),
        "--backoff-ms",
        "0",
        "--delay-ms",
        "0",
        "--start-season",
        "2020",
        "--end-season",
        "2020",
    ];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn multi_distance_query_is_capped_at_fifteen() {
    let server = MockServer::start().await;
    for (distance, base) in [("500", 40), ("1000", 80)] {
        Mock::given(method("GET"))
            .and(path("/topn"))
            .and(query_param("distance", distance))
            // max(buffer 5, min(300, 15 * 3))
            .and(query_param("max", "45"))
            .respond_with(ResponseTemplate::new(200).set_body_string(xml_with_skaters(20, base)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let args = args(&server, &["-d", "1000,500", "-n", "40"]);
    let (query, report) = execute(&args).await.unwrap();

    assert_eq!(query.top_n, 15);
    assert_eq!(query.distances, vec![500, 1000]);
    assert_eq!(report.rows_for(500).count(), 15);
    assert_eq!(report.rows_for(1000).count(), 15);
    assert_eq!(report.summary[&500].unique_skaters, 20);
    assert_eq!(report.summary[&500].written, 15);
    assert_eq!(report.rows.first().map(|r| r.distance), Some(500));
    assert_eq!(report.rows.last().map(|r| (r.distance, r.rank)), Some((1000, 15)));
}

#[tokio::test]
async fn single_distance_query_is_not_capped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topn"))
        .and(query_param("max", "120"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_with_skaters(25, 40)))
        .expect(1)
        .mount(&server)
        .await;

    let args = args(&server, &["-d", "500", "-n", "40"]);
    let (query, report) = execute(&args).await.unwrap();

    assert_eq!(query.top_n, 40);
    assert_eq!(report.rows.len(), 25);
}

#[tokio::test]
async fn csv_rendering_matches_report_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topn"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_with_skaters(3, 40)))
        .mount(&server)
        .await;

    let args = args(&server, &["-d", "500", "-f", "csv"]);
    let (_, report) = execute(&args).await.unwrap();
    let text = String::from_utf8(render_rows(&report, OutputFormat::Csv).unwrap()).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "Rank,Age,Distance,Date,Event,SkaterName,SkaterId,Time,TimeSeconds"
    );
    assert!(lines[1].starts_with("1,FA2,500,2021-02-01,Cup,Skater 0,1000,"));
    assert!(lines[3].starts_with("3,FA2,500,"));
}

#[tokio::test]
async fn invalid_ageclass_is_reported() {
    let server = MockServer::start().await;
    let args = args(&server, &["-a", "X1"]);
    let err = execute(&args).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid age class"));
}
