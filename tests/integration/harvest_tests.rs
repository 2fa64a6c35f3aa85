//! Integration tests for the harvester
//!
//! These tests use wiremock to serve listing pages and run the full
//! fetch, extract, paginate and write cycle end-to-end.

use quote_harvest::config::{Config, HttpConfig, OutputConfig, SiteConfig};
use quote_harvest::crawler::{HttpFetcher, Paginator};
use quote_harvest::output::read_quotes;
use quote_harvest::{harvest, HarvestError, Quote};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders one quote block in the markup of the live site
fn quote_block(text: &str, author: &str, tags: &[&str]) -> String {
    let tags: String = tags
        .iter()
        .map(|t| format!(r#"<a class="tag" href="/tag/{t}/page/1/">{t}</a>"#))
        .collect();
    format!(
        r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
        <span class="text" itemprop="text">{text}</span>
        <span>by <small class="author" itemprop="author">{author}</small>
        <a href="/author/x">(about)</a></span>
        <div class="tags">Tags: <meta class="keywords" itemprop="keywords" content="">{tags}</div>
        </div>"#
    )
}

/// Renders a listing page, with a next-page link when `next` is set
fn listing_page(blocks: &[String], next: Option<u32>) -> String {
    let next = next
        .map(|n| format!(r#"<li class="next"><a href="/page/{n}/">Next <span aria-hidden="true">&rarr;</span></a></li>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><title>Quotes to Scrape</title></head>
        <body><div class="container"><div class="row"><div class="col-md-8">
        {}
        <nav><ul class="pager">{}</ul></nav>
        </div></div></div></body></html>"#,
        blocks.concat(),
        next
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{page}/")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Creates a configuration pointing at the mock server and a temp output file
fn create_test_config(server: &MockServer, dir: &TempDir) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", server.uri()),
            ..SiteConfig::default()
        },
        http: HttpConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            timeout_ms: Some(500),
        },
        output: OutputConfig {
            csv_path: dir.path().join("quotes.csv"),
        },
        ..Config::default()
    }
}

fn expected(text: &str, author: &str, tags: &[&str]) -> Quote {
    Quote::new(text, author, tags.iter().map(|t| t.to_string()).collect())
}

async fn mount_three_pages(server: &MockServer) {
    mount_page(
        server,
        1,
        listing_page(
            &[
                quote_block("“First.”", "Albert Einstein", &["change", "deep-thoughts"]),
                quote_block("“Second.”", "J.K. Rowling", &["abilities"]),
            ],
            Some(2),
        ),
    )
    .await;
    mount_page(
        server,
        2,
        listing_page(&[quote_block("“Third.”", "Jane Austen", &[])], Some(3)),
    )
    .await;
    mount_page(
        server,
        3,
        listing_page(
            &[
                quote_block("“Fourth.”", "Marilyn Monroe", &["be-yourself", "inspirational"]),
                quote_block("“Fifth.”", "Albert Einstein", &["miracle", "miracle"]),
            ],
            None,
        ),
    )
    .await;
}

#[tokio::test]
async fn test_three_linked_pages_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let fetcher = HttpFetcher::new(&config.http).unwrap();
    let paginator = Paginator::new(fetcher, &config.site, &config.selectors).unwrap();
    let quotes = paginator.collect_all().await.expect("Collection failed");

    assert_eq!(
        quotes,
        vec![
            expected("“First.”", "Albert Einstein", &["change", "deep-thoughts"]),
            expected("“Second.”", "J.K. Rowling", &["abilities"]),
            expected("“Third.”", "Jane Austen", &[]),
            expected("“Fourth.”", "Marilyn Monroe", &["be-yourself", "inspirational"]),
            expected("“Fifth.”", "Albert Einstein", &["miracle", "miracle"]),
        ]
    );
}

#[tokio::test]
async fn test_single_page_is_fetched_once() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing_page(&[quote_block("“Only.”", "Solo", &["one"])], None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let count = harvest(&config).await.expect("Harvest failed");
    assert_eq!(count, 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/page/1/");
}

#[tokio::test]
async fn test_full_harvest_writes_csv() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let count = harvest(&config).await.expect("Harvest failed");
    assert_eq!(count, 5);

    let content = std::fs::read_to_string(&config.output.csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("text,author,tags"));
    assert_eq!(lines.next(), Some("“First.”,Albert Einstein,change;deep-thoughts"));

    let quotes = read_quotes(&config.output.csv_path).unwrap();
    assert_eq!(quotes.len(), 5);
    assert_eq!(quotes[2].tags, Vec::<String>::new());
    assert_eq!(quotes[4].tags, vec!["miracle", "miracle"]);
}

#[tokio::test]
async fn test_tag_with_separator_round_trips() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing_page(
            &[
                quote_block("A", "X", &["a;b"]),
                quote_block("B", "Y", &["a", "b"]),
            ],
            None,
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    harvest(&config).await.expect("Harvest failed");

    let quotes = read_quotes(&config.output.csv_path).unwrap();
    assert_eq!(quotes[0].tags, vec!["a;b"]);
    assert_eq!(quotes[1].tags, vec!["a", "b"]);
}

fn assert_untouched(path: &Path) {
    assert_eq!(std::fs::read_to_string(path).unwrap(), "previous run\n");
}

#[tokio::test]
async fn test_transport_failure_on_page_two_leaves_output_untouched() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing_page(&[quote_block("“First.”", "A", &[])], Some(2)),
    )
    .await;
    // Slower than the client timeout
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[], Some(3)))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[], None)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    std::fs::write(&config.output.csv_path, "previous run\n").unwrap();

    let err = harvest(&config).await.unwrap_err();

    assert!(matches!(err, HarvestError::Http { ref url, .. } if url.ends_with("/page/2/")));
    assert!(err.is_network());
    assert_untouched(&config.output.csv_path);
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        listing_page(&[quote_block("“First.”", "A", &[])], Some(2)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    std::fs::write(&config.output.csv_path, "previous run\n").unwrap();

    let err = harvest(&config).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 500, .. }));
    assert_untouched(&config.output.csv_path);
}

#[tokio::test]
async fn test_no_output_file_created_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);

    let err = harvest(&config).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 404, .. }));
    assert!(!config.output.csv_path.exists());
}

#[tokio::test]
async fn test_missing_author_aborts_harvest() {
    let server = MockServer::start().await;
    let broken = r#"<div class="quote"><span class="text">“Orphan.”</span>
        <div class="tags">Tags: <a class="tag" href="/tag/x/">x</a></div></div>"#;
    mount_page(
        &server,
        1,
        listing_page(&[quote_block("“Fine.”", "A", &[]), broken.to_string()], Some(2)),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir);
    std::fs::write(&config.output.csv_path, "previous run\n").unwrap();

    let err = harvest(&config).await.unwrap_err();

    match &err {
        HarvestError::MissingField { index, source, .. } => {
            assert_eq!(*index, 2);
            assert_eq!(source.field, "author");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_untouched(&config.output.csv_path);
}
