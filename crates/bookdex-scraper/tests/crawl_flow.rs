//! End-to-end crawl tests over a mock HTTP server.
//!
//! Uses `wiremock` to stand up a local catalog for each test so no real
//! network traffic is made. Listing fixtures link relative detail pages
//! under `/catalogue/`, the same shape the crawler sees in production.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bookdex_core::{ProductRecord, StockStatus};
use bookdex_scraper::{CatalogClient, CrawlOptions, Crawler, ScraperError};

/// Client suitable for tests: short timeout, no retries.
fn test_client() -> CatalogClient {
    CatalogClient::new(5, "bookdex-test/0.1", 0, 0).expect("failed to build test client")
}

fn test_crawler() -> Crawler {
    Crawler::new(test_client()).expect("failed to build crawler")
}

fn options(server: &MockServer, max_listing_pages: Option<usize>) -> CrawlOptions {
    CrawlOptions {
        seed_url: format!("{}/catalogue/index.html", server.uri()),
        max_listing_pages,
        max_concurrent_details: 2,
        inter_page_delay_ms: 0,
    }
}

/// A listing page with one card per `(href, title)` pair and, optionally,
/// a pagination block.
fn listing_html(cards: &[(&str, &str)], page: Option<(u32, u32)>, next_href: Option<&str>) -> String {
    let cards: String = cards
        .iter()
        .map(|(href, title)| {
            format!("<article class=\"product_pod\"><h3><a href=\"{href}\">{title}</a></h3></article>")
        })
        .collect();

    let mut pager = String::new();
    if page.is_some() || next_href.is_some() {
        pager.push_str("<ul class=\"pager\">");
        if let Some((current, total)) = page {
            pager.push_str(&format!(
                "<li class=\"current\">Page {current} of {total}</li>"
            ));
        }
        if let Some(href) = next_href {
            pager.push_str(&format!("<li class=\"next\"><a href=\"{href}\">next</a></li>"));
        }
        pager.push_str("</ul>");
    }

    format!("<html><body><section>{cards}{pager}</section></body></html>")
}

/// A detail page with the catalog's real field layout.
fn detail_html(title: &str, price: &str, availability: &str, upc: &str) -> String {
    format!(
        r#"<html><body>
<ul class="breadcrumb">
  <li><a href="/index.html">Home</a></li>
  <li><a href="/category/books_1/index.html">Books</a></li>
  <li><a href="/category/books/fiction_10/index.html">Fiction</a></li>
  <li class="active">{title}</li>
</ul>
<div class="product_main">
  <h1>{title}</h1>
  <p class="price_color">{price}</p>
  <p class="availability"><i class="icon-ok"></i> {availability}</p>
</div>
<div id="product_description" class="sub-header"><h2>Product Description</h2></div>
<p>About {title}.</p>
<table class="table table-striped">
  <tr><th>UPC</th><td>{upc}</td></tr>
  <tr><th>Product Type</th><td>Books</td></tr>
</table>
</body></html>"#
    )
}

async fn mount_page(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn collect_records(
    crawler: &Crawler,
    options: &CrawlOptions,
) -> (Result<bookdex_scraper::CrawlSummary, ScraperError>, Vec<ProductRecord>) {
    let mut records = Vec::new();
    let result = crawler.crawl(options, |record| records.push(record)).await;
    (result, records)
}

// ---------------------------------------------------------------------------
// Happy path: two-page catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_page_catalog_emits_records_in_dispatch_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/index.html",
        listing_html(
            &[("a.html", "Alpha"), ("b.html", "Beta")],
            Some((1, 2)),
            Some("page-2.html"),
        ),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        listing_html(&[("c.html", "Gamma")], Some((2, 2)), None),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/a.html",
        detail_html("Alpha", "£51.77", "In stock (22 available)", "upc-a"),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/b.html",
        detail_html("Beta", "£13.50", "In stock", "upc-b"),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/c.html",
        detail_html("Gamma", "£9.99", "Out of stock", "upc-c"),
    )
    .await;

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    let summary = result.expect("crawl should succeed");
    assert_eq!(summary.listing_pages, 2);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped_details, 0);

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let pages: Vec<Option<u32>> = records.iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![Some(1), Some(1), Some(2)]);

    assert_eq!(records[0].price, Some(51.77));
    assert_eq!(records[0].stock_status, StockStatus::Available);
    assert_eq!(records[0].stock_quantity, 22);
    assert_eq!(records[0].upc, "upc-a");
    assert_eq!(records[0].category, "Fiction");
    assert_eq!(records[0].description, "About Alpha.");

    // "In stock" with no count parses as available with zero units.
    assert_eq!(records[1].stock_status, StockStatus::Available);
    assert_eq!(records[1].stock_quantity, 0);

    assert_eq!(records[2].stock_status, StockStatus::Unavailable);
    assert_eq!(records[2].stock_quantity, 0);
}

// ---------------------------------------------------------------------------
// Continuation guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_page_cap_stops_pagination() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/index.html",
        listing_html(&[("a.html", "Alpha")], Some((1, 2)), Some("page-2.html")),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/a.html",
        detail_html("Alpha", "£51.77", "In stock (22 available)", "upc-a"),
    )
    .await;
    // page-2.html is deliberately not mounted: with the cap in place it
    // must never be requested.

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, Some(1))).await;

    let summary = result.expect("crawl should stop at the cap, not fail");
    assert_eq!(summary.listing_pages, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Alpha");
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_detail_fetch_is_skipped_not_fatal() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/index.html",
        listing_html(&[("a.html", "Alpha"), ("gone.html", "Gone")], Some((1, 1)), None),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/a.html",
        detail_html("Alpha", "£51.77", "In stock (22 available)", "upc-a"),
    )
    .await;
    // gone.html is not mounted; wiremock answers 404.

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    let summary = result.expect("a failed detail page must not abort the run");
    assert_eq!(summary.records, 1);
    assert_eq!(summary.skipped_details, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Alpha");
}

#[tokio::test]
async fn failed_listing_fetch_fails_the_run() {
    let server = MockServer::start().await;
    // Nothing mounted: the seed listing answers 404.

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    assert!(
        matches!(result, Err(ScraperError::NotFound { .. })),
        "expected NotFound for the seed listing, got: {result:?}"
    );
    assert!(records.is_empty());
}

#[tokio::test]
async fn invalid_seed_url_is_rejected_up_front() {
    let crawler = test_crawler();
    let options = CrawlOptions {
        seed_url: "not a url".to_string(),
        max_listing_pages: None,
        max_concurrent_details: 1,
        inter_page_delay_ms: 0,
    };
    let mut records = Vec::new();
    let result = crawler.crawl(&options, |record| records.push(record)).await;
    assert!(matches!(result, Err(ScraperError::InvalidSeedUrl { .. })));
}

// ---------------------------------------------------------------------------
// Degraded documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_without_pagination_yields_null_page_numbers() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/index.html",
        listing_html(&[("a.html", "Alpha")], None, None),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/a.html",
        detail_html("Alpha", "£51.77", "In stock (22 available)", "upc-a"),
    )
    .await;

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    let summary = result.expect("crawl should succeed");
    assert_eq!(summary.listing_pages, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].page_number, None);
}

#[tokio::test]
async fn empty_listing_emits_nothing() {
    let server = MockServer::start().await;

    mount_page(&server, "/catalogue/index.html", listing_html(&[], Some((1, 1)), None)).await;

    let crawler = test_crawler();
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    let summary = result.expect("crawl should succeed");
    assert_eq!(summary.listing_pages, 1);
    assert_eq!(summary.records, 0);
    assert!(records.is_empty());
}

// ---------------------------------------------------------------------------
// Retry policy at the transport level
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_listing_is_retried() {
    let server = MockServer::start().await;

    // First request is rate limited; the mock then stops matching and the
    // catch-all 200 below takes over.
    Mock::given(method("GET"))
        .and(path("/catalogue/index.html"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/catalogue/index.html",
        listing_html(&[("a.html", "Alpha")], Some((1, 1)), None),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/a.html",
        detail_html("Alpha", "£51.77", "In stock (22 available)", "upc-a"),
    )
    .await;

    let client =
        CatalogClient::new(5, "bookdex-test/0.1", 1, 0).expect("failed to build test client");
    let crawler = Crawler::new(client).expect("failed to build crawler");
    let (result, records) = collect_records(&crawler, &options(&server, None)).await;

    let summary = result.expect("the retried fetch should succeed");
    assert_eq!(summary.records, 1);
    assert_eq!(records[0].title, "Alpha");
}
