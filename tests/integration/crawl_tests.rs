//! Integration tests for the crawler
//!
//! These tests use wiremock to serve catalog fixture pages and run the full
//! crawl cycle end-to-end through the HTTP renderer.

use shelf_scrape::config::{Config, RendererKind};
use shelf_scrape::crawler::{crawl, Coordinator};
use shelf_scrape::output::write_table;
use shelf_scrape::render::HttpRenderer;
use shelf_scrape::{ExtractError, ScrapeError, StarRating};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRAVEL: &str = "/catalogue/category/books/travel_2";
const NONFICTION: &str = "/catalogue/category/books/nonfiction_13";

/// Creates a test configuration crawling the given categories over HTTP
fn create_test_config(categories: Vec<String>) -> Config {
    let mut config = Config::default();
    config.crawl.categories = categories;
    config.crawl.page_load_timeout_secs = 1;
    config.crawl.detail_load_timeout_secs = 1;
    config.crawl.poll_interval_ms = 50;
    config.renderer.kind = RendererKind::Http;
    config.renderer.request_timeout_secs = 5;
    config
}

/// Listing page in the catalog's layout, one product per href
fn listing_page(hrefs: &[&str]) -> String {
    let products: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li class="col-xs-6"><article class="product_pod">
                <div class="image_container"><a href="{href}"><img src="x.jpg"></a></div>
                <h3><a href="{href}" title="Book">Book</a></h3>
                </article></li>"#,
                href = href
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="container-fluid page"><div class="page_inner">
        <ul class="breadcrumb"><li><a href="../../../../index.html">Home</a></li></ul>
        <section><ol class="row">{}</ol></section>
        </div></div></body></html>"#,
        products
    )
}

/// Detail page in the catalog's layout
fn detail_page(title: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<html><body><header><h1>Books to Scrape</h1></header>
        <div class="container-fluid page"><div class="page_inner">
        <div class="content"><div id="content_inner"><article class="product_page">
        <div class="col-sm-6 product_main">
            <h1>{}</h1>
            <p class="price_color">{}</p>
            <p class="instock availability"><i class="icon-ok"></i> In stock</p>
            <p class="star-rating {}"><i class="icon-star"></i></p>
        </div></article></div></div></div></div></body></html>"#,
        title, price, rating
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_categories_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        &format!("{}/index.html", TRAVEL),
        listing_page(&[
            "../../../its-only-the-himalayas_981/index.html",
            "../../../full-moon-over-noahs-ark_811/index.html",
        ]),
        1,
    )
    .await;
    // Empty listing ends the first category
    mount_page(&mock_server, &format!("{}/page-2.html", TRAVEL), listing_page(&[]), 1).await;

    mount_page(
        &mock_server,
        &format!("{}/index.html", NONFICTION),
        listing_page(&[
            "../../../sapiens_996/index.html",
            "../../../the-art-of-war_400/index.html",
        ]),
        1,
    )
    .await;
    // No mock for the second category's page 2: the 404 page never shows the marker

    mount_page(
        &mock_server,
        "/catalogue/its-only-the-himalayas_981/index.html",
        detail_page("It's Only the Himalayas", "£45.17", "Two"),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/full-moon-over-noahs-ark_811/index.html",
        detail_page("Full Moon over Noah’s Ark", "£49.43", "Four"),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/sapiens_996/index.html",
        detail_page("Sapiens: A Brief History of Humankind", "£54.23", "Five"),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/the-art-of-war_400/index.html",
        detail_page("The Art of War", "£33.34", "Five"),
        1,
    )
    .await;

    let config = create_test_config(vec![
        format!("{}{}/index.html", base_url, TRAVEL),
        format!("{}{}/index.html", base_url, NONFICTION),
    ]);

    let report = crawl(&config).await.expect("Crawl failed");

    let rows: Vec<(&str, &str, StarRating, &str)> = report
        .records
        .iter()
        .map(|r| (r.title.as_str(), r.price.as_str(), r.rating, r.category.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("It's Only the Himalayas", "£45.17", StarRating::Two, "Travel"),
            ("Full Moon over Noah’s Ark", "£49.43", StarRating::Four, "Travel"),
            ("Sapiens: A Brief History of Humankind", "£54.23", StarRating::Five, "Nonfiction"),
            ("The Art of War", "£33.34", StarRating::Five, "Nonfiction"),
        ]
    );

    let tallies: Vec<(&str, usize)> = report
        .tallies
        .iter()
        .map(|t| (t.category.as_str(), t.books))
        .collect();
    assert_eq!(tallies, vec![("Travel", 2), ("Nonfiction", 2)]);

    // The table is written once, after the crawl
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("books_details.csv");
    write_table(&report.records, &output_path).expect("Failed to write table");

    let csv = std::fs::read_to_string(&output_path).expect("Failed to read table");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Book Title,Book Price,Book Rating,Category");
    assert_eq!(lines[1], "It's Only the Himalayas,£45.17,Two,Travel");
    assert_eq!(lines[4], "The Art of War,£33.34,Five,Nonfiction");
}

#[tokio::test]
async fn test_pagination_spans_pages_and_stops_at_empty_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        &format!("{}/index.html", TRAVEL),
        listing_page(&["../../../a_1/index.html", "../../../b_2/index.html"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        &format!("{}/page-2.html", TRAVEL),
        listing_page(&["../../../c_3/index.html"]),
        1,
    )
    .await;
    mount_page(&mock_server, &format!("{}/page-3.html", TRAVEL), listing_page(&[]), 1).await;
    mount_page(
        &mock_server,
        &format!("{}/page-4.html", TRAVEL),
        listing_page(&["../../../never_4/index.html"]),
        0,
    )
    .await;

    for (slug, title) in [("a_1", "A"), ("b_2", "B"), ("c_3", "C")] {
        mount_page(
            &mock_server,
            &format!("/catalogue/{}/index.html", slug),
            detail_page(title, "£1.00", "One"),
            1,
        )
        .await;
    }

    let config = create_test_config(vec![format!("{}{}/index.html", base_url, TRAVEL)]);
    let report = crawl(&config).await.expect("Crawl failed");

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(report.tallies[0].books, 3);
}

#[tokio::test]
async fn test_missing_title_aborts_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        &format!("{}/index.html", TRAVEL),
        listing_page(&["../../../broken_1/index.html"]),
        1,
    )
    .await;
    mount_page(&mock_server, &format!("{}/page-2.html", TRAVEL), listing_page(&[]), 1).await;
    mount_page(
        &mock_server,
        "/catalogue/broken_1/index.html",
        r#"<html><body><div class="content"><p class="price_color">£9.99</p>
        <p class="star-rating Three"></p></div></body></html>"#
            .to_string(),
        1,
    )
    .await;

    let config = create_test_config(vec![format!("{}{}/index.html", base_url, TRAVEL)]);
    let err = crawl(&config).await.expect_err("Crawl should fail");

    match err {
        ScrapeError::Extract { url, source } => {
            assert!(url.ends_with("/catalogue/broken_1/index.html"));
            assert_eq!(source, ExtractError::MissingField("title"));
        }
        other => panic!("Unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_unreachable_first_page_yields_empty_category() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}{}/index.html", base_url, TRAVEL)]);
    let renderer = HttpRenderer::new(&config.renderer).expect("Failed to build renderer");
    let mut coordinator = Coordinator::new(renderer, &config).expect("Failed to create coordinator");

    let report = coordinator.run_configured().await.expect("Crawl failed");

    assert!(report.records.is_empty());
    assert_eq!(report.tallies[0].books, 0);
    assert_eq!(coordinator.renderer().pages_loaded(), 1);

    coordinator.shutdown().await.expect("Failed to close renderer");
}
