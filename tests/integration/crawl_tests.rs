//! Integration tests for the mirror
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full visit cycle end-to-end: render, save, assets, recursion.

use std::path::Path;
use std::sync::Arc;
use sumi_mirror::config::{
    AssetConfig, Config, CrawlerConfig, OutputConfig, RendererKind, SettlePolicy, SiteConfig,
    UserAgentConfig,
};
use sumi_mirror::crawler::{run_mirror, Coordinator, HttpRenderer};
use sumi_mirror::FailureKind;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration mirroring `base_url` into `root`
fn create_test_config(base_url: &str, root: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            seed_path: "/en".to_string(),
            scope_prefix: "/en".to_string(),
        },
        crawler: CrawlerConfig {
            render_timeout: 5_000,
            settle: SettlePolicy::Immediate,
            renderer: RendererKind::Http,
            max_depth: None,
            max_pages: None,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
        output: OutputConfig {
            root: root.to_string_lossy().to_string(),
        },
        assets: AssetConfig::default(),
    }
}

fn create_coordinator(config: Config) -> Coordinator {
    let renderer = HttpRenderer::from_config(&config.user_agent).expect("Failed to build renderer");
    Coordinator::new(config, Arc::new(renderer)).expect("Failed to create coordinator")
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

fn page_url(server: &MockServer, page_path: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), page_path)).expect("Failed to parse page URL")
}

#[tokio::test]
async fn test_full_mirror_single_page_tree() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/en",
        200,
        r##"<html><head><title>Home</title>
            <link rel="stylesheet" href="/static/site.css">
            </head><body>
            <a href="/en/about">About</a>
            <a href="/fr/about">Français</a>
            <a href="#top">Top</a>
            </body></html>"##,
        1,
    )
    .await;
    mount_page(&mock_server, "/en/about", 200, "<html><body>About us</body></html>", 1).await;
    mount_page(&mock_server, "/fr/about", 200, "<html></html>", 0).await;

    Mock::given(method("GET"))
        .and(path("/static/site.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body { color: black; }"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator = create_coordinator(create_test_config(&mock_server.uri(), output.path()));
    coordinator.visit(&page_url(&mock_server, "/en")).await;

    let home = output.path().join("en").join("index.html");
    let about = output.path().join("en").join("about").join("index.html");
    let css = output.path().join("en").join("site.css");

    assert!(std::fs::read_to_string(&home).unwrap().contains("<title>Home</title>"));
    assert!(std::fs::read_to_string(&about).unwrap().contains("About us"));
    assert_eq!(std::fs::read_to_string(&css).unwrap(), "body { color: black; }");
    assert!(!output.path().join("fr").exists());

    assert_eq!(coordinator.visited().len(), 2);
    let stats = coordinator.report().statistics();
    assert_eq!(stats.pages_saved, 2);
    assert_eq!(stats.assets_saved, 1);
    assert_eq!(stats.total_failures(), 0);
}

#[tokio::test]
async fn test_error_page_skipped_siblings_continue() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/en",
        200,
        r#"<a href="/en/broken">Broken</a><a href="/en/working">Working</a>"#,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/en/broken",
        500,
        r#"<a href="/en/behind-error">Hidden</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/en/behind-error", 200, "", 0).await;
    mount_page(&mock_server, "/en/working", 200, "<p>ok</p>", 1).await;

    let mut coordinator = create_coordinator(create_test_config(&mock_server.uri(), output.path()));
    coordinator.visit(&page_url(&mock_server, "/en")).await;

    assert!(!output.path().join("en/broken/index.html").exists());
    assert!(output.path().join("en/working/index.html").exists());
    assert_eq!(coordinator.report().failure_count(FailureKind::Render), 1);
}

#[tokio::test]
async fn test_mutual_links_visited_once() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/en",
        200,
        r#"<a href="/en/a">A</a><a href="/en/a#section">A again</a>"#,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/en/a",
        200,
        r#"<a href="/en">Home</a><a href="/en/a">Self</a>"#,
        1,
    )
    .await;

    let mut coordinator = create_coordinator(create_test_config(&mock_server.uri(), output.path()));
    coordinator.visit(&page_url(&mock_server, "/en")).await;

    assert_eq!(coordinator.visited().len(), 2);
}

#[tokio::test]
async fn test_second_visit_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(&mock_server, "/en", 200, "<p>home</p>", 1).await;

    let mut coordinator = create_coordinator(create_test_config(&mock_server.uri(), output.path()));
    let seed = page_url(&mock_server, "/en");

    coordinator.visit(&seed).await;
    coordinator.visit(&seed).await;

    assert_eq!(coordinator.report().statistics().pages_visited, 1);
}

#[tokio::test]
async fn test_every_asset_reference_attempted() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/en",
        200,
        r#"<html><head>
            <script src="/js/app.js"></script>
            </head><body>
            <img src="/img/logo.png">
            <img src="/img/logo.png">
            <img src="/img/missing.png">
            </body></html>"#,
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/img/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/js/app.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("console.log(1);"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator = create_coordinator(create_test_config(&mock_server.uri(), output.path()));
    coordinator.visit(&page_url(&mock_server, "/en")).await;

    let folder = output.path().join("en");
    assert!(folder.join("index.html").exists());
    assert!(folder.join("logo.png").exists());
    assert!(folder.join("app.js").exists());
    assert!(!folder.join("missing.png").exists());

    let stats = coordinator.report().statistics();
    assert_eq!(stats.assets_saved, 3);
    assert_eq!(coordinator.report().failure_count(FailureKind::Fetch), 1);
}

#[tokio::test]
async fn test_links_resolve_against_base_assets_against_page() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/en/docs/guide",
        200,
        r#"<a href="intro">Intro</a><img src="diagram.png">"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/en/intro", 200, "<p>intro</p>", 1).await;
    mount_page(&mock_server, "/en/docs/intro", 200, "", 0).await;

    Mock::given(method("GET"))
        .and(path("/en/docs/diagram.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/en/", mock_server.uri());
    let mut coordinator = create_coordinator(create_test_config(&base, output.path()));
    coordinator
        .visit(&page_url(&mock_server, "/en/docs/guide"))
        .await;

    assert!(output.path().join("en/intro/index.html").exists());
    assert!(output
        .path()
        .join("en/docs/guide/diagram.png")
        .exists());
}

#[tokio::test]
async fn test_run_mirror_from_seed() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(&mock_server, "/en", 200, r#"<a href="/en/next">Next</a>"#, 1).await;
    mount_page(&mock_server, "/en/next", 404, "", 1).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let stats = run_mirror(config).await.expect("Mirror failed to start");

    assert_eq!(stats.pages_visited, 2);
    assert_eq!(stats.pages_saved, 1);
    assert_eq!(stats.total_failures(), 1);
    assert!(output.path().join("en/index.html").exists());
}
