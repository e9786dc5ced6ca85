//! Integration tests for the site client
//!
//! These tests use wiremock to serve robots.txt and exercise the full
//! fetch, parse and query cycle through the HTTP fetcher.

use robots_scope::config::HttpConfig;
use robots_scope::{HttpFetcher, RobotsError, SiteClient};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROBOTS_TXT: &str = "\
# robots.txt
User-agent: *
Disallow: /cgi-bin/
Disallow: /404.htm
Disallow: /CV.htm
Disallow: /simpleDo/
Disallow: /basic-projects-template.htm

User-agent: shitbot
Disallow: /
";

const EXPECTED_PATHS: [&str; 5] = [
    "cgi-bin/",
    "404.htm",
    "CV.htm",
    "simpleDo/",
    "basic-projects-template.htm",
];

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(&HttpConfig {
        agent_header: "TestBot/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
        max_redirects: 2,
    })
    .expect("Failed to build fetcher")
}

async fn serve_robots(body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_fetch_and_cache_from_any_site_url() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let fetcher = test_fetcher();
    let client = SiteClient::new(None);

    for site in [
        base_url.clone(),
        format!("{}/", base_url),
        format!("{}/about.htm", base_url),
        format!("{}/about.htm/", base_url),
    ] {
        client.fetch_and_cache(&site, &fetcher).await.unwrap();
        assert_eq!(client.disallowed_paths(), EXPECTED_PATHS);
        assert_eq!(client.domain(), Some(format!("{}/", base_url)));
    }
}

#[tokio::test]
async fn test_is_allowed_after_fetch() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let client = SiteClient::new(None);

    client.fetch_and_cache(&base_url, &test_fetcher()).await.unwrap();

    assert!(client.is_allowed(&format!("{}/about.htm", base_url)).unwrap());
    assert!(!client.is_allowed(&format!("{}/404.htm", base_url)).unwrap());
}

#[tokio::test]
async fn test_disallowed_urls_after_fetch() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let client = SiteClient::new(None);

    client.fetch_and_cache(&base_url, &test_fetcher()).await.unwrap();

    let expected: Vec<String> = EXPECTED_PATHS
        .iter()
        .map(|p| format!("{}/{}", base_url, p))
        .collect();
    assert_eq!(client.disallowed_urls(), expected);
}

#[tokio::test]
async fn test_filter_after_fetch() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let client = SiteClient::new(None);

    client.fetch_and_cache(&format!("{}/", base_url), &test_fetcher()).await.unwrap();

    let input = vec![
        format!("{}/404.htm", base_url),
        format!("{}/index.htm", base_url),
        "not a url".to_string(),
        format!("{}/simpleDo/app", base_url),
    ];
    assert_eq!(client.filter(&input), vec![format!("{}/index.htm", base_url)]);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let base_url = mock_server.uri();
    let fetcher = test_fetcher();
    let client = SiteClient::new(None);

    // Load real rules first so the 404 has something to clear
    let other = serve_robots(ROBOTS_TXT).await;
    client.fetch_and_cache(&other.uri(), &fetcher).await.unwrap();
    assert!(!client.is_unrestricted());

    client.fetch_and_cache(&base_url, &fetcher).await.unwrap();
    assert!(client.is_unrestricted());
    assert_eq!(client.domain(), Some(format!("{}/", base_url)));
    assert!(client.is_allowed(&format!("{}/404.htm", base_url)).unwrap());
}

#[tokio::test]
async fn test_server_error_treated_as_missing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    let client = SiteClient::new(None);

    client
        .fetch_and_cache(&mock_server.uri(), &test_fetcher())
        .await
        .unwrap();
    assert!(client.is_unrestricted());
}

#[tokio::test]
async fn test_disallowed_agent_gets_error_and_blocked_cache() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let client = SiteClient::with_user_agent("shitbot");

    let result = client.fetch_and_cache(&base_url, &test_fetcher()).await;

    match result {
        Err(RobotsError::RobotsDisallowed { domain }) => assert_eq!(domain, format!("{}/", base_url)),
        other => panic!("expected RobotsDisallowed, got {:?}", other),
    }
    assert!(!client.is_allowed(&base_url).unwrap());
    assert!(!client.is_allowed(&format!("{}/about.htm", base_url)).unwrap());
}

#[tokio::test]
async fn test_other_agent_uses_wildcard_rules() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let client = SiteClient::with_user_agent("goodbot");

    client
        .fetch_and_cache(&mock_server.uri(), &test_fetcher())
        .await
        .unwrap();
    assert_eq!(client.disallowed_paths(), EXPECTED_PATHS);
}

#[tokio::test]
async fn test_fetcher_sends_agent_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /x/"))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = SiteClient::new(None);

    client
        .fetch_and_cache(&mock_server.uri(), &test_fetcher())
        .await
        .unwrap();
    assert_eq!(client.disallowed_paths(), vec!["x/"]);
}

#[tokio::test]
async fn test_repeated_fetch_is_idempotent() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let fetcher = test_fetcher();
    let client = SiteClient::new(None);

    client.fetch_and_cache(&base_url, &fetcher).await.unwrap();
    let first = client.disallowed_urls();
    client.fetch_and_cache(&base_url, &fetcher).await.unwrap();

    assert_eq!(client.disallowed_urls(), first);
}

#[tokio::test]
async fn test_concurrent_refreshes_leave_consistent_cache() {
    let mock_server = serve_robots(ROBOTS_TXT).await;
    let base_url = mock_server.uri();
    let fetcher = Arc::new(test_fetcher());
    let client = Arc::new(SiteClient::new(None));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        let fetcher = Arc::clone(&fetcher);
        let site = base_url.clone();
        handles.push(tokio::spawn(async move {
            client.fetch_and_cache(&site, fetcher.as_ref()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.disallowed_paths(), EXPECTED_PATHS);
}
