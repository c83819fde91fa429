//! DuckDuckGo client against a mockito server.

use std::time::Duration;

use mockito::Matcher;
use web_search::{DuckDuckGoSearch, SearchResult, WebSearchProvider};

const RESULTS_PAGE: &str = r#"
<html><body>
<div class="result results_links results_links_deep web-result">
  <h2 class="result__title">
    <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rbi.org.in%2Frepo&amp;rut=1">RBI repo rate</a>
  </h2>
  <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x">The <b>repo rate</b> stands at 6.50%.</a>
</div>
<div class="result results_links results_links_deep result--ad">
  <a rel="nofollow" class="result__a" href="https://duckduckgo.com/y.js?ad_provider=bing">Sponsored loans</a>
  <a class="result__snippet" href="https://duckduckgo.com/y.js?ad_provider=bing">Apply now</a>
</div>
<div class="result results_links results_links_deep web-result">
  <a rel="nofollow" class="result__a" href="https://bank.example.com/home-loan">Home loan rates</a>
  <div class="result__snippet">Home loans from 8.40% p.a. &amp; up</div>
</div>
<div class="result results_links results_links_deep web-result">
  <a rel="nofollow" class="result__a" href="https://news.example.com/emi">EMI news</a>
  <td class="result__snippet">EMIs expected to fall</td>
</div>
<div class="result results_links results_links_deep web-result">
  <a rel="nofollow" class="result__a" href="https://fourth.example.com/">Fourth</a>
  <a class="result__snippet" href="https://fourth.example.com/">Fourth snippet</a>
</div>
</body></html>
"#;

fn client(server: &mockito::ServerGuard) -> DuckDuckGoSearch {
    DuckDuckGoSearch::with_base_url(&server.url(), Duration::from_secs(5)).unwrap()
}

/// **Test: Results are parsed in page order, ads skipped, redirect links unwrapped**
///
/// **Setup:** Mock `/html/` returning a page with an ad between organic results.
/// **Action:** `search("repo rate", 10)`.
/// **Expected:** Four organic results with decoded snippets and real target URLs.
#[tokio::test]
async fn test_search_parses_results_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/html/")
        .match_query(Matcher::UrlEncoded("q".into(), "repo rate".into()))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(RESULTS_PAGE)
        .create_async()
        .await;

    let results = client(&server).search("repo rate", 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        results,
        vec![
            SearchResult::new(
                "The repo rate stands at 6.50%.",
                "https://www.rbi.org.in/repo"
            ),
            SearchResult::new(
                "Home loans from 8.40% p.a. & up",
                "https://bank.example.com/home-loan"
            ),
            SearchResult::new("EMIs expected to fall", "https://news.example.com/emi"),
            SearchResult::new("Fourth snippet", "https://fourth.example.com/"),
        ]
    );
}

/// **Test: At most `max_results` hits are returned, keeping rank order**
#[tokio::test]
async fn test_search_caps_results() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/html/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(RESULTS_PAGE)
        .create_async()
        .await;

    let results = client(&server).search("loans", 3).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].source_url, "https://www.rbi.org.in/repo");
    assert_eq!(results[2].source_url, "https://news.example.com/emi");
}

/// **Test: A page without results yields an empty list, not an error**
#[tokio::test]
async fn test_search_no_results_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/html/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body><div class=\"no-results\">No results.</div></body></html>")
        .create_async()
        .await;

    let results = client(&server).search("zzzz", 3).await.unwrap();
    assert!(results.is_empty());
}

/// **Test: Zero `max_results` short-circuits without a request**
#[tokio::test]
async fn test_search_zero_max_results_skips_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let results = client(&server).search("anything", 0).await.unwrap();

    assert!(results.is_empty());
    mock.assert_async().await;
}

/// **Test: Non-success status surfaces as an error**
#[tokio::test]
async fn test_search_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/html/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = client(&server).search("repo rate", 3).await.unwrap_err();
    assert!(err.to_string().contains("500"), "{}", err);
}
