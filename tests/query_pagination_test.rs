mod common;

use anyhow::Result;
use common::*;
use httpmock::prelude::*;
use oslc_client::core::query::{members, next_page_link};
use oslc_client::{CursorState, OslcClient, QuerySpec, ReqwestTransport};

/// 分頁查詢：第一頁帶 oslc.paging 參數，之後沿著 oslc:nextPage 前進直到耗盡
#[tokio::test]
async fn test_query_follows_next_page_until_exhausted() -> Result<()> {
    let server = MockServer::start();
    let page2_url = server.url("/query/cr/page2");

    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/query/cr")
            .query_param("oslc.paging", "true")
            .query_param("oslc.pageSize", "2")
            .query_param("oslc.where", "dcterms:identifier=\"7\"")
            .header("accept", "application/rdf+xml")
            .header_missing("oslc-core-version");
        then.status(200).body(result_page(
            &server.url("/query/cr"),
            &["https://example.com/cr/1", "https://example.com/cr/2"],
            Some(&page2_url),
        ));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/query/cr/page2")
            .header_missing("oslc-core-version");
        then.status(200).body(result_page(
            &page2_url,
            &["https://example.com/cr/3"],
            None,
        ));
    });

    let client = OslcClient::new(ReqwestTransport::new());
    let spec = QuerySpec::new(server.url("/query/cr"))
        .page_size(2)
        .where_clause("dcterms:identifier=\"7\"");
    let mut query = client.query(spec);

    assert_eq!(query.state(), CursorState::Unexecuted);
    assert!(query.has_next_page());

    let page = query.get_response().await?;
    assert_eq!(query.state(), CursorState::HasResults);
    assert_eq!(members(&page).len(), 2);
    assert_eq!(next_page_link(&page), Some(page2_url.clone()));
    assert!(query.has_next_page());

    let page = query.next_page().await?.expect("second page");
    assert_eq!(members(&page), vec!["https://example.com/cr/3"]);
    assert_eq!(query.query_url(), page2_url);
    assert!(!query.has_next_page());

    assert!(query.next_page().await?.is_none());
    assert_eq!(query.state(), CursorState::Exhausted);
    assert!(query.next_page().await?.is_none());

    first.assert_hits(1);
    second.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_next_page_before_execution_fetches_first_page() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/query/all");
        then.status(200).body(result_page(
            &server.url("/query/all"),
            &["https://example.com/r/1"],
            None,
        ));
    });

    let client = OslcClient::new(ReqwestTransport::new());
    let mut query = client.query(QuerySpec::new(server.url("/query/all")));
    assert_eq!(query.query_url(), server.url("/query/all"));

    let page = query.next_page().await?.expect("first page");
    assert_eq!(members(&page), vec!["https://example.com/r/1"]);
    assert!(query.last_result().is_some());

    // get_response re-fetches the current URL.
    query.get_response().await?;
    mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_failed_page_keeps_previous_result() -> Result<()> {
    let server = MockServer::start();
    let page2_url = server.url("/query/broken");
    server.mock(|when, then| {
        when.method(GET).path("/query/ok");
        then.status(200)
            .body(result_page(&server.url("/query/ok"), &[], Some(&page2_url)));
    });
    server.mock(|when, then| {
        when.method(GET).path("/query/broken");
        then.status(500);
    });

    let client = OslcClient::new(ReqwestTransport::new());
    let mut query = client.query(QuerySpec::new(server.url("/query/ok")));
    query.get_response().await?;

    assert!(query.next_page().await.is_err());
    assert_eq!(query.state(), CursorState::HasResults);
    assert_eq!(
        query.last_result().and_then(next_page_link),
        Some(page2_url)
    );
    Ok(())
}
