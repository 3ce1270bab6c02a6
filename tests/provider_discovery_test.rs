mod common;

use anyhow::Result;
use common::*;
use httpmock::prelude::*;
use oslc_client::utils::error::ErrorSeverity;
use oslc_client::{CapabilityKind, CapabilityRequest, OslcClient, OslcError, ReqwestTransport};

fn client() -> OslcClient<ReqwestTransport> {
    OslcClient::new(ReqwestTransport::new())
}

/// 依標題從目錄中找出服務提供者
#[tokio::test]
async fn test_lookup_service_provider_by_title() -> Result<()> {
    let server = MockServer::start();
    let catalog = server.mock(|when, then| {
        when.method(GET)
            .path("/catalog")
            .header("accept", "application/rdf+xml")
            .header("oslc-core-version", "2.0");
        then.status(200).body(catalog_xml(&server.base_url()));
    });

    let client = client();
    let found = client
        .lookup_service_provider_url(&server.url("/catalog"), "JKE Banking")
        .await?;
    assert_eq!(found, Some(server.url("/sp/1")));

    let missing = client
        .lookup_service_provider_url(&server.url("/catalog"), "Nope")
        .await?;
    assert_eq!(missing, None);

    catalog.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_query_capability_resolution_over_http() -> Result<()> {
    let server = MockServer::start();
    let provider = server.mock(|when, then| {
        when.method(GET).path("/sp/1");
        then.status(200).body(provider_xml(&server.base_url()));
    });

    let client = client();
    let sp = server.url("/sp/1");

    // 有型別時取完全符合者
    let typed = client
        .lookup_query_capability_uri(&sp, CM, Some(CHANGE_REQUEST))
        .await?;
    assert_eq!(typed, Some(server.url("/query/cr")));

    // 未指定型別時退回第一個無型別的能力
    let untyped = client.lookup_query_capability_uri(&sp, CM, None).await?;
    assert_eq!(untyped, Some(server.url("/query/all")));

    // 其他 domain 的能力不會被選中
    let rm = client.lookup_query_capability_uri(&sp, RM, None).await?;
    assert_eq!(rm, None);

    let unknown_domain = client
        .lookup_query_capability_uri(&sp, "http://example.com/ns/none#", None)
        .await?;
    assert_eq!(unknown_domain, None);

    // Every lookup fetches the description again.
    provider.assert_hits(4);
    Ok(())
}

#[tokio::test]
async fn test_creation_factory_tiers() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sp/1");
        then.status(200).body(provider_xml(&server.base_url()));
    });

    let client = client();
    let sp = server.url("/sp/1");

    let defect = client
        .lookup_creation_factory_uri(&sp, CM, Some(DEFECT), Some("http://example.com/ns#planItem"))
        .await?;
    assert_eq!(defect, Some(server.url("/create/defect")));

    // Usage mismatch drops the typed match; the default factory wins.
    let wrong_usage = client
        .lookup_creation_factory_uri(&sp, CM, Some(DEFECT), Some("http://example.com/ns#other"))
        .await?;
    assert_eq!(wrong_usage, Some(server.url("/create/default")));

    let unknown_type = client
        .lookup_creation_factory_uri(&sp, CM, Some("http://example.com/ns#Task"), None)
        .await?;
    assert_eq!(unknown_type, Some(server.url("/create/default")));

    let factory = client
        .lookup_creation_factory(&sp, CM, Some(CHANGE_REQUEST), None)
        .await?
        .expect("change request factory");
    assert!(factory.is_default());
    assert!(factory.applies_to(CHANGE_REQUEST));
    Ok(())
}

#[tokio::test]
async fn test_dialog_capabilities_carry_hints() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sp/1");
        then.status(200).body(provider_xml(&server.base_url()));
    });

    let client = client();
    let sp = server.url("/sp/1");

    let selection = client
        .lookup_selection_dialog(&sp, CM, Some(CHANGE_REQUEST))
        .await?
        .expect("selection dialog");
    assert_eq!(selection.action, server.url("/dialog/select"));
    assert_eq!(selection.title.as_deref(), Some("Select work item"));
    assert_eq!((selection.hint_width, selection.hint_height), (Some(600), Some(400)));

    // The only creation dialog is typed, so an untyped request finds nothing.
    let request = CapabilityRequest::new(CapabilityKind::CreationDialog, CM);
    assert!(client.lookup_capability(&sp, &request).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_provider_is_a_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sp/404");
        then.status(404).body("not here");
    });

    let err = client()
        .lookup_query_capability_uri(&server.url("/sp/404"), CM, None)
        .await
        .unwrap_err();

    match &err {
        OslcError::HttpStatus { status, body, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "not here");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.severity(), ErrorSeverity::Low);
}

#[tokio::test]
async fn test_malformed_description_is_a_document_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sp/broken");
        then.status(200).body("<rdf:RDF><unclosed>");
    });

    let err = client()
        .fetch_service_provider(&server.url("/sp/broken"))
        .await
        .unwrap_err();
    assert!(matches!(err, OslcError::Document { .. }));
}
