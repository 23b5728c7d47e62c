// Integration tests for incident submission

use crate::common::*;
use incident_relay::core::errors::RelayError;
use incident_relay::session::{establish, submit, Session};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::StatusCode;
use serde_json::json;

async fn logged_in(server: &mut ServerGuard) -> Session {
    let _root = mock_root(server, XSRF_TOKEN).await;
    let _login = mock_login(server, XSRF_TOKEN, 200).await;
    establish(&server.url(), &test_credentials(), &test_transport())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_submit_success() {
    let mut server = Server::new_async().await;
    let session = logged_in(&mut server).await;
    let incident = mock_incident(&mut server, XSRF_TOKEN, 200).await;

    let result = submit(&session, &test_incident()).await;

    incident.assert_async().await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_submit_sends_full_record() {
    let mut server = Server::new_async().await;
    let session = logged_in(&mut server).await;
    let incident = server
        .mock("POST", "/incident")
        .match_body(Matcher::PartialJson(json!({
            "name": "Alert X",
            "details": "d",
            "severity": 3,
            "createInvestigation": true,
            "labels": [{"type": "src", "value": "ids"}],
            "status": 0,
            "owner": "",
            "id": "",
            "version": 0,
            "type": "",
            "artifacts": [],
            "tasks": [],
            "evidence": [],
            "insights": 0
        })))
        .with_status(200)
        .create_async()
        .await;

    submit(&session, &test_incident()).await.unwrap();

    incident.assert_async().await;
}

#[tokio::test]
async fn test_submit_non_200_is_delivery_error() {
    let mut server = Server::new_async().await;
    let session = logged_in(&mut server).await;
    let incident = mock_incident(&mut server, XSRF_TOKEN, 500).await;

    let result = submit(&session, &test_incident()).await;

    incident.assert_async().await;
    let err = result.unwrap_err();
    assert!(
        matches!(err, RelayError::DeliveryError { status } if status == StatusCode::INTERNAL_SERVER_ERROR),
        "unexpected error {}",
        err
    );
    assert_eq!(err.to_string(), "Response 500 Internal Server Error");
    assert!(err.session_established());
}

#[tokio::test]
async fn test_submit_created_status_is_not_success() {
    let mut server = Server::new_async().await;
    let session = logged_in(&mut server).await;
    let _incident = mock_incident(&mut server, XSRF_TOKEN, 201).await;

    let result = submit(&session, &test_incident()).await;

    assert!(matches!(result, Err(RelayError::DeliveryError { .. })));
}

#[tokio::test]
async fn test_submit_ignores_response_body() {
    let mut server = Server::new_async().await;
    let session = logged_in(&mut server).await;
    let incident = server
        .mock("POST", "/incident")
        .with_status(200)
        .with_body("definitely not json")
        .create_async()
        .await;

    let result = submit(&session, &test_incident()).await;

    incident.assert_async().await;
    assert!(result.is_ok());
}
