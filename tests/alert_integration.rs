//! Integration tests for PagerDuty and OpsGenie notifiers against mock APIs.

mod common;

use isthisup::alert::{dispatch, NotifierError, OpsGenieNotifier, PagerDutyNotifier};
use isthisup::config::Platform;
use isthisup::target::Target;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn target() -> Target {
    Target::parse("https://www.example.com/health?probe=1").unwrap()
}

#[tokio::test]
async fn test_pagerduty_event_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/enqueue"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "routing_key": "routing-123",
            "event_action": "trigger",
            "dedup_key": "www-example-com",
            "payload": {
                "summary": "https://www.example.com/health?probe=1 is not responding",
                "source": "isThisUp",
                "severity": "critical"
            }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = PagerDutyNotifier::new("routing-123".to_string(), common::client())
        .with_endpoint(format!("{}/v2/enqueue", server.uri()));

    dispatch(&notifier, &target()).await.unwrap();
}

#[tokio::test]
async fn test_opsgenie_alert_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/alerts"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "GenieKey genie-456"))
        .and(body_json(json!({
            "message": "https://www.example.com/health?probe=1 is not responding",
            "priority": "P1",
            "alias": "www-example-com"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = OpsGenieNotifier::new("genie-456".to_string(), common::client())
        .with_endpoint(format!("{}/v2/alerts", server.uri()));

    dispatch(&notifier, &target()).await.unwrap();
}

#[tokio::test]
async fn test_status_400_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let notifier =
        PagerDutyNotifier::new("key".to_string(), common::client()).with_endpoint(server.uri());

    assert!(dispatch(&notifier, &target()).await.is_ok());
}

#[tokio::test]
async fn test_status_above_400_is_rejected() {
    for status in [401u16, 403, 429, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let notifier =
            OpsGenieNotifier::new("key".to_string(), common::client()).with_endpoint(server.uri());

        let err = dispatch(&notifier, &target()).await.unwrap_err();
        assert!(
            matches!(
                err,
                NotifierError::Rejected { platform: Platform::OpsGenie, status: s } if s == status
            ),
            "status {status}: {err}"
        );
    }
}

#[tokio::test]
async fn test_alert_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let notifier =
        PagerDutyNotifier::new("key".to_string(), common::client()).with_endpoint(server.uri());

    assert!(dispatch(&notifier, &target()).await.is_err());
}

#[tokio::test]
async fn test_unreachable_platform_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let notifier = PagerDutyNotifier::new("key".to_string(), common::client())
        .with_endpoint(format!("http://127.0.0.1:{}/v2/enqueue", port));

    let err = dispatch(&notifier, &target()).await.unwrap_err();
    assert!(matches!(
        err,
        NotifierError::Request {
            platform: Platform::PagerDuty,
            ..
        }
    ));
    assert!(err.to_string().starts_with("cannot alert with pagerduty"));
}
