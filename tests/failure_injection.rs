//! Failure injection tests for the health check.

use std::sync::Arc;
use std::time::Duration;

use msk_health::clients::memory::{RecordingMetricsSink, RecordingNotifier};
use msk_health::clients::{ClientError, MskRestClient, WebhookNotifier};
use msk_health::config::HealthCheckConfig;
use msk_health::runner::{HealthCheckRunner, InvocationResponse};

mod common;

const ORDERS: &str = "arn:aws:kafka:eu-central-1:123456789012:cluster/orders/aaa-1";
const PAYMENTS: &str = "arn:aws:kafka:eu-central-1:123456789012:cluster/payments/bbb-2";
const AUDIT: &str = "arn:aws:kafka:eu-central-1:210987654321:cluster/audit/ccc-3";

fn config(endpoint: String, arns: &[&str]) -> HealthCheckConfig {
    let mut config = HealthCheckConfig::default();
    config.cluster_api.endpoint = Some(endpoint);
    config.cluster_api.timeout_secs = 2;
    config.clusters.arns = arns.iter().map(|s| s.to_string()).collect();
    config.notifications.topic = "arn:aws:sns:eu-central-1:123456789012:msk-alerts".to_string();
    config
}

#[tokio::test]
async fn test_describe_failure_for_one_of_three() {
    let (addr, _) = common::start_mock_api(|target| async move {
        if target.contains("payments") {
            (500, r#"{"message":"InternalServerErrorException"}"#.to_string())
        } else if target.contains("orders") {
            (200, common::describe_body(ORDERS, "orders", "ACTIVE"))
        } else {
            (200, common::describe_body(AUDIT, "audit", "FAILED"))
        }
    })
    .await;

    let config = config(format!("http://{}", addr), &[ORDERS, PAYMENTS, AUDIT]);
    let metrics = Arc::new(RecordingMetricsSink::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let runner = HealthCheckRunner::new(
        config.clone(),
        Arc::new(MskRestClient::new(&config).unwrap()),
        metrics.clone(),
        notifier.clone(),
    );

    assert_eq!(runner.invoke(serde_json::Value::Null).await, InvocationResponse::ok());
    assert_eq!(metrics.data().len(), 2, "the two described clusters are reported");
    assert_eq!(notifier.sent().len(), 1);

    let report = runner.run_batch().await;
    assert_eq!(report.checked(), 2);
    assert_eq!(report.failed(), 1);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.arn.as_str(), PAYMENTS);
    assert!(matches!(failure.source, ClientError::Status { status: 500, .. }));
    assert!(failure.to_string().contains(PAYMENTS));
}

#[tokio::test]
async fn test_unreachable_cluster_api() {
    let config = config("http://127.0.0.1:1".to_string(), &[ORDERS, PAYMENTS]);
    let runner = HealthCheckRunner::new(
        config.clone(),
        Arc::new(MskRestClient::new(&config).unwrap()),
        Arc::new(RecordingMetricsSink::new()),
        Arc::new(RecordingNotifier::new()),
    );

    let report = runner.run_batch().await;
    assert_eq!(report.failed(), 2);
    assert_eq!(report.checked(), 0);
    assert_eq!(runner.invoke(serde_json::Value::Null).await, InvocationResponse::ok());
}

#[tokio::test]
async fn test_malformed_describe_response() {
    let (addr, _) =
        common::start_mock_api(|_| async { (200, r#"{"clusterInfo":"nope"}"#.to_string()) }).await;
    let config = config(format!("http://{}", addr), &[ORDERS]);
    let runner = HealthCheckRunner::new(
        config.clone(),
        Arc::new(MskRestClient::new(&config).unwrap()),
        Arc::new(RecordingMetricsSink::new()),
        Arc::new(RecordingNotifier::new()),
    );

    let report = runner.run_batch().await;
    assert_eq!(report.failed(), 1);
    assert!(matches!(report.failures().next().unwrap().source, ClientError::Http(_)));
}

#[tokio::test]
async fn test_webhook_rejection_does_not_stop_batch() {
    let (api_addr, _) = common::start_mock_api(|target| async move {
        if target.contains("orders") {
            (200, common::describe_body(ORDERS, "orders", "FAILED"))
        } else {
            (200, common::describe_body(PAYMENTS, "payments", "DELETING"))
        }
    })
    .await;
    let (hook_addr, hook_requests) =
        common::start_mock_api(|_| async { (503, "unavailable".to_string()) }).await;

    let config = config(format!("http://{}", api_addr), &[ORDERS, PAYMENTS]);
    let notifier =
        WebhookNotifier::new(format!("http://{}/hook", hook_addr), Duration::from_secs(2)).unwrap();
    let metrics = Arc::new(RecordingMetricsSink::new());
    let runner = HealthCheckRunner::new(
        config.clone(),
        Arc::new(MskRestClient::new(&config).unwrap()),
        metrics.clone(),
        Arc::new(notifier),
    );

    let report = runner.run_batch().await;

    assert_eq!(report.needs_attention(), 2);
    assert_eq!(metrics.data().len(), 2);
    assert_eq!(hook_requests.lock().unwrap().len(), 2);
    for cluster in report.reports() {
        assert!(!cluster.notified);
        assert!(matches!(
            cluster.notification_error,
            Some(ClientError::Status { status: 503, .. })
        ));
    }
}
