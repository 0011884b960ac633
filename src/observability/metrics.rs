//! Metrics collection and exposition.
//!
//! # Metrics
//! - `msk_health_runs_total` (counter): completed batch runs
//! - `msk_health_describe_failures_total` (counter): skipped clusters, by `ClusterName` and `arn`
//! - `msk_health_cluster_last_success_timestamp_seconds` (gauge): last successful describe,
//!   by `ClusterName`. A status gauge older than this stamp is stale.
//! - `msk_health_notifications_total` (counter): warnings published, by outcome
//! - `<namespace>_<metric_name>` (gauge): cluster status, 0=healthy, 1=needs attention
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op until an exporter is installed
//! - Prometheus exporter only runs when an address is configured

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use metrics::{counter, gauge, Label};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Prometheus-safe metric name for a namespaced metric.
///
/// `("Custom/Kafka", "Status")` becomes `custom_kafka_status`.
pub fn metric_key(namespace: &str, metric_name: &str) -> String {
    format!("{}_{}", namespace, metric_name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

pub fn record_gauge(name: String, labels: Vec<Label>, value: f64) {
    gauge!(name, labels).set(value);
}

pub fn record_run(clusters: usize) {
    counter!("msk_health_runs_total").increment(1);
    gauge!("msk_health_clusters_checked").set(clusters as f64);
}

pub fn record_describe_failure(cluster: &str, arn: &str) {
    counter!(
        "msk_health_describe_failures_total",
        "ClusterName" => cluster.to_string(),
        "arn" => arn.to_string()
    )
    .increment(1);
}

/// Stamp the current time as the last successful describe of `cluster`.
pub fn record_cluster_described(cluster: &str) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    gauge!(
        "msk_health_cluster_last_success_timestamp_seconds",
        "ClusterName" => cluster.to_string()
    )
    .set(now);
}

pub fn record_notification(delivered: bool) {
    let outcome = if delivered { "delivered" } else { "failed" };
    counter!("msk_health_notifications_total", "outcome" => outcome).increment(1);
}
