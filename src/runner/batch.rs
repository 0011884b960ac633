//! Batch driver: one sequential pass over the cluster list.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::clients::{ClusterManager, DescribeError, MetricDatum, MetricsSink, Notifier};
use crate::cluster::ClusterArn;
use crate::config::HealthCheckConfig;
use crate::health::{evaluate, HealthPolicy};
use crate::observability::metrics;
use crate::runner::report::{BatchReport, ClusterOutcome, ClusterReport, InvocationResponse};

/// Checks every configured (or discovered) cluster once per call.
pub struct HealthCheckRunner {
    config: HealthCheckConfig,
    policy: HealthPolicy,
    clusters: Arc<dyn ClusterManager>,
    metrics: Arc<dyn MetricsSink>,
    notifier: Arc<dyn Notifier>,
}

impl HealthCheckRunner {
    pub fn new(
        config: HealthCheckConfig,
        clusters: Arc<dyn ClusterManager>,
        metrics: Arc<dyn MetricsSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let policy = HealthPolicy::from_config(&config.policy);
        Self {
            config,
            policy,
            clusters,
            metrics,
            notifier,
        }
    }

    pub fn config(&self) -> &HealthCheckConfig {
        &self.config
    }

    pub fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    /// Entry point for the scheduling trigger. The event is ignored and the
    /// response is always `200 OK`; per-cluster failures only show in the log.
    pub async fn invoke(&self, _event: serde_json::Value) -> InvocationResponse {
        let report = self.run_batch().await;
        tracing::info!(
            checked = report.checked(),
            healthy = report.healthy(),
            needs_attention = report.needs_attention(),
            failed = report.failed(),
            "Health check finished"
        );
        InvocationResponse::ok()
    }

    /// Check every cluster and collect the outcomes.
    pub async fn run_batch(&self) -> BatchReport {
        let span = tracing::info_span!("health_check", run_id = %Uuid::new_v4());
        async {
            tracing::info!(
                "Notifications suppressed for these MSK states: {}",
                self.policy.describe()
            );

            let arns = self.cluster_arns().await;
            let mut report = BatchReport::default();
            for arn in &arns {
                report.outcomes.push(self.check_cluster(arn).await);
            }

            metrics::record_run(report.checked());
            report
        }
        .instrument(span)
        .await
    }

    /// Identifiers to check: discovered when discovery is on, configured otherwise.
    async fn cluster_arns(&self) -> Vec<ClusterArn> {
        if !self.config.clusters.discover {
            return self
                .config
                .clusters
                .arns
                .iter()
                .map(|arn| ClusterArn::new(arn.as_str()))
                .collect();
        }

        match self.clusters.list_clusters().await {
            Ok(arns) => {
                tracing::info!(count = arns.len(), "Discovered clusters");
                arns
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list clusters, nothing to check");
                Vec::new()
            }
        }
    }

    /// Describe, evaluate and report a single cluster.
    pub async fn check_cluster(&self, arn: &ClusterArn) -> ClusterOutcome {
        if self.config.cluster_api.endpoint.is_none() {
            if let Some(region) = arn.region().filter(|r| *r != self.config.clusters.region) {
                tracing::warn!(
                    arn = %arn,
                    region,
                    endpoint_region = %self.config.clusters.region,
                    "Cluster is outside the region of the cluster API endpoint"
                );
            }
        }

        let descriptor = match self.clusters.describe_cluster(arn).await {
            Ok(descriptor) => descriptor,
            Err(source) => {
                let err = DescribeError {
                    arn: arn.clone(),
                    source,
                };
                tracing::error!(arn = %arn, error = %err.source, "{}", err);
                let cluster = arn.cluster_name().unwrap_or(arn.as_str());
                metrics::record_describe_failure(cluster, arn.as_str());
                return Err(err);
            }
        };
        metrics::record_cluster_described(&descriptor.name);

        if !descriptor.state.is_known() {
            tracing::warn!(
                arn = %arn,
                state = %descriptor.state,
                "Cluster reported a state this version does not recognize"
            );
        }

        tracing::info!(
            cluster = %descriptor.name,
            account = descriptor.account_label(),
            state = %descriptor.state,
            "The cluster {} in account {} is in state {}.",
            descriptor.name,
            descriptor.account_label(),
            descriptor.state
        );

        let verdict = evaluate(&descriptor, &self.policy);
        if verdict.is_healthy {
            tracing::info!(
                "The MSK cluster {} is in a healthy state, and is reachable and available for use.",
                arn
            );
        } else {
            tracing::warn!(state = %descriptor.state, "The MSK cluster {} needs attention.", arn);
        }

        let mut report = ClusterReport {
            descriptor,
            verdict,
            metric_error: None,
            notification_error: None,
            notified: false,
        };

        if self.config.metrics.enabled {
            let datum = MetricDatum::cluster_status(
                &self.config.metrics.namespace,
                &self.config.metrics.metric_name,
                &report.descriptor.name,
                report.verdict.metric_value,
            );
            if let Err(e) = self.metrics.put_metric(&datum).await {
                tracing::error!(arn = %arn, error = %e, "Failed to put cluster status metric");
                report.metric_error = Some(e);
            }
        }

        if self.config.notifications.enabled {
            if let Some(message) = &report.verdict.notification {
                let notifications = &self.config.notifications;
                match self
                    .notifier
                    .publish(&notifications.topic, &notifications.subject, message)
                    .await
                {
                    Ok(()) => {
                        report.notified = true;
                        metrics::record_notification(true);
                    }
                    Err(e) => {
                        tracing::error!(
                            arn = %arn,
                            notifier = self.notifier.name(),
                            error = %e,
                            "Failed to publish notification"
                        );
                        metrics::record_notification(false);
                        report.notification_error = Some(e);
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::memory::{InMemoryClusterManager, RecordingMetricsSink, RecordingNotifier};
    use crate::clients::PrometheusMetricsSink;
    use crate::cluster::{ClusterDescriptor, ClusterState};
    use metrics_exporter_prometheus::PrometheusBuilder;

    const ORDERS: &str = "arn:aws:kafka:eu-central-1:123456789012:cluster/orders/aaa-1";
    const PAYMENTS: &str = "arn:aws:kafka:eu-central-1:123456789012:cluster/payments/bbb-2";
    const AUDIT: &str = "arn:aws:kafka:eu-central-1:210987654321:cluster/audit/ccc-3";

    fn descriptor(arn: &str, state: ClusterState) -> ClusterDescriptor {
        let arn = ClusterArn::new(arn);
        let name = arn.cluster_name().unwrap_or_default().to_string();
        ClusterDescriptor::new(arn, name, state)
    }

    fn config(arns: &[&str], suppressed: &[&str]) -> HealthCheckConfig {
        let mut config = HealthCheckConfig::default();
        config.clusters.arns = arns.iter().map(|s| s.to_string()).collect();
        config.policy.suppressed_states = suppressed.iter().map(|s| s.to_string()).collect();
        config.notifications.topic = "arn:aws:sns:eu-central-1:123456789012:msk-alerts".into();
        config
    }

    struct Harness {
        runner: HealthCheckRunner,
        clusters: Arc<InMemoryClusterManager>,
        metrics: Arc<RecordingMetricsSink>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(config: HealthCheckConfig, clusters: InMemoryClusterManager) -> Harness {
        harness_with(config, clusters, RecordingMetricsSink::new(), RecordingNotifier::new())
    }

    fn harness_with(
        config: HealthCheckConfig,
        clusters: InMemoryClusterManager,
        metrics: RecordingMetricsSink,
        notifier: RecordingNotifier,
    ) -> Harness {
        let clusters = Arc::new(clusters);
        let metrics = Arc::new(metrics);
        let notifier = Arc::new(notifier);
        let runner =
            HealthCheckRunner::new(config, clusters.clone(), metrics.clone(), notifier.clone());
        Harness {
            runner,
            clusters,
            metrics,
            notifier,
        }
    }

    #[tokio::test]
    async fn test_healthy_cluster_emits_zero_and_no_notification() {
        let h = harness(
            config(&[ORDERS], &[]),
            InMemoryClusterManager::new(vec![descriptor(ORDERS, ClusterState::Active)]),
        );

        let report = h.runner.run_batch().await;

        assert_eq!(report.healthy(), 1);
        let data = h.metrics.data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].namespace, "Custom/Kafka");
        assert_eq!(data[0].metric_name, "Status");
        assert_eq!(data[0].dimensions, vec![("ClusterName".to_string(), "orders".to_string())]);
        assert_eq!(data[0].value, 0.0);
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_cluster_emits_one_and_notifies() {
        let h = harness(
            config(&[ORDERS], &["MAINTENANCE"]),
            InMemoryClusterManager::new(vec![descriptor(ORDERS, ClusterState::Failed)]),
        );

        let report = h.runner.run_batch().await;

        assert_eq!(report.needs_attention(), 1);
        assert!(report.reports().next().unwrap().notified);
        assert_eq!(h.metrics.data()[0].value, 1.0);
        let sent = h.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].topic, "arn:aws:sns:eu-central-1:123456789012:msk-alerts");
        assert_eq!(sent[0].subject, "MSK Health Warning!");
        assert!(sent[0].message.contains("orders"));
        assert!(sent[0].message.contains("FAILED"));
    }

    #[tokio::test]
    async fn test_describe_failure_skips_cluster_and_continues() {
        let h = harness(
            config(&[ORDERS, PAYMENTS, AUDIT], &[]),
            InMemoryClusterManager::new(vec![
                descriptor(ORDERS, ClusterState::Active),
                descriptor(PAYMENTS, ClusterState::Active),
                descriptor(AUDIT, ClusterState::Creating),
            ])
            .fail_describe(PAYMENTS),
        );

        let response = h.runner.invoke(serde_json::json!({})).await;
        assert_eq!(response, InvocationResponse::ok());

        let report = h.runner.run_batch().await;
        assert_eq!(report.len(), 3);
        assert_eq!(report.checked(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().unwrap().arn.as_str(), PAYMENTS);
        assert!(report.outcomes[0].is_ok());
        assert!(report.outcomes[1].is_err());
        assert!(report.outcomes[2].is_ok());
        assert_eq!(h.clusters.describe_calls().len(), 6);
    }

    #[tokio::test]
    async fn test_disabled_emitters() {
        let mut config = config(&[ORDERS], &[]);
        config.metrics.enabled = false;
        config.notifications.enabled = false;
        let h = harness(
            config,
            InMemoryClusterManager::new(vec![descriptor(ORDERS, ClusterState::Deleting)]),
        );

        let report = h.runner.run_batch().await;

        assert_eq!(report.needs_attention(), 1);
        assert!(h.metrics.data().is_empty());
        assert!(h.notifier.sent().is_empty());
        assert!(!report.reports().next().unwrap().notified);
    }

    #[tokio::test]
    async fn test_emitter_failures_are_recorded_not_fatal() {
        let h = harness_with(
            config(&[ORDERS, PAYMENTS], &[]),
            InMemoryClusterManager::new(vec![
                descriptor(ORDERS, ClusterState::Failed),
                descriptor(PAYMENTS, ClusterState::Failed),
            ]),
            RecordingMetricsSink::failing(),
            RecordingNotifier::failing(),
        );

        let report = h.runner.run_batch().await;

        assert_eq!(report.checked(), 2);
        for cluster in report.reports() {
            assert!(cluster.metric_error.is_some());
            assert!(cluster.notification_error.is_some());
            assert!(!cluster.notified);
        }
    }

    #[tokio::test]
    async fn test_discovery_mode() {
        let mut config = config(&[], &[]);
        config.clusters.discover = true;
        let h = harness(
            config,
            InMemoryClusterManager::new(vec![
                descriptor(ORDERS, ClusterState::Active),
                descriptor(AUDIT, ClusterState::Maintenance),
            ]),
        );

        let report = h.runner.run_batch().await;

        assert_eq!(report.checked(), 2);
        assert_eq!(report.needs_attention(), 1);
        assert_eq!(
            h.clusters.describe_calls(),
            vec![ClusterArn::new(ORDERS), ClusterArn::new(AUDIT)]
        );
    }

    #[tokio::test]
    async fn test_discovery_failure_yields_empty_batch() {
        let mut config = config(&[], &[]);
        config.clusters.discover = true;
        let h = harness(config, InMemoryClusterManager::new(vec![]).fail_list());

        let report = h.runner.run_batch().await;
        assert!(report.is_empty());
        assert_eq!(h.runner.invoke(serde_json::Value::Null).await, InvocationResponse::ok());
    }

    #[test]
    fn test_failed_describe_is_labeled_next_to_the_last_status() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let sink: Arc<dyn MetricsSink> = Arc::new(PrometheusMetricsSink::new());
        let runner_for = |clusters: InMemoryClusterManager| {
            HealthCheckRunner::new(
                config(&[ORDERS], &[]),
                Arc::new(clusters),
                sink.clone(),
                Arc::new(RecordingNotifier::new()),
            )
        };
        let reachable =
            runner_for(InMemoryClusterManager::new(vec![descriptor(ORDERS, ClusterState::Active)]));
        let unreachable = runner_for(InMemoryClusterManager::new(vec![]).fail_describe(ORDERS));

        let failed = ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                reachable.run_batch().await;
                unreachable.run_batch().await.failed()
            })
        });
        assert_eq!(failed, 1);

        let rendered = handle.render();
        let lines: Vec<&str> = rendered.lines().filter(|l| !l.starts_with('#')).collect();
        assert!(lines.contains(&r#"custom_kafka_status{ClusterName="orders"} 0"#), "{rendered}");
        assert!(
            lines.iter().any(|l| l.starts_with("msk_health_describe_failures_total{")
                && l.contains(r#"ClusterName="orders""#)
                && l.contains(ORDERS)),
            "{rendered}"
        );
        assert!(
            lines.iter().any(|l| l.starts_with(
                r#"msk_health_cluster_last_success_timestamp_seconds{ClusterName="orders"}"#
            )),
            "{rendered}"
        );
    }
}
