//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the health
//! check. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the cluster health check.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Which clusters to check.
    pub clusters: ClustersConfig,

    /// Cluster-management API settings.
    pub cluster_api: ClusterApiConfig,

    /// States that do not need attention.
    pub policy: PolicyConfig,

    /// Health metric emission.
    pub metrics: MetricsConfig,

    /// Notification settings.
    pub notifications: NotificationConfig,

    /// Interval for watch mode.
    pub schedule: ScheduleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl HealthCheckConfig {
    /// Base URL of the cluster API: the configured endpoint, or the regional
    /// `https://kafka.<region>.amazonaws.com` when none is set.
    pub fn cluster_api_endpoint(&self) -> String {
        match &self.cluster_api.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://kafka.{}.amazonaws.com", self.clusters.region),
        }
    }
}

/// Cluster selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClustersConfig {
    /// Explicit cluster ARNs. Checked in this order.
    pub arns: Vec<String>,

    /// Enumerate clusters through the list API instead of `arns`.
    pub discover: bool,

    /// Provider region the clusters live in. Picks the default API endpoint.
    pub region: String,
}

impl Default for ClustersConfig {
    fn default() -> Self {
        Self {
            arns: Vec::new(),
            discover: false,
            region: "eu-central-1".to_string(),
        }
    }
}

/// Which describe/list call generation to use.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

/// Cluster-management API client settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClusterApiConfig {
    /// Base URL of the cluster-management REST API. Derived from
    /// `clusters.region` when unset.
    pub endpoint: Option<String>,

    pub api_version: ApiVersion,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClusterApiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_version: ApiVersion::V2,
            timeout_secs: 10,
        }
    }
}

/// Health policy inputs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    /// The state that is healthy by definition.
    pub primary_state: String,

    /// States that should not trigger a notification.
    pub suppressed_states: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            primary_state: "ACTIVE".to_string(),
            suppressed_states: Vec::new(),
        }
    }
}

/// Health metric settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Emit one status datum per cluster.
    pub enabled: bool,

    pub namespace: String,

    pub metric_name: String,

    /// Prometheus exporter bind address. No exporter when unset.
    pub exporter_address: Option<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: "Custom/Kafka".to_string(),
            metric_name: "Status".to_string(),
            exporter_address: None,
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Publish a warning for every cluster that needs attention.
    pub enabled: bool,

    /// Topic identifier the warning is published to.
    pub topic: String,

    pub subject: String,

    /// Webhook the publisher POSTs to. Notifications are only logged when unset.
    pub webhook_url: Option<String>,

    /// Webhook request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            topic: String::new(),
            subject: "MSK Health Warning!".to_string(),
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

/// Watch mode schedule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between runs.
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HealthCheckConfig::default();
        assert!(config.metrics.enabled);
        assert!(config.notifications.enabled);
        assert_eq!(config.metrics.namespace, "Custom/Kafka");
        assert_eq!(config.metrics.metric_name, "Status");
        assert_eq!(config.notifications.subject, "MSK Health Warning!");
        assert_eq!(config.policy.primary_state, "ACTIVE");
        assert_eq!(config.cluster_api.api_version, ApiVersion::V2);
        assert_eq!(config.cluster_api_endpoint(), "https://kafka.eu-central-1.amazonaws.com");
    }

    #[test]
    fn test_explicit_endpoint_wins_over_region() {
        let mut config = HealthCheckConfig::default();
        config.clusters.region = "us-east-1".into();
        assert_eq!(config.cluster_api_endpoint(), "https://kafka.us-east-1.amazonaws.com");

        config.cluster_api.endpoint = Some("http://localhost:4566".into());
        assert_eq!(config.cluster_api_endpoint(), "http://localhost:4566");
    }

    #[test]
    fn test_partial_toml() {
        let config: HealthCheckConfig = toml::from_str(
            r#"
            [clusters]
            arns = ["arn:aws:kafka:eu-central-1:123456789012:cluster/orders/abc-1"]

            [cluster_api]
            api_version = "v1"

            [policy]
            suppressed_states = ["MAINTENANCE"]
            "#,
        )
        .unwrap();
        assert_eq!(config.clusters.arns.len(), 1);
        assert_eq!(config.clusters.region, "eu-central-1");
        assert_eq!(config.cluster_api.api_version, ApiVersion::V1);
        assert_eq!(config.cluster_api.timeout_secs, 10);
        assert_eq!(config.policy.suppressed_states, vec!["MAINTENANCE"]);
        assert_eq!(config.policy.primary_state, "ACTIVE");
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: HealthCheckConfig =
            toml::from_str(include_str!("../../msk-health.example.toml")).unwrap();
        assert_eq!(crate::config::validation::validate_config(&config), Ok(()));
        assert_eq!(config.metrics.exporter_address.as_deref(), Some("0.0.0.0:9090"));
    }
}
