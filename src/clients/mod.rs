//! External collaborators.
//!
//! # Data Flow
//! ```text
//! runner
//!     → ClusterManager (msk.rs: list / describe over REST)
//!     → MetricsSink   (metrics.rs: one status gauge per cluster)
//!     → Notifier      (webhook.rs: publish warning; log-only for dry runs)
//!
//! memory.rs provides in-process doubles of all three.
//! ```
//!
//! # Design Decisions
//! - Every collaborator sits behind a trait so the runner is testable offline
//! - Calls are not retried; the runner decides what a failure means

pub mod error;
pub mod memory;
pub mod metrics;
pub mod msk;
pub mod webhook;

use async_trait::async_trait;
use serde::Serialize;

use crate::cluster::{ClusterArn, ClusterDescriptor};

pub use self::error::{ClientError, ClientResult, DescribeError};
pub use self::metrics::PrometheusMetricsSink;
pub use self::msk::MskRestClient;
pub use self::webhook::{LogNotifier, WebhookNotifier};

/// Cluster-management API.
#[async_trait]
pub trait ClusterManager: Send + Sync {
    /// Identifiers of every cluster visible to the caller.
    async fn list_clusters(&self) -> ClientResult<Vec<ClusterArn>>;

    /// Current descriptor of one cluster.
    async fn describe_cluster(&self, arn: &ClusterArn) -> ClientResult<ClusterDescriptor>;
}

/// A single metric data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDatum {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<(String, String)>,
    pub value: f64,
}

impl MetricDatum {
    /// Cluster status datum with a single `ClusterName` dimension.
    pub fn cluster_status(
        namespace: impl Into<String>,
        metric_name: impl Into<String>,
        cluster_name: &str,
        value: u8,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            dimensions: vec![("ClusterName".to_string(), cluster_name.to_string())],
            value: f64::from(value),
        }
    }
}

/// Metrics ingestion.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn put_metric(&self, datum: &MetricDatum) -> ClientResult<()>;
}

/// Notification fan-out.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    async fn publish(&self, topic: &str, subject: &str, message: &str) -> ClientResult<()>;
}
