//! In-process collaborators for tests and offline runs.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::clients::{ClientError, ClientResult, ClusterManager, MetricDatum, MetricsSink, Notifier};
use crate::cluster::{ClusterArn, ClusterDescriptor};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixed cluster inventory with injectable describe failures.
#[derive(Debug, Default)]
pub struct InMemoryClusterManager {
    clusters: Vec<ClusterDescriptor>,
    failing: HashSet<ClusterArn>,
    list_fails: bool,
    describe_calls: Mutex<Vec<ClusterArn>>,
}

impl InMemoryClusterManager {
    pub fn new(clusters: Vec<ClusterDescriptor>) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }

    /// Make `describe_cluster` fail for `arn`.
    pub fn fail_describe(mut self, arn: impl Into<ClusterArn>) -> Self {
        self.failing.insert(arn.into());
        self
    }

    /// Make `list_clusters` fail.
    pub fn fail_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    /// ARNs passed to `describe_cluster`, in call order.
    pub fn describe_calls(&self) -> Vec<ClusterArn> {
        lock(&self.describe_calls).clone()
    }
}

#[async_trait]
impl ClusterManager for InMemoryClusterManager {
    async fn list_clusters(&self) -> ClientResult<Vec<ClusterArn>> {
        if self.list_fails {
            return Err(ClientError::Other("list clusters unavailable".to_string()));
        }
        Ok(self.clusters.iter().map(|c| c.arn.clone()).collect())
    }

    async fn describe_cluster(&self, arn: &ClusterArn) -> ClientResult<ClusterDescriptor> {
        lock(&self.describe_calls).push(arn.clone());
        if self.failing.contains(arn) {
            return Err(ClientError::Status {
                service: "cluster API",
                status: 500,
                body: "InternalServerError".to_string(),
            });
        }
        self.clusters
            .iter()
            .find(|c| &c.arn == arn)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                service: "cluster API",
                status: 404,
                body: format!("NotFoundException: {}", arn),
            })
    }
}

/// Captures every datum it receives.
#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    data: Mutex<Vec<MetricDatum>>,
    fails: bool,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Self::default()
        }
    }

    pub fn data(&self) -> Vec<MetricDatum> {
        lock(&self.data).clone()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    async fn put_metric(&self, datum: &MetricDatum) -> ClientResult<()> {
        if self.fails {
            return Err(ClientError::Other("metrics sink unavailable".to_string()));
        }
        lock(&self.data).push(datum.clone());
        Ok(())
    }
}

/// A published notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub subject: String,
    pub message: String,
}

/// Captures every notification it is asked to publish.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Published>>,
    fails: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Published> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn publish(&self, topic: &str, subject: &str, message: &str) -> ClientResult<()> {
        if self.fails {
            return Err(ClientError::Other("notifier unavailable".to_string()));
        }
        lock(&self.sent).push(Published {
            topic: topic.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
