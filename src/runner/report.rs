//! Batch results and the invocation response.

use serde::Serialize;

use crate::clients::{ClientError, DescribeError};
use crate::cluster::ClusterDescriptor;
use crate::health::Verdict;

/// One successfully described cluster.
#[derive(Debug)]
pub struct ClusterReport {
    pub descriptor: ClusterDescriptor,
    pub verdict: Verdict,
    /// Set when the status datum could not be recorded.
    pub metric_error: Option<ClientError>,
    /// Set when the warning could not be published.
    pub notification_error: Option<ClientError>,
    /// A warning was published for this cluster.
    pub notified: bool,
}

pub type ClusterOutcome = Result<ClusterReport, DescribeError>;

/// Outcomes of one pass over the cluster list, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ClusterOutcome>,
}

impl BatchReport {
    pub fn checked(&self) -> usize {
        self.reports().count()
    }

    pub fn healthy(&self) -> usize {
        self.reports().filter(|r| r.verdict.is_healthy).count()
    }

    pub fn needs_attention(&self) -> usize {
        self.reports().filter(|r| !r.verdict.is_healthy).count()
    }

    /// Clusters skipped because they could not be described.
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn reports(&self) -> impl Iterator<Item = &ClusterReport> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &DescribeError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Value returned to the invoker. Always `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: "OK".to_string(),
        }
    }
}
