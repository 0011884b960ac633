//! Cluster health evaluation.

use serde::Serialize;

use crate::cluster::ClusterDescriptor;
use crate::health::HealthPolicy;

/// Per-cluster decision.
///
/// `metric_value` is 0 when healthy and 1 when the cluster needs attention;
/// `notification` is present exactly when the cluster is unhealthy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_healthy: bool,
    pub metric_value: u8,
    pub notification: Option<String>,
}

impl Verdict {
    pub fn healthy() -> Self {
        Self {
            is_healthy: true,
            metric_value: 0,
            notification: None,
        }
    }

    pub fn needs_attention(message: String) -> Self {
        Self {
            is_healthy: false,
            metric_value: 1,
            notification: Some(message),
        }
    }
}

/// Decide whether a cluster needs attention under `policy`.
pub fn evaluate(cluster: &ClusterDescriptor, policy: &HealthPolicy) -> Verdict {
    if policy.allows(&cluster.state) {
        Verdict::healthy()
    } else {
        Verdict::needs_attention(format!(
            "MSK cluster {} needs attention. The status is {}",
            cluster.name, cluster.state
        ))
    }
}
