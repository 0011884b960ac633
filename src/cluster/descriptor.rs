//! Cluster descriptor as returned by the cluster-management API.

use serde::Serialize;

use crate::cluster::{ClusterArn, ClusterState};

/// Snapshot of a single cluster at describe time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterDescriptor {
    pub arn: ClusterArn,
    /// Human-readable cluster name.
    pub name: String,
    /// Owning account, parsed from the identifier.
    pub account_id: Option<String>,
    pub state: ClusterState,
}

impl ClusterDescriptor {
    pub fn new(arn: ClusterArn, name: impl Into<String>, state: ClusterState) -> Self {
        let account_id = arn.account_id().map(str::to_string);
        Self {
            arn,
            name: name.into(),
            account_id,
            state,
        }
    }

    /// Account id for log output, `unknown` when the identifier has none.
    pub fn account_label(&self) -> &str {
        self.account_id.as_deref().unwrap_or("unknown")
    }
}
