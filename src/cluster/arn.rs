//! Cluster identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider-assigned cluster identifier.
///
/// Shape: `arn:<partition>:kafka:<region>:<account>:cluster/<name>/<uuid>`.
/// The raw string is kept verbatim; segment accessors return `None` when the
/// identifier does not follow that shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterArn(String);

impl ClusterArn {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segment(&self, idx: usize) -> Option<&str> {
        self.0
            .splitn(6, ':')
            .nth(idx)
            .filter(|s| !s.is_empty())
    }

    /// Region segment (index 3).
    pub fn region(&self) -> Option<&str> {
        self.segment(3)
    }

    /// Owning account id (index 4).
    pub fn account_id(&self) -> Option<&str> {
        self.segment(4)
    }

    /// Cluster name from the `cluster/<name>/<uuid>` resource segment.
    pub fn cluster_name(&self) -> Option<&str> {
        let resource = self.segment(5)?;
        let mut parts = resource.split('/');
        match (parts.next(), parts.next()) {
            (Some("cluster"), Some(name)) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ClusterArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterArn {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClusterArn {
    fn from(s: String) -> Self {
        Self(s)
    }
}
