//! Cluster lifecycle state.
//!
//! # States
//! - Active: cluster is reachable and available for use
//! - Creating / Updating / Healing / RebootingBroker / Maintenance: transitional
//! - Deleting / Failed: terminal or operator action required
//! - Unknown: any string the provider adds later, kept verbatim

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClusterState {
    Active,
    Creating,
    Deleting,
    Failed,
    Healing,
    Maintenance,
    RebootingBroker,
    Updating,
    Unknown(String),
}

impl ClusterState {
    /// Exact provider wire string.
    pub fn as_str(&self) -> &str {
        match self {
            ClusterState::Active => "ACTIVE",
            ClusterState::Creating => "CREATING",
            ClusterState::Deleting => "DELETING",
            ClusterState::Failed => "FAILED",
            ClusterState::Healing => "HEALING",
            ClusterState::Maintenance => "MAINTENANCE",
            ClusterState::RebootingBroker => "REBOOTING_BROKER",
            ClusterState::Updating => "UPDATING",
            ClusterState::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ClusterState::Unknown(_))
    }
}

impl From<&str> for ClusterState {
    fn from(raw: &str) -> Self {
        // Case-sensitive: "active" is not ACTIVE.
        match raw {
            "ACTIVE" => ClusterState::Active,
            "CREATING" => ClusterState::Creating,
            "DELETING" => ClusterState::Deleting,
            "FAILED" => ClusterState::Failed,
            "HEALING" => ClusterState::Healing,
            "MAINTENANCE" => ClusterState::Maintenance,
            "REBOOTING_BROKER" => ClusterState::RebootingBroker,
            "UPDATING" => ClusterState::Updating,
            other => ClusterState::Unknown(other.to_string()),
        }
    }
}

impl FromStr for ClusterState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ClusterState::from(s))
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClusterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClusterState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ClusterState::from(raw.as_str()))
    }
}
