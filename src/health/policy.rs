//! Allow-list of healthy cluster states.

use crate::cluster::ClusterState;
use crate::config::schema::PolicyConfig;

/// Ordered set of states that do not need attention.
///
/// The primary healthy state is always first; suppressed states follow in
/// the order they were configured, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthPolicy {
    allowed: Vec<ClusterState>,
}

impl HealthPolicy {
    pub fn new<I, S>(primary: ClusterState, suppressed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ClusterState>,
    {
        let mut allowed = vec![primary];
        for state in suppressed {
            let state = state.into();
            if !allowed.contains(&state) {
                allowed.push(state);
            }
        }
        Self { allowed }
    }

    /// `ACTIVE` plus the given suppressed states.
    pub fn with_suppressed<I, S>(suppressed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ClusterState>,
    {
        Self::new(ClusterState::Active, suppressed)
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(
            ClusterState::from(config.primary_state.as_str()),
            config.suppressed_states.iter().map(String::as_str),
        )
    }

    pub fn allows(&self, state: &ClusterState) -> bool {
        self.allowed.contains(state)
    }

    /// Comma-separated allow-list for log output.
    pub fn describe(&self) -> String {
        self.allowed
            .iter()
            .map(ClusterState::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self::with_suppressed(Vec::<ClusterState>::new())
    }
}
