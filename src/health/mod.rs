//! Health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! config.policy (primary + suppressed states)
//!     → policy.rs (HealthPolicy, ordered allow-list)
//!
//! ClusterDescriptor + HealthPolicy
//!     → evaluator.rs (pure membership check)
//!     → Verdict { is_healthy, metric_value, notification }
//! ```
//!
//! # Design Decisions
//! - Evaluation performs no I/O; emitting metrics and notifications is the
//!   runner's job
//! - Exact, case-sensitive state match, no normalization

pub mod evaluator;
pub mod policy;

pub use evaluator::{evaluate, Verdict};
pub use policy::HealthPolicy;
