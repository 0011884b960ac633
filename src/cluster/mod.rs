//! Cluster model.
//!
//! # Data Flow
//! ```text
//! provider identifier (ARN string)
//!     → arn.rs (structured segments: region, account, name)
//!
//! provider state string ("ACTIVE", "FAILED", ...)
//!     → state.rs (closed enum with Unknown fallback)
//!
//! describe response
//!     → descriptor.rs (ClusterDescriptor handed to the evaluator)
//! ```
//!
//! # Design Decisions
//! - Identifiers are never rejected: unparseable segments become `None`
//! - State parsing is exact and case-sensitive; `as_str` round-trips
//! - Descriptors are plain values, rebuilt on every run

pub mod arn;
pub mod descriptor;
pub mod state;

pub use arn::ClusterArn;
pub use descriptor::ClusterDescriptor;
pub use state::ClusterState;
