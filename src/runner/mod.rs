//! Health check orchestration.
//!
//! # Data Flow
//! ```text
//! invoke(event)                        (event is ignored)
//!     → batch.rs: cluster list (configured ARNs or list_clusters)
//!     → per cluster: describe → evaluate → metric → notification
//!     → report.rs: BatchReport (Result per cluster)
//!     → InvocationResponse { statusCode: 200, body: "OK" }
//!
//! Watch mode:
//!     schedule.rs ticker → invoke; a reload rebuilds the runner between runs
//! ```
//!
//! # Design Decisions
//! - Clusters are processed sequentially; no shared state between them
//! - A describe failure skips that cluster only; no retries
//! - Metric first, then notification (only when enabled and unhealthy)
//! - Partial failure never changes the invocation response

pub mod batch;
pub mod report;
pub mod schedule;

pub use batch::HealthCheckRunner;
pub use report::{BatchReport, ClusterOutcome, ClusterReport, InvocationResponse};
pub use schedule::Scheduler;
