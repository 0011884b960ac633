//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: CLUSTER_ARNS, SNS_TOPIC_ARN, ...)
//!     → validation.rs (semantic checks)
//!     → HealthCheckConfig (validated, immutable)
//!     → passed by reference into the runner
//!
//! In watch mode:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → scheduler uses the new config from the next run on
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - A missing required value aborts before any cluster is processed

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError, EnvSource, SystemEnv};
pub use schema::{
    ApiVersion, ClusterApiConfig, ClustersConfig, HealthCheckConfig, MetricsConfig,
    NotificationConfig, ObservabilityConfig, PolicyConfig, ScheduleConfig,
};
