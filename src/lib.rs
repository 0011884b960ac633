//! Managed Kafka (MSK) cluster health check library.

pub mod clients;
pub mod cluster;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod runner;

pub use config::HealthCheckConfig;
pub use health::{evaluate, HealthPolicy, Verdict};
pub use runner::{HealthCheckRunner, InvocationResponse};
