//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect missing required values (cluster list, topic, endpoint or region)
//! - Validate value ranges (timeouts > 0, interval > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HealthCheckConfig → Result<(), Vec<ValidationError>>
//! - Runs before any cluster is processed

use thiserror::Error;
use url::Url;

use crate::config::schema::HealthCheckConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required value is absent. Carries the environment variable name.
    #[error("missing required configuration value {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate_config(config: &HealthCheckConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.clusters.arns.is_empty() && !config.clusters.discover {
        errors.push(ValidationError::Missing("CLUSTER_ARNS"));
    }
    if config.clusters.arns.iter().any(|arn| arn.trim().is_empty()) {
        errors.push(ValidationError::invalid("clusters.arns", "empty cluster identifier"));
    }

    match &config.cluster_api.endpoint {
        None if config.clusters.region.trim().is_empty() => {
            errors.push(ValidationError::Missing("AWS_REGION"));
        }
        Some(endpoint) if endpoint.trim().is_empty() => {
            errors.push(ValidationError::Missing("MSK_API_ENDPOINT"));
        }
        _ => {
            if let Err(e) = Url::parse(&config.cluster_api_endpoint()) {
                errors.push(ValidationError::invalid("cluster_api.endpoint", e.to_string()));
            }
        }
    }
    if config.cluster_api.timeout_secs == 0 {
        errors.push(ValidationError::invalid("cluster_api.timeout_secs", "must be greater than 0"));
    }

    if config.policy.primary_state.trim().is_empty() {
        errors.push(ValidationError::invalid("policy.primary_state", "must not be empty"));
    }

    if config.metrics.enabled {
        if config.metrics.namespace.is_empty() {
            errors.push(ValidationError::invalid("metrics.namespace", "must not be empty"));
        }
        if config.metrics.metric_name.is_empty() {
            errors.push(ValidationError::invalid("metrics.metric_name", "must not be empty"));
        }
    }
    if let Some(addr) = &config.metrics.exporter_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::invalid(
                "metrics.exporter_address",
                format!("'{}' is not a socket address", addr),
            ));
        }
    }

    if config.notifications.enabled && config.notifications.topic.trim().is_empty() {
        errors.push(ValidationError::Missing("SNS_TOPIC_ARN"));
    }
    if let Some(webhook) = &config.notifications.webhook_url {
        if let Err(e) = Url::parse(webhook) {
            errors.push(ValidationError::invalid("notifications.webhook_url", e.to_string()));
        }
    }

    if config.schedule.interval_secs == 0 {
        errors.push(ValidationError::invalid("schedule.interval_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
