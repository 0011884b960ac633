//! Configuration loading from disk and environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HealthCheckConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// Names of required values that were absent.
    pub fn missing(&self) -> Vec<&'static str> {
        match self {
            ConfigError::Validation(errors) => errors
                .iter()
                .filter_map(|e| match e {
                    ValidationError::Missing(name) => Some(*name),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

pub const ENV_CLUSTER_ARNS: &str = "CLUSTER_ARNS";
pub const ENV_CLUSTER_DISCOVERY: &str = "CLUSTER_DISCOVERY";
pub const ENV_ENABLE_METRICS: &str = "ENABLE_CLOUDWATCH_METRICS";
pub const ENV_ENABLE_NOTIFICATIONS: &str = "ENABLE_SNS_NOTIFICATIONS";
pub const ENV_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
pub const ENV_SUPPRESS_STATES: &str = "SUPPRESS_STATES";
pub const ENV_WEBHOOK_URL: &str = "NOTIFY_WEBHOOK_URL";
pub const ENV_API_ENDPOINT: &str = "MSK_API_ENDPOINT";
pub const ENV_REGION: &str = "AWS_REGION";

/// Parse a TOML file without validating it.
pub fn load_file(path: &Path) -> Result<HealthCheckConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration: optional TOML file, environment overrides, validation.
pub fn load_config(
    path: Option<&Path>,
    env: &dyn EnvSource,
) -> Result<HealthCheckConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => HealthCheckConfig::default(),
    };

    apply_env(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay every variable that is set onto `config`.
pub fn apply_env(config: &mut HealthCheckConfig, env: &dyn EnvSource) -> Result<(), ConfigError> {
    if let Some(v) = env.var(ENV_CLUSTER_ARNS) {
        config.clusters.arns = split_list(&v);
    }
    if let Some(v) = env.var(ENV_CLUSTER_DISCOVERY) {
        config.clusters.discover = parse_bool(ENV_CLUSTER_DISCOVERY, &v)?;
    }
    if let Some(v) = env.var(ENV_REGION) {
        config.clusters.region = v;
    }
    if let Some(v) = env.var(ENV_API_ENDPOINT) {
        config.cluster_api.endpoint = Some(v).filter(|s| !s.trim().is_empty());
    }
    if let Some(v) = env.var(ENV_ENABLE_METRICS) {
        config.metrics.enabled = parse_bool(ENV_ENABLE_METRICS, &v)?;
    }
    if let Some(v) = env.var(ENV_ENABLE_NOTIFICATIONS) {
        config.notifications.enabled = parse_bool(ENV_ENABLE_NOTIFICATIONS, &v)?;
    }
    if let Some(v) = env.var(ENV_TOPIC_ARN) {
        config.notifications.topic = v;
    }
    if let Some(v) = env.var(ENV_WEBHOOK_URL) {
        config.notifications.webhook_url = Some(v).filter(|s| !s.trim().is_empty());
    }
    if let Some(v) = env.var(ENV_SUPPRESS_STATES) {
        config.policy.suppressed_states = split_list(&v);
    }
    Ok(())
}

/// Comma-separated list, trimmed, empty entries dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::Env {
            var,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
