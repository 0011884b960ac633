//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when configured
//! - Build the collaborators the configuration asks for
//! - Hand back a ready runner, at startup and again for every reload
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Collaborators are chosen here, never inside the runner

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::clients::{
    ClientError, LogNotifier, MskRestClient, Notifier, PrometheusMetricsSink, WebhookNotifier,
};
use crate::config::HealthCheckConfig;
use crate::observability::metrics::init_metrics;
use crate::runner::HealthCheckRunner;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create client: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid metrics exporter address '{0}'")]
    MetricsAddress(String),

    #[error("Failed to start metrics exporter: {0}")]
    MetricsExporter(#[from] metrics_exporter_prometheus::BuildError),
}

/// Install the Prometheus exporter if an address is configured.
pub fn start_metrics_exporter(config: &HealthCheckConfig) -> Result<(), StartupError> {
    if let Some(addr) = &config.metrics.exporter_address {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| StartupError::MetricsAddress(addr.clone()))?;
        init_metrics(addr)?;
    }
    Ok(())
}

/// Pick the notifier: webhook when configured, log-only for dry runs or
/// when no webhook is set.
pub fn build_notifier(
    config: &HealthCheckConfig,
    dry_run: bool,
) -> Result<Arc<dyn Notifier>, StartupError> {
    let notifications = &config.notifications;
    match (&notifications.webhook_url, dry_run) {
        (Some(url), false) => {
            let timeout = Duration::from_secs(notifications.timeout_secs);
            Ok(Arc::new(WebhookNotifier::new(url.as_str(), timeout)?))
        }
        (None, false) if notifications.enabled => {
            tracing::warn!("No notification webhook configured, warnings will only be logged");
            Ok(Arc::new(LogNotifier))
        }
        _ => Ok(Arc::new(LogNotifier)),
    }
}

/// Wire the runner from a validated configuration.
///
/// Watch mode calls this again for every reloaded configuration, so endpoint,
/// API version, timeouts and webhook changes all take effect.
pub fn build_runner(
    config: HealthCheckConfig,
    dry_run: bool,
) -> Result<HealthCheckRunner, StartupError> {
    let clusters = Arc::new(MskRestClient::new(&config)?);
    let notifier = build_notifier(&config, dry_run)?;

    tracing::info!(
        endpoint = %config.cluster_api_endpoint(),
        region = %config.clusters.region,
        api_version = ?config.cluster_api.api_version,
        clusters = config.clusters.arns.len(),
        discover = config.clusters.discover,
        metrics_enabled = config.metrics.enabled,
        notifications_enabled = config.notifications.enabled,
        notifier = notifier.name(),
        "Configuration loaded"
    );

    Ok(HealthCheckRunner::new(
        config,
        clusters,
        Arc::new(PrometheusMetricsSink::new()),
        notifier,
    ))
}
