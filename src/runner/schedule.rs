//! Periodic invocation for watch mode.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::config::HealthCheckConfig;
use crate::lifecycle::StartupError;
use crate::runner::HealthCheckRunner;

/// Builds a runner, collaborators included, from a reloaded configuration.
pub type RebuildFn =
    Box<dyn Fn(HealthCheckConfig) -> Result<HealthCheckRunner, StartupError> + Send + Sync>;

/// Runs the health check on a fixed interval until shutdown.
pub struct Scheduler {
    runner: HealthCheckRunner,
    rebuild: RebuildFn,
    period: Duration,
}

impl Scheduler {
    /// `rebuild` turns every reloaded configuration into a fresh runner.
    pub fn new<F>(runner: HealthCheckRunner, rebuild: F) -> Self
    where
        F: Fn(HealthCheckConfig) -> Result<HealthCheckRunner, StartupError> + Send + Sync + 'static,
    {
        let period = Duration::from_secs(runner.config().schedule.interval_secs);
        Self {
            runner,
            rebuild: Box::new(rebuild),
            period,
        }
    }

    /// Override the configured interval.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    fn ticker(period: Duration) -> Interval {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Replace the runner. Returns true when the interval changed.
    ///
    /// A configuration that cannot be built into a runner is dropped and the
    /// current runner stays in place.
    fn reload(&mut self, config: HealthCheckConfig) -> bool {
        let previous = self.runner.config();
        if previous.metrics.exporter_address != config.metrics.exporter_address
            || previous.observability != config.observability
        {
            tracing::warn!("Exporter and logging settings only change on restart");
        }
        let interval_changed = previous.schedule.interval_secs != config.schedule.interval_secs;

        match (self.rebuild)(config) {
            Ok(runner) => {
                self.runner = runner;
                tracing::info!(
                    policy = %self.runner.policy().describe(),
                    "Configuration reloaded"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to apply reloaded configuration, keeping current"
                );
                return false;
            }
        }

        if interval_changed {
            self.period = Duration::from_secs(self.runner.config().schedule.interval_secs);
            tracing::info!(interval_secs = self.period.as_secs(), "Schedule interval changed");
        }
        interval_changed
    }

    /// Loop until `shutdown` fires. Returns the number of completed runs.
    ///
    /// The first run starts immediately. Reloaded configurations take effect
    /// from the next run on.
    pub async fn run(
        mut self,
        mut config_updates: mpsc::UnboundedReceiver<HealthCheckConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> usize {
        tracing::info!(interval_secs = self.period.as_secs(), "Scheduler starting");

        let mut ticker = Self::ticker(self.period);
        let mut runs = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let response = self.runner.invoke(serde_json::Value::Null).await;
                    runs += 1;
                    tracing::debug!(
                        run = runs,
                        status = response.status_code,
                        "Scheduled run complete"
                    );
                }
                Some(config) = config_updates.recv() => {
                    if self.reload(config) {
                        ticker = Self::ticker(self.period);
                        ticker.reset();
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Scheduler received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        runs
    }
}
