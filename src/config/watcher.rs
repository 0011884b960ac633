//! Configuration file watcher for hot reload in watch mode.
//!
//! The parent directory is watched rather than the file itself so that
//! editors and config-management tools that replace the file (write to a
//! temp file, then rename) keep triggering reloads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_config, EnvSource, SystemEnv};
use crate::config::schema::HealthCheckConfig;

/// Watches one configuration file and sends every valid reload.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<HealthCheckConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<HealthCheckConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    fn touches(event: &Event, path: &Path) -> bool {
        let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
        relevant && event.paths.iter().any(|p| p.file_name() == path.file_name())
    }

    /// Load `path` and forward it. An invalid file is logged and nothing is
    /// sent, so the current configuration stays in use.
    fn reload(
        path: &Path,
        env: &dyn EnvSource,
        tx: &mpsc::UnboundedSender<HealthCheckConfig>,
    ) -> bool {
        match load_config(Some(path), env) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Config file changed, reloaded");
                tx.send(config).is_ok()
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to reload config, keeping current configuration"
                );
                false
            }
        }
    }

    /// Start watching. The returned handle must stay alive for updates to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if Self::touches(&event, &path) => {
                    Self::reload(&path, &SystemEnv, &tx);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}
