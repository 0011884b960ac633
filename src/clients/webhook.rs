//! Notification publishers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::clients::{ClientError, ClientResult, Notifier};

/// JSON body POSTed to the webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Publishes warnings to an HTTP webhook (topic fan-out bridge, chat webhook, ...).
pub struct WebhookNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url: webhook_url.into(),
            client,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn publish(&self, topic: &str, subject: &str, message: &str) -> ClientResult<()> {
        let payload = WebhookPayload {
            topic,
            subject,
            message,
        };

        let response = self.client.post(&self.webhook_url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                service: "notification webhook",
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(topic, "Notification published");
        Ok(())
    }
}

/// Writes warnings to the log instead of publishing them.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, topic: &str, subject: &str, message: &str) -> ClientResult<()> {
        tracing::warn!(topic, subject, message, "Notification (not published)");
        Ok(())
    }
}
