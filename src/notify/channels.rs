use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use crate::error::NotifyError;
use crate::models::Notification;

use super::NotificationSink;

/// Writes notifications to the log at warn level.
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        warn!("[notify] {}: {}", notification.title, notification.body);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    worker_id: &'a str,
    title: &'a str,
    body: &'a str,
    sent_at: DateTime<Utc>,
}

/// POSTs each notification as JSON to a webhook URL.
pub struct WebhookNotifier {
    url: String,
    worker_id: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, worker_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            worker_id: worker_id.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            worker_id: &self.worker_id,
            title: &notification.title,
            body: &notification.body,
            sent_at: Utc::now(),
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
