//! Notification delivery.
//!
//! [`NotificationGate`] decides *whether* a notification goes out; the
//! [`Notifier`] fans it out to every configured [`NotificationSink`] and
//! swallows their failures so the poll loop never sees them.

pub mod channels;
pub mod gate;

pub use channels::{LogNotifier, WebhookNotifier};
pub use gate::{DedupKey, NotificationGate};

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::error::NotifyError;
use crate::models::Notification;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

#[derive(Clone)]
pub struct Notifier {
    channels: Vec<Arc<dyn NotificationSink>>,
}

impl Notifier {
    pub fn with_channels(channels: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Deliver to every channel in turn. Errors are logged and dropped.
    pub async fn deliver(&self, notification: &Notification) {
        for channel in &self.channels {
            match channel.send(notification).await {
                Ok(()) => debug!("notification sent via {}", channel.name()),
                Err(err) => error!(
                    "notification channel {} failed, dropping '{}': {err}",
                    channel.name(),
                    notification.title
                ),
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_channels(vec![Arc::new(LogNotifier)])
    }
}
