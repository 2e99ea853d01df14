use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::monitor::Monitor;

use super::loop_worker::poll_loop;

/// Starts and stops the background poll loop.
pub struct PollController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    monitor: Option<Monitor>,
}

impl PollController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            monitor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(&mut self, monitor: Monitor, interval: Duration) -> Result<()> {
        if self.handle.is_some() {
            bail!("poll loop already active");
        }

        info!("starting poll loop every {:?}", interval);
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(monitor.clone(), interval, cancel_token.clone()));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.monitor = Some(monitor);
        Ok(())
    }

    /// Cancel the loop, wait for the current cycle to end, then stop the break ticker.
    ///
    /// The cancel token is only observed between cycles, so the ticker is shut
    /// down after the join: an in-flight cycle may still enter BREAK.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        let joined = match self.handle.take() {
            Some(handle) => handle.await.context("poll loop task failed to join"),
            None => Ok(()),
        };

        if let Some(monitor) = self.monitor.take() {
            monitor.shutdown().await;
        }

        joined
    }
}

impl Default for PollController {
    fn default() -> Self {
        Self::new()
    }
}
