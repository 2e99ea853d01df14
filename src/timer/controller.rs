use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::monitor::Monitor;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Owns the background task that advances the break countdown once a second.
///
/// `spawn` and `cancel` are synchronous so the monitor can call them while it
/// holds the session lock.
pub struct BreakTicker {
    handle: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl BreakTicker {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            handle: Mutex::new(None),
            tick_interval,
        }
    }

    /// Replace any running ticker with a fresh one.
    ///
    /// The first tick lands one full interval after the call.
    pub fn spawn(&self, monitor: Monitor) {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = guard.take() {
            handle.abort();
        }

        let tick_interval = self.tick_interval;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if !monitor.tick_break_timer().await {
                    log_debug!("break ticker exiting, timer no longer running");
                    break;
                }
            }
        });

        *guard = Some(handle);
        log_info!("break ticker started ({:?} interval)", tick_interval);
    }

    pub fn cancel(&self) {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            log_info!("break ticker cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
