use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::FeedError;
use crate::models::Notification;
use crate::notify::Notifier;
use crate::polling::feed::{fetch_with_timeout, FeedSource};
use crate::render::{DashboardSnapshot, LogRenderer, RenderSink};
use crate::safety::{normalize_environment, normalize_worker, AnomalyDetector, RuleDetector};
use crate::session::{Intent, SessionState, WorkerOutcome};
use crate::timer::{state::DEFAULT_BREAK_MINUTES, BreakTicker, TimerState};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub worker_id: String,
    pub fetch_timeout: Duration,
    pub break_minutes: u32,
    pub tick_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            worker_id: "W-001".into(),
            fetch_timeout: Duration::from_secs(8),
            break_minutes: DEFAULT_BREAK_MINUTES,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Result of one feed within a cycle.
#[derive(Debug)]
pub enum SourceOutcome<T> {
    Updated(T),
    Failed(FeedError),
    Skipped,
}

impl<T> SourceOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct CycleReport {
    pub worker: SourceOutcome<WorkerOutcome>,
    pub environment: SourceOutcome<()>,
}

struct MonitorInner {
    config: MonitorConfig,
    state: Mutex<SessionState>,
    worker_feed: Arc<dyn FeedSource>,
    environment_feed: Option<Arc<dyn FeedSource>>,
    detector: Arc<dyn AnomalyDetector>,
    notifier: Notifier,
    renderer: Arc<dyn RenderSink>,
    ticker: BreakTicker,
}

/// Shared handle to the safety pipeline.
///
/// Poll cycles, the break ticker and operator commands all go through the one
/// session-state mutex, so the action badge the timer follows is read exactly
/// once per cycle.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

pub struct MonitorBuilder {
    config: MonitorConfig,
    worker_feed: Arc<dyn FeedSource>,
    environment_feed: Option<Arc<dyn FeedSource>>,
    detector: Arc<dyn AnomalyDetector>,
    notifier: Notifier,
    renderer: Arc<dyn RenderSink>,
}

impl MonitorBuilder {
    pub fn environment_feed(mut self, feed: Arc<dyn FeedSource>) -> Self {
        self.environment_feed = Some(feed);
        self
    }

    pub fn detector(mut self, detector: Arc<dyn AnomalyDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn RenderSink>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn build(self) -> Monitor {
        let state = SessionState::new(
            self.config.worker_id.clone(),
            self.config.break_minutes,
            self.environment_feed.is_some(),
        );
        log_info!(
            "monitor session {} for worker {} (detector: {}, {} notification channel(s))",
            state.session_id(),
            self.config.worker_id,
            self.detector.name(),
            self.notifier.channel_count()
        );

        Monitor {
            inner: Arc::new(MonitorInner {
                ticker: BreakTicker::new(self.config.tick_interval),
                config: self.config,
                state: Mutex::new(state),
                worker_feed: self.worker_feed,
                environment_feed: self.environment_feed,
                detector: self.detector,
                notifier: self.notifier,
                renderer: self.renderer,
            }),
        }
    }
}

impl Monitor {
    pub fn builder(config: MonitorConfig, worker_feed: Arc<dyn FeedSource>) -> MonitorBuilder {
        MonitorBuilder {
            config,
            worker_feed,
            environment_feed: None,
            detector: Arc::new(RuleDetector::default()),
            notifier: Notifier::default(),
            renderer: Arc::new(LogRenderer),
        }
    }

    /// Fetch the worker feed, then the environment feed, and publish one frame.
    ///
    /// A failure in either source only degrades that source's panel.
    pub async fn run_cycle(&self) -> CycleReport {
        let worker = self.poll_worker().await;
        let environment = self.poll_environment().await;
        self.publish().await;
        CycleReport {
            worker,
            environment,
        }
    }

    async fn poll_worker(&self) -> SourceOutcome<WorkerOutcome> {
        let feed = self.inner.worker_feed.as_ref();
        match fetch_with_timeout(feed, self.inner.config.fetch_timeout).await {
            Ok(entry) => {
                let reading = normalize_worker(&entry);
                let (outcome, notifications) = {
                    let mut state = self.inner.state.lock().await;
                    let outcome =
                        state.apply_worker(reading, self.inner.detector.as_ref(), Utc::now());
                    let notifications = self.apply_intents(&outcome.intents);
                    (outcome, notifications)
                };
                log_debug!(
                    "worker cycle: badge={} band={:?} intents={}",
                    outcome.action.badge.as_str(),
                    outcome.band,
                    outcome.intents.len()
                );
                self.deliver(notifications).await;
                SourceOutcome::Updated(outcome)
            }
            Err(err) => {
                log_warn!("{} feed failed: {err}", feed.name());
                self.inner.state.lock().await.apply_worker_failure(&err);
                SourceOutcome::Failed(err)
            }
        }
    }

    async fn poll_environment(&self) -> SourceOutcome<()> {
        let Some(feed) = self.inner.environment_feed.as_deref() else {
            return SourceOutcome::Skipped;
        };
        match fetch_with_timeout(feed, self.inner.config.fetch_timeout).await {
            Ok(entry) => {
                let reading = normalize_environment(&entry);
                self.inner.state.lock().await.apply_environment(reading);
                SourceOutcome::Updated(())
            }
            Err(err) => {
                log_warn!("{} feed failed: {err}", feed.name());
                self.inner.state.lock().await.apply_environment_failure(&err);
                SourceOutcome::Failed(err)
            }
        }
    }

    /// Advance the break countdown by one tick. Returns whether it is still running.
    pub async fn tick_break_timer(&self) -> bool {
        let (intents, running) = {
            let mut state = self.inner.state.lock().await;
            let intents = state.tick_timer();
            (intents, state.timer().is_running())
        };
        // A tick only ever yields the break-complete notification.
        let notifications = intents.into_iter().filter_map(|intent| match intent {
            Intent::Notify(notification) => Some(notification),
            _ => None,
        });
        self.deliver(notifications.collect()).await;
        self.publish().await;
        running
    }

    pub async fn start_break_timer(&self) -> TimerState {
        self.timer_request(SessionState::start_timer).await
    }

    pub async fn stop_break_timer(&self) -> TimerState {
        self.timer_request(SessionState::stop_timer).await
    }

    pub async fn reset_break_timer(&self, minutes: u32) -> TimerState {
        self.timer_request(|state| state.reset_timer(minutes)).await
    }

    async fn timer_request<F>(&self, request: F) -> TimerState
    where
        F: FnOnce(&mut SessionState) -> Vec<Intent>,
    {
        let (timer, notifications) = {
            let mut state = self.inner.state.lock().await;
            let intents = request(&mut *state);
            let notifications = self.apply_intents(&intents);
            (state.timer().clone(), notifications)
        };
        self.deliver(notifications).await;
        self.publish().await;
        timer
    }

    pub async fn timer(&self) -> TimerState {
        self.inner.state.lock().await.timer().clone()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.state.lock().await.snapshot()
    }

    pub async fn publish(&self) {
        let snapshot = self.snapshot().await;
        self.inner.renderer.render(&snapshot);
    }

    pub fn ticker_active(&self) -> bool {
        self.inner.ticker.is_active()
    }

    /// Stop background work owned by the monitor.
    pub async fn shutdown(&self) {
        let _state = self.inner.state.lock().await;
        self.inner.ticker.cancel();
    }

    /// Start or cancel the ticker and hand back the notifications to send.
    ///
    /// Callers hold the session lock, so the ticker always matches the timer
    /// status the intents came from.
    fn apply_intents(&self, intents: &[Intent]) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for intent in intents {
            match intent {
                Intent::Notify(notification) => notifications.push(notification.clone()),
                Intent::StartTicker => self.inner.ticker.spawn(self.clone()),
                Intent::StopTicker => self.inner.ticker.cancel(),
            }
        }
        notifications
    }

    async fn deliver(&self, notifications: Vec<Notification>) {
        for notification in &notifications {
            self.inner.notifier.deliver(notification).await;
        }
    }
}
