//! Scripted feeds and recording sinks shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FeedError, NotifyError};
use crate::models::{FeedEntry, Notification};
use crate::monitor::{Monitor, MonitorBuilder, MonitorConfig};
use crate::notify::{NotificationSink, Notifier};
use crate::polling::FeedSource;
use crate::render::{DashboardSnapshot, RenderSink};

#[derive(Debug, Clone)]
pub enum Response {
    Entry(FeedEntry),
    Status(u16),
    /// Answer with the entry after a delay.
    Delayed(Duration, FeedEntry),
    Stall,
}

/// Replays its responses in order, then repeats the last one forever.
pub struct ScriptedFeed {
    name: &'static str,
    responses: Mutex<VecDeque<Response>>,
}

impl ScriptedFeed {
    pub fn new(name: &'static str, responses: impl IntoIterator<Item = Response>) -> Arc<Self> {
        Arc::new(Self {
            name,
            responses: Mutex::new(responses.into_iter().collect()),
        })
    }

    fn next(&self) -> Response {
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses.front().cloned().unwrap_or(Response::Status(404))
        }
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch_latest(&self) -> Result<FeedEntry, FeedError> {
        match self.next() {
            Response::Entry(entry) => Ok(entry),
            Response::Status(code) => Err(FeedError::Status(code)),
            Response::Delayed(delay, entry) => {
                tokio::time::sleep(delay).await;
                Ok(entry)
            }
            Response::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FeedError::Status(408))
            }
        }
    }
}

/// Worker row in channel column order: hr, spo2, temp, accel, fall, presence.
pub fn worker_row(hr: &str, spo2: &str, temp: &str, accel: &str, fall: &str, presence: &str) -> Response {
    Response::Entry(
        FeedEntry::default()
            .with_field(1, hr)
            .with_field(2, spo2)
            .with_field(3, temp)
            .with_field(4, accel)
            .with_field(5, fall)
            .with_field(6, presence),
    )
}

pub fn nominal_row() -> Response {
    worker_row("75", "97", "36.8", "1.0", "0", "1")
}

/// HACI 58, WARNING, micro-break.
pub fn tired_row() -> Response {
    worker_row("125", "", "37.8", "2.0", "0", "1")
}

pub fn environment_row() -> Response {
    Response::Entry(
        FeedEntry::default()
            .with_field(1, "31.5")
            .with_field(2, "55")
            .with_field(3, "72")
            .with_field(4, "40")
            .with_field(5, "20")
            .with_field(6, "0"),
    )
}

#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected(500))
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<DashboardSnapshot>>,
}

impl RecordingRenderer {
    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

impl RenderSink for RecordingRenderer {
    fn render(&self, snapshot: &DashboardSnapshot) {
        self.frames.lock().unwrap().push(snapshot.clone());
    }
}

/// Monitor wired to a recording sink and renderer.
pub struct Harness {
    pub monitor: Monitor,
    pub sink: Arc<RecordingSink>,
    pub renderer: Arc<RecordingRenderer>,
}

pub fn harness(
    break_minutes: u32,
    worker: Arc<ScriptedFeed>,
    environment: Option<Arc<ScriptedFeed>>,
) -> Harness {
    harness_with(break_minutes, worker, environment, |builder| builder)
}

pub fn harness_with(
    break_minutes: u32,
    worker: Arc<ScriptedFeed>,
    environment: Option<Arc<ScriptedFeed>>,
    customize: impl FnOnce(MonitorBuilder) -> MonitorBuilder,
) -> Harness {
    let sink = Arc::new(RecordingSink::default());
    let renderer = Arc::new(RecordingRenderer::default());
    let config = MonitorConfig {
        break_minutes,
        ..MonitorConfig::default()
    };

    let mut builder = Monitor::builder(config, worker)
        .notifier(Notifier::with_channels(vec![sink.clone()]))
        .renderer(renderer.clone());
    if let Some(environment) = environment {
        builder = builder.environment_feed(environment);
    }

    Harness {
        monitor: customize(builder).build(),
        sink,
        renderer,
    }
}
