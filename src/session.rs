//! All mutable state of one monitoring session.
//!
//! Every method here is synchronous and free of I/O. Side effects come back as
//! [`Intent`]s for the monitor to carry out, so a whole cycle can be exercised
//! as `(state, reading) -> (state, intents)`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::FeedError;
use crate::models::{Action, EnvironmentReading, Notification, Reading};
use crate::notify::NotificationGate;
use crate::render::DashboardSnapshot;
use crate::safety::notes::{status_detail, EnvironmentNotes, ReadingNotes};
use crate::safety::{decide_action, score_breakdown, AnomalyDetector, HaciBreakdown, SeverityBand};
use crate::timer::{TimerEvent, TimerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Notify(Notification),
    StartTicker,
    StopTicker,
}

/// Scoring results for a present worker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub reading: Reading,
    pub notes: ReadingNotes,
    pub anomaly: bool,
    pub haci: HaciBreakdown,
    pub band: SeverityBand,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerView {
    pub presence: bool,
    pub status: String,
    pub status_detail: String,
    /// `None` while the worker is not detected.
    pub assessment: Option<Assessment>,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WorkerPanel {
    Pending,
    Failed { error: String },
    Observed(WorkerView),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EnvironmentPanel {
    Disabled,
    Pending,
    Failed { error: String },
    Observed {
        reading: EnvironmentReading,
        notes: EnvironmentNotes,
    },
}

/// What one worker cycle decided, for callers and tests.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub action: Action,
    pub band: Option<SeverityBand>,
    pub intents: Vec<Intent>,
}

pub struct SessionState {
    session_id: Uuid,
    worker_id: String,
    worker: WorkerPanel,
    environment: EnvironmentPanel,
    timer: TimerState,
    gate: NotificationGate,
    last_sync: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new(worker_id: impl Into<String>, break_minutes: u32, environment_enabled: bool) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            worker_id: worker_id.into(),
            worker: WorkerPanel::Pending,
            environment: if environment_enabled {
                EnvironmentPanel::Pending
            } else {
                EnvironmentPanel::Disabled
            },
            timer: TimerState::new(break_minutes),
            gate: NotificationGate::new(),
            last_sync: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn worker(&self) -> &WorkerPanel {
        &self.worker
    }

    pub fn environment(&self) -> &EnvironmentPanel {
        &self.environment
    }

    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    /// Run the worker pipeline on a freshly fetched reading.
    pub fn apply_worker(
        &mut self,
        reading: Reading,
        detector: &dyn AnomalyDetector,
        now: DateTime<Utc>,
    ) -> WorkerOutcome {
        self.last_sync = Some(now);

        if !reading.presence {
            let action = Action::awaiting_presence();
            let intents = ticker_intent(self.timer.dismiss()).into_iter().collect();
            self.worker = WorkerPanel::Observed(WorkerView {
                presence: false,
                status: "Not detected".into(),
                status_detail: "Move near the machine to sync worker readings.".into(),
                assessment: None,
                action: action.clone(),
            });
            return WorkerOutcome {
                action,
                band: None,
                intents,
            };
        }

        let anomaly = detector.detect(&reading);
        let haci = score_breakdown(&reading, anomaly);
        let band = SeverityBand::from_score(haci.score);
        let action = decide_action(&reading, haci.score, anomaly);

        let mut intents = Vec::new();
        intents.extend(ticker_intent(self.timer.follow_badge(action.badge)));
        if let Some(notification) = &action.notification {
            if self.gate.admit(notification, band) {
                intents.push(Intent::Notify(notification.clone()));
            }
        }

        self.worker = WorkerPanel::Observed(WorkerView {
            presence: true,
            status: band.label().into(),
            status_detail: status_detail(anomaly).into(),
            assessment: Some(Assessment {
                reading,
                notes: ReadingNotes::for_reading(&reading),
                anomaly,
                haci,
                band,
            }),
            action: action.clone(),
        });

        WorkerOutcome {
            action,
            band: Some(band),
            intents,
        }
    }

    /// The timer and dedup key are left untouched; only the panel degrades.
    pub fn apply_worker_failure(&mut self, error: &FeedError) {
        self.worker = WorkerPanel::Failed {
            error: error.to_string(),
        };
    }

    pub fn apply_environment(&mut self, reading: EnvironmentReading) {
        self.environment = EnvironmentPanel::Observed {
            notes: EnvironmentNotes::for_reading(&reading),
            reading,
        };
    }

    pub fn apply_environment_failure(&mut self, error: &FeedError) {
        self.environment = EnvironmentPanel::Failed {
            error: error.to_string(),
        };
    }

    /// One-second tick. Yields the break-complete notification on the final tick.
    pub fn tick_timer(&mut self) -> Vec<Intent> {
        match self.timer.tick() {
            Some(TimerEvent::Completed) => vec![Intent::Notify(Notification::break_complete())],
            _ => Vec::new(),
        }
    }

    pub fn start_timer(&mut self) -> Vec<Intent> {
        ticker_intent(self.timer.start()).into_iter().collect()
    }

    pub fn stop_timer(&mut self) -> Vec<Intent> {
        ticker_intent(self.timer.stop()).into_iter().collect()
    }

    pub fn reset_timer(&mut self, minutes: u32) -> Vec<Intent> {
        ticker_intent(self.timer.reset(minutes)).into_iter().collect()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            session_id: self.session_id,
            worker_id: self.worker_id.clone(),
            last_sync: self.last_sync,
            worker: self.worker.clone(),
            environment: self.environment.clone(),
            timer: self.timer.clone(),
        }
    }
}

fn ticker_intent(event: Option<TimerEvent>) -> Option<Intent> {
    match event? {
        TimerEvent::Started => Some(Intent::StartTicker),
        TimerEvent::Stopped => Some(Intent::StopTicker),
        TimerEvent::Completed => None,
    }
}
