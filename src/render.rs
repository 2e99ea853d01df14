use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use crate::session::{EnvironmentPanel, WorkerPanel};
use crate::timer::{TimerState, TimerStatus};

/// Everything the dashboard needs for one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub session_id: Uuid,
    pub worker_id: String,
    pub last_sync: Option<DateTime<Utc>>,
    pub worker: WorkerPanel,
    pub environment: EnvironmentPanel,
    pub timer: TimerState,
}

/// Consumer of dashboard frames. Must not block.
pub trait RenderSink: Send + Sync {
    fn render(&self, snapshot: &DashboardSnapshot);
}

/// Renders a one-line summary at info level and the full frame at debug.
pub struct LogRenderer;

impl RenderSink for LogRenderer {
    fn render(&self, snapshot: &DashboardSnapshot) {
        info!("[{}] {}", snapshot.worker_id, summarize(snapshot));
        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(snapshot) {
                Ok(json) => debug!("{json}"),
                Err(err) => debug!("snapshot serialization failed: {err}"),
            }
        }
    }
}

pub fn summarize(snapshot: &DashboardSnapshot) -> String {
    let worker = match &snapshot.worker {
        WorkerPanel::Pending => "worker: syncing".to_string(),
        WorkerPanel::Failed { error } => format!("worker: ERROR ({error})"),
        WorkerPanel::Observed(view) => match &view.assessment {
            None => format!("worker: {} | {}", view.status, view.action.badge.as_str()),
            Some(a) => format!(
                "worker: HACI {} {} | {} {}",
                a.haci.score,
                a.band.label(),
                view.action.badge.as_str(),
                view.action.title
            ),
        },
    };

    let environment = match &snapshot.environment {
        EnvironmentPanel::Disabled => "env: off".to_string(),
        EnvironmentPanel::Pending => "env: syncing".to_string(),
        EnvironmentPanel::Failed { error } => format!("env: ERROR ({error})"),
        EnvironmentPanel::Observed { notes, .. } => {
            format!("env: flame {} / air {}", notes.flame, notes.air_quality)
        }
    };

    let timer = &snapshot.timer;
    let break_timer = match (timer.visible, timer.status) {
        (false, TimerStatus::Idle) => String::new(),
        (_, TimerStatus::Finished) => " | break done".to_string(),
        (_, status) => format!(
            " | break {:02}:{:02} {:?}",
            timer.remaining_secs / 60,
            timer.remaining_secs % 60,
            status
        ),
    };

    format!("{worker} | {environment}{break_timer}")
}
