use serde::{Deserialize, Serialize};

use crate::models::Badge;

pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Finished,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// Transitions worth reporting to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Stopped,
    Completed,
}

/// Micro-break countdown.
///
/// Driven by explicit requests, by the once-per-cycle action badge and by a
/// one-second tick. It never feeds back into scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub total_secs: u64,
    pub remaining_secs: u64,
    /// Whether the dashboard should show the timer panel at all.
    pub visible: bool,
    /// Badge of the previous cycle was BREAK; used for edge detection.
    #[serde(skip)]
    following_break: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_MINUTES)
    }
}

impl TimerState {
    pub fn new(minutes: u32) -> Self {
        let total_secs = minutes_to_secs(minutes);
        Self {
            status: TimerStatus::Idle,
            total_secs,
            remaining_secs: total_secs,
            visible: false,
            following_break: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Idle resumes where it stopped; Finished restarts from the full duration.
    pub fn start(&mut self) -> Option<TimerEvent> {
        match self.status {
            TimerStatus::Running => None,
            TimerStatus::Finished => {
                self.remaining_secs = self.total_secs;
                self.status = TimerStatus::Running;
                self.visible = true;
                Some(TimerEvent::Started)
            }
            TimerStatus::Idle => {
                if self.remaining_secs == 0 {
                    self.remaining_secs = self.total_secs;
                }
                self.status = TimerStatus::Running;
                self.visible = true;
                Some(TimerEvent::Started)
            }
        }
    }

    /// Pause a running countdown, keeping the remaining time.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.status = TimerStatus::Idle;
        Some(TimerEvent::Stopped)
    }

    /// Back to Idle with a fresh duration. Minutes below one are raised to one.
    pub fn reset(&mut self, minutes: u32) -> Option<TimerEvent> {
        let was_running = self.is_running();
        self.total_secs = minutes_to_secs(minutes);
        self.remaining_secs = self.total_secs;
        self.status = TimerStatus::Idle;
        was_running.then_some(TimerEvent::Stopped)
    }

    /// Drop any countdown and hide the panel.
    pub fn dismiss(&mut self) -> Option<TimerEvent> {
        let was_running = self.is_running();
        self.status = TimerStatus::Idle;
        self.remaining_secs = self.total_secs;
        self.visible = false;
        self.following_break = false;
        was_running.then_some(TimerEvent::Stopped)
    }

    /// Follow the badge of the current cycle.
    ///
    /// Entering BREAK starts a fresh countdown; staying in BREAK leaves the
    /// countdown alone; leaving BREAK dismisses it.
    pub fn follow_badge(&mut self, badge: Badge) -> Option<TimerEvent> {
        let is_break = badge == Badge::Break;
        let was_break = std::mem::replace(&mut self.following_break, is_break);

        match (was_break, is_break) {
            (false, true) => {
                self.remaining_secs = self.total_secs;
                self.status = TimerStatus::Running;
                self.visible = true;
                Some(TimerEvent::Started)
            }
            (true, false) => self.dismiss(),
            _ => None,
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Finished;
            return Some(TimerEvent::Completed);
        }
        None
    }
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes.max(1)) * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_break_starts_fresh_countdown() {
        let mut timer = TimerState::new(5);
        assert!(!timer.visible);

        assert_eq!(timer.follow_badge(Badge::Break), Some(TimerEvent::Started));
        assert!(timer.is_running());
        assert!(timer.visible);
        assert_eq!(timer.remaining_secs, 300);
    }

    #[test]
    fn staying_in_break_does_not_restart() {
        let mut timer = TimerState::new(5);
        timer.follow_badge(Badge::Break);
        for _ in 0..10 {
            timer.tick();
        }

        assert_eq!(timer.follow_badge(Badge::Break), None);
        assert_eq!(timer.remaining_secs, 290);
        assert!(timer.is_running());
    }

    #[test]
    fn break_safe_break_starts_a_new_timer() {
        let mut timer = TimerState::new(1);
        timer.follow_badge(Badge::Break);
        for _ in 0..20 {
            timer.tick();
        }

        assert_eq!(timer.follow_badge(Badge::Safe), Some(TimerEvent::Stopped));
        assert_eq!(timer.status, TimerStatus::Idle);
        assert!(!timer.visible);

        assert_eq!(timer.follow_badge(Badge::Break), Some(TimerEvent::Started));
        assert_eq!(timer.remaining_secs, 60);
    }

    #[test]
    fn countdown_finishes_once_and_never_goes_negative() {
        let mut timer = TimerState::new(1);
        timer.start();

        let completions = (0..100)
            .filter_map(|_| timer.tick())
            .filter(|e| *e == TimerEvent::Completed)
            .count();

        assert_eq!(completions, 1);
        assert_eq!(timer.status, TimerStatus::Finished);
        assert_eq!(timer.remaining_secs, 0);
    }

    #[test]
    fn finished_timer_stays_finished_while_break_persists() {
        let mut timer = TimerState::new(1);
        timer.follow_badge(Badge::Break);
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.status, TimerStatus::Finished);
        assert_eq!(timer.follow_badge(Badge::Break), None);
        assert_eq!(timer.status, TimerStatus::Finished);
    }

    #[test]
    fn stop_pauses_and_start_resumes() {
        let mut timer = TimerState::new(2);
        timer.start();
        timer.tick();
        timer.tick();

        assert_eq!(timer.stop(), Some(TimerEvent::Stopped));
        assert_eq!(timer.remaining_secs, 118);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_secs, 118);

        assert_eq!(timer.start(), Some(TimerEvent::Started));
        assert_eq!(timer.remaining_secs, 118);
        assert_eq!(timer.start(), None);
    }

    #[test]
    fn start_after_finish_restarts_full_duration() {
        let mut timer = TimerState::new(1);
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.start(), Some(TimerEvent::Started));
        assert_eq!(timer.remaining_secs, 60);
    }

    #[test]
    fn reset_applies_new_duration_with_one_minute_floor() {
        let mut timer = TimerState::new(5);
        timer.start();
        assert_eq!(timer.reset(0), Some(TimerEvent::Stopped));
        assert_eq!(timer.total_secs, 60);
        assert_eq!(timer.remaining_secs, 60);
        assert_eq!(timer.status, TimerStatus::Idle);

        assert_eq!(timer.reset(10), None);
        assert_eq!(timer.remaining_secs, 600);
    }

    #[test]
    fn dismiss_hides_and_rearms_edge_detection() {
        let mut timer = TimerState::new(5);
        timer.follow_badge(Badge::Break);
        assert_eq!(timer.dismiss(), Some(TimerEvent::Stopped));
        assert!(!timer.visible);
        assert_eq!(timer.follow_badge(Badge::Break), Some(TimerEvent::Started));
    }
}
