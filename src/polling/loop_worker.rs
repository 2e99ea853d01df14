use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::monitor::{Monitor, SourceOutcome};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Run poll cycles every `interval` until cancelled. The first cycle runs immediately.
///
/// Cycles never overlap: a slow cycle delays the next tick instead of stacking.
pub async fn poll_loop(monitor: Monitor, interval: Duration, cancel_token: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                cycle += 1;
                let started = Instant::now();
                let report = monitor.run_cycle().await;

                if let SourceOutcome::Failed(err) = &report.worker {
                    log_warn!("cycle {cycle}: worker pipeline skipped ({err})");
                }
                if report.environment.is_failed() {
                    log_debug!("cycle {cycle}: environment panel marked as errored");
                }
                log_debug!("cycle {cycle} finished in {}ms", started.elapsed().as_millis());
            }
            _ = cancel_token.cancelled() => {
                log_info!("poll loop shutting down after {cycle} cycle(s)");
                break;
            }
        }
    }
}
