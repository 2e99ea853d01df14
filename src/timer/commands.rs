//! Operator requests for the break timer, read line by line from stdin.

use std::sync::Arc;

use anyhow::{bail, Result};
use log::{error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::monitor::Monitor;
use crate::render::summarize;
use crate::settings::SettingsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Stop,
    /// `None` keeps the configured duration.
    Reset(Option<u32>),
    Status,
}

impl TimerCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" => TimerCommand::Start,
            "stop" => TimerCommand::Stop,
            "status" => TimerCommand::Status,
            "reset" => match parts.next() {
                None => TimerCommand::Reset(None),
                Some(raw) => match raw.parse::<u32>() {
                    Ok(minutes) if minutes >= 1 => TimerCommand::Reset(Some(minutes)),
                    _ => bail!("reset expects whole minutes >= 1, got '{raw}'"),
                },
            },
            other => bail!("unknown command '{other}' (start | stop | reset [minutes] | status)"),
        };

        if parts.next().is_some() {
            bail!("too many arguments for '{verb}'");
        }
        Ok(command)
    }
}

pub async fn apply_command(
    command: TimerCommand,
    monitor: &Monitor,
    settings: &SettingsStore,
) -> Result<()> {
    match command {
        TimerCommand::Start => {
            let timer = monitor.start_break_timer().await;
            info!("break timer {:?}, {}s left", timer.status, timer.remaining_secs);
        }
        TimerCommand::Stop => {
            let timer = monitor.stop_break_timer().await;
            info!("break timer {:?}, {}s left", timer.status, timer.remaining_secs);
        }
        TimerCommand::Reset(minutes) => {
            let minutes = match minutes {
                Some(minutes) => {
                    settings.update_break_minutes(minutes)?;
                    minutes
                }
                None => settings.settings().break_minutes(),
            };
            let timer = monitor.reset_break_timer(minutes).await;
            info!("break timer reset to {} minute(s)", timer.total_secs / 60);
        }
        TimerCommand::Status => {
            let snapshot = monitor.snapshot().await;
            info!("[{}] {}", snapshot.worker_id, summarize(&snapshot));
        }
    }
    Ok(())
}

/// Read commands until EOF or cancellation. Bad input is reported and skipped.
pub async fn command_loop<R>(
    reader: R,
    monitor: Monitor,
    settings: Arc<SettingsStore>,
    cancel_token: CancellationToken,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = cancel_token.cancelled() => break,
        };

        match line {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => {
                let result = match TimerCommand::parse(&line) {
                    Ok(command) => apply_command(command, &monitor, &settings).await,
                    Err(err) => Err(err),
                };
                if let Err(err) = result {
                    error!("command '{}' rejected: {err:#}", line.trim());
                }
            }
            Ok(None) => break,
            Err(err) => {
                error!("failed to read command input: {err}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, nominal_row, ScriptedFeed};
    use crate::timer::TimerStatus;

    #[test]
    fn parses_known_commands() {
        assert_eq!(TimerCommand::parse("start").unwrap(), TimerCommand::Start);
        assert_eq!(TimerCommand::parse("  STOP ").unwrap(), TimerCommand::Stop);
        assert_eq!(TimerCommand::parse("status").unwrap(), TimerCommand::Status);
        assert_eq!(TimerCommand::parse("reset").unwrap(), TimerCommand::Reset(None));
        assert_eq!(TimerCommand::parse("reset 3").unwrap(), TimerCommand::Reset(Some(3)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(TimerCommand::parse("").is_err());
        assert!(TimerCommand::parse("pause").is_err());
        assert!(TimerCommand::parse("reset 0").is_err());
        assert!(TimerCommand::parse("reset 2.5").is_err());
        assert!(TimerCommand::parse("start now").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn command_loop_applies_valid_lines_and_skips_bad_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = Arc::new(SettingsStore::new(path.clone()).unwrap());
        let h = harness(5, ScriptedFeed::new("worker", [nominal_row()]), None);

        let input: &[u8] = b"start\n\nbogus\nreset 2\nstatus\n";
        command_loop(input, h.monitor.clone(), store.clone(), CancellationToken::new()).await;

        let timer = h.monitor.timer().await;
        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.total_secs, 120);
        assert!(!h.monitor.ticker_active());

        assert_eq!(store.settings().break_minutes, 2);
        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.settings().break_minutes, 2);
    }

    #[tokio::test]
    async fn command_loop_stops_on_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SettingsStore::new(dir.path().join("settings.json")).unwrap());
        let h = harness(5, ScriptedFeed::new("worker", [nominal_row()]), None);

        let (_writer, reader) = tokio::io::duplex(64);
        let token = CancellationToken::new();
        token.cancel();
        command_loop(
            tokio::io::BufReader::new(reader),
            h.monitor.clone(),
            store,
            token,
        )
        .await;
    }
}
