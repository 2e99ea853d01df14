pub mod error;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod polling;
pub mod render;
pub mod safety;
pub mod session;
pub mod settings;
pub mod timer;
pub mod utils;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use monitor::{Monitor, MonitorConfig};
use notify::{LogNotifier, NotificationSink, Notifier, WebhookNotifier};
use polling::{FeedSource, PollController, ThingSpeakFeed};
use settings::{MonitorSettings, SettingsStore};
use timer::commands::command_loop;

/// Wire feeds, notification channels and renderer from settings.
pub fn build_monitor(settings: &MonitorSettings) -> Monitor {
    let config = MonitorConfig {
        worker_id: settings.worker_id.clone(),
        fetch_timeout: settings.fetch_timeout(),
        break_minutes: settings.break_minutes(),
        ..MonitorConfig::default()
    };

    let worker_feed: Arc<dyn FeedSource> =
        Arc::new(ThingSpeakFeed::new("worker", &settings.worker_feed));

    let mut channels: Vec<Arc<dyn NotificationSink>> = vec![Arc::new(LogNotifier)];
    if let Some(url) = &settings.webhook_url {
        channels.push(Arc::new(WebhookNotifier::new(url.clone(), settings.worker_id.clone())));
    }

    let mut builder = Monitor::builder(config, worker_feed).notifier(Notifier::with_channels(channels));
    if let Some(env) = &settings.environment_feed {
        builder = builder.environment_feed(Arc::new(ThingSpeakFeed::new("environment", env)));
    }
    builder.build()
}

pub async fn run() -> Result<()> {
    // Info by default, RUST_LOG wins when set.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("HACI monitor starting up...");

    let store = Arc::new(SettingsStore::new(SettingsStore::default_path())?);
    store.apply_env_overrides();
    let settings = store.settings();

    let monitor = build_monitor(&settings);

    let mut poller = PollController::new();
    poller.start(monitor.clone(), settings.poll_interval())?;

    let cancel_token = CancellationToken::new();
    let commands = tokio::spawn(command_loop(
        BufReader::new(tokio::io::stdin()),
        monitor.clone(),
        Arc::clone(&store),
        cancel_token.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutdown requested");

    cancel_token.cancel();
    poller.stop().await?;
    commands.abort();

    Ok(())
}
