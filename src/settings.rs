use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use crate::timer::state::DEFAULT_BREAK_MINUTES;

pub const CONFIG_PATH_ENV: &str = "HACI_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "haci-monitor.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedSettings {
    pub base_url: String,
    pub channel_id: String,
    /// Per-deployment read capability, sent as `api_key`.
    pub read_key: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.thingspeak.com".into(),
            channel_id: "2436533".into(),
            read_key: "IEHPXGUC6U1K4NJX".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorSettings {
    pub worker_id: String,
    pub worker_feed: FeedSettings,
    pub environment_feed: Option<FeedSettings>,
    pub poll_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub break_minutes: u32,
    pub webhook_url: Option<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            worker_id: "W-001".into(),
            worker_feed: FeedSettings::default(),
            environment_feed: None,
            poll_interval_secs: 8,
            fetch_timeout_secs: 8,
            break_minutes: DEFAULT_BREAK_MINUTES,
            webhook_url: None,
        }
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes.max(1)
    }

    /// Apply `HACI_*` overrides from the given lookup (normally the process env).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(channel) = lookup("HACI_WORKER_CHANNEL") {
            self.worker_feed.channel_id = channel;
        }
        if let Some(key) = lookup("HACI_WORKER_READ_KEY") {
            self.worker_feed.read_key = key;
        }

        let env_channel = lookup("HACI_ENV_CHANNEL");
        let env_key = lookup("HACI_ENV_READ_KEY");
        if env_channel.is_some() || env_key.is_some() {
            let feed = self.environment_feed.get_or_insert_with(|| FeedSettings {
                channel_id: String::new(),
                read_key: String::new(),
                ..FeedSettings::default()
            });
            if let Some(channel) = env_channel {
                feed.channel_id = channel;
            }
            if let Some(key) = env_key {
                feed.read_key = key;
            }
        }

        if let Some(url) = lookup("HACI_WEBHOOK_URL") {
            self.webhook_url = Some(url);
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<MonitorSettings>,
}

impl SettingsStore {
    /// Path from `HACI_CONFIG`, else `haci-monitor.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings in {}: {err}", path.display());
                MonitorSettings::default()
            })
        } else {
            MonitorSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> MonitorSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn apply_env_overrides(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn update_break_minutes(&self, minutes: u32) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.break_minutes = minutes.max(1);
        self.persist(&guard)
    }

    fn persist(&self, data: &MonitorSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
