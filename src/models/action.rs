use serde::{Deserialize, Serialize};

/// Display tone used by the render sink for badges and bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Badge {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "ALERT")]
    Alert,
    #[serde(rename = "BREAK")]
    Break,
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Badge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Critical => "CRITICAL",
            Badge::Alert => "ALERT",
            Badge::Break => "BREAK",
            Badge::Safe => "SAFE",
            Badge::NotApplicable => "N/A",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Badge::Critical | Badge::Alert => Tone::Bad,
            Badge::Break => Tone::Warn,
            Badge::Safe => Tone::Good,
            Badge::NotApplicable => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn break_complete() -> Self {
        Self::new(
            "✅ Break complete",
            "Micro-break finished. Resume work when stable.",
        )
    }
}

/// What the dashboard should surface for one cycle. Never carried over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub title: String,
    pub detail: String,
    pub badge: Badge,
    pub notification: Option<Notification>,
}

impl Action {
    pub fn awaiting_presence() -> Self {
        Self {
            title: "Waiting for presence…".into(),
            detail: "No alerts while worker is not detected.".into(),
            badge: Badge::NotApplicable,
            notification: None,
        }
    }

    pub fn tone(&self) -> Tone {
        self.badge.tone()
    }
}
