//! Error types for feed fetching and notification delivery.

use std::time::Duration;

use thiserror::Error;

/// Why a feed could not produce a latest entry this cycle.
///
/// Every variant is recovered the same way: the source is marked as errored and
/// retried on the next scheduled cycle.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or protocol failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("feed returned HTTP {0}")]
    Status(u16),

    /// Payload without a usable `feeds` entry
    #[error("malformed feed payload: {0}")]
    Malformed(String),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors raised by a notification channel. Always swallowed by the notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("channel rejected notification with HTTP {0}")]
    Rejected(u16),

    #[error("{0}")]
    Other(String),
}
