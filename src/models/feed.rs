use serde::Deserialize;
use serde_json::{Map, Value};

/// Channel feed document as returned by `/channels/{id}/feeds.json`.
///
/// Only `feeds` is required; the channel header is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub feeds: Vec<FeedEntry>,
}

impl FeedDocument {
    /// The most recent entry, if the channel has any.
    pub fn into_latest(self) -> Option<FeedEntry> {
        self.feeds.into_iter().last()
    }
}

/// One feed row. Field values arrive as strings, numbers or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl FeedEntry {
    /// `index` is one-based, matching the `field1`..`field8` column names.
    pub fn field(&self, index: u8) -> Option<&Value> {
        self.values.get(&format!("field{index}"))
    }

    #[cfg(test)]
    pub fn with_field(mut self, index: u8, value: impl Into<Value>) -> Self {
        self.values.insert(format!("field{index}"), value.into());
        self
    }
}
