pub mod action;
pub mod feed;
pub mod reading;

pub use action::{Action, Badge, Notification, Tone};
pub use feed::{FeedDocument, FeedEntry};
pub use reading::{EnvironmentReading, Reading};
