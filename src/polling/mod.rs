pub mod controller;
pub mod feed;
pub mod loop_worker;

pub use controller::PollController;
pub use feed::{FeedSource, ThingSpeakFeed};
pub use loop_worker::poll_loop;
