pub mod anomaly;
pub mod decision;
pub mod normalize;
pub mod notes;
pub mod scoring;

pub use anomaly::{AnomalyDetector, RuleDetector};
pub use decision::decide_action;
pub use normalize::{normalize_environment, normalize_worker};
pub use scoring::{compute_haci, score_breakdown, HaciBreakdown, SeverityBand};
