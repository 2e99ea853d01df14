use serde::{Deserialize, Serialize};

/// One normalized worker sample.
///
/// `None` means the field failed its plausibility filter or the sensor is
/// missing. It never stands in for a genuine zero reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    /// Oxygen saturation in percent.
    pub spo2: Option<f64>,
    /// Body temperature in °C.
    pub body_temp: Option<f64>,
    /// Acceleration magnitude in g.
    pub accel: Option<f64>,
    pub fall: bool,
    /// When false every other field is unobserved for this cycle.
    pub presence: bool,
}

impl Reading {
    /// A present worker with every vital missing.
    pub fn present() -> Self {
        Self {
            presence: true,
            ..Self::default()
        }
    }
}

/// Ambient conditions around the worker. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReading {
    pub ambient_temp: Option<f64>,
    pub humidity: Option<f64>,
    pub sound_level: Option<f64>,
    pub air_quality: Option<f64>,
    pub dust: Option<f64>,
    pub flame: Option<bool>,
}
