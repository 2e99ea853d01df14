//! Short human notes shown next to each value on the dashboard.

use serde::Serialize;

use crate::models::{EnvironmentReading, Reading};

const NOT_DETECTED: &str = "Sensor not detected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingNotes {
    pub heart_rate: &'static str,
    pub spo2: &'static str,
    pub body_temp: &'static str,
    pub accel: &'static str,
}

impl ReadingNotes {
    pub fn for_reading(reading: &Reading) -> Self {
        Self {
            heart_rate: note_heart_rate(reading.heart_rate),
            spo2: note_spo2(reading.spo2),
            body_temp: note_body_temp(reading.body_temp),
            accel: note_accel(reading.accel),
        }
    }
}

pub fn note_heart_rate(heart_rate: Option<f64>) -> &'static str {
    match heart_rate {
        None => NOT_DETECTED,
        Some(hr) if (60.0..=100.0).contains(&hr) => "Normal range",
        Some(hr) if hr <= 120.0 => "Elevated — monitor",
        Some(_) => "High — possible strain",
    }
}

pub fn note_spo2(spo2: Option<f64>) -> &'static str {
    match spo2 {
        None => NOT_DETECTED,
        Some(s) if s >= 95.0 => "Good oxygenation",
        Some(s) if s >= 92.0 => "Slightly low — monitor",
        Some(_) => "Low — move to safe zone",
    }
}

pub fn note_body_temp(body_temp: Option<f64>) -> &'static str {
    match body_temp {
        None => NOT_DETECTED,
        Some(t) if t <= 37.5 => "Normal",
        Some(t) if t <= 38.0 => "Warm — hydrate",
        Some(_) => "High — heat stress risk",
    }
}

pub fn note_accel(accel: Option<f64>) -> &'static str {
    match accel {
        None => "No reading",
        Some(a) if (0.90..=1.10).contains(&a) => "Stable posture",
        Some(a) if a <= 1.35 => "Light activity",
        Some(a) if a <= 1.80 => "Moderate activity",
        Some(_) => "High activity/impact",
    }
}

pub fn status_detail(anomaly: bool) -> &'static str {
    if anomaly {
        "Unusual pattern detected — monitoring closely."
    } else {
        "Stable pattern — monitoring."
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentNotes {
    pub ambient_temp: &'static str,
    pub humidity: &'static str,
    pub sound_level: &'static str,
    pub air_quality: &'static str,
    pub dust: &'static str,
    pub flame: &'static str,
}

impl EnvironmentNotes {
    pub fn for_reading(env: &EnvironmentReading) -> Self {
        Self {
            ambient_temp: match env.ambient_temp {
                None => NOT_DETECTED,
                Some(t) if t <= 30.0 => "Comfortable",
                Some(t) if t <= 35.0 => "Warm — hydrate",
                Some(_) => "Hot — heat stress risk",
            },
            humidity: match env.humidity {
                None => NOT_DETECTED,
                Some(h) if h <= 60.0 => "Normal",
                Some(h) if h <= 80.0 => "Humid",
                Some(_) => "Very humid — take breaks",
            },
            sound_level: match env.sound_level {
                None => NOT_DETECTED,
                Some(db) if db <= 70.0 => "Normal",
                Some(db) if db <= 85.0 => "Loud",
                Some(_) => "Hazardous — wear hearing protection",
            },
            air_quality: match env.air_quality {
                None => NOT_DETECTED,
                Some(aqi) if aqi <= 50.0 => "Good",
                Some(aqi) if aqi <= 100.0 => "Moderate",
                Some(aqi) if aqi <= 150.0 => "Unhealthy for sensitive groups",
                Some(_) => "Unhealthy — wear respirator",
            },
            dust: match env.dust {
                None => NOT_DETECTED,
                Some(d) if d <= 35.0 => "Low",
                Some(d) if d <= 75.0 => "Elevated",
                Some(_) => "High — wear mask",
            },
            flame: match env.flame {
                None => NOT_DETECTED,
                Some(true) => "Flame detected — evacuate",
                Some(false) => "No flame",
            },
        }
    }
}
