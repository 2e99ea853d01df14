//! Raw feed fields to validated readings.
//!
//! Worker and environment feeds coerce differently: a worker field that is
//! missing or non-numeric counts as a raw `0` before the plausibility filter,
//! while an environment field in the same state is simply absent.

use serde_json::Value;

use crate::models::{EnvironmentReading, FeedEntry, Reading};

pub const WORKER_HEART_RATE_FIELD: u8 = 1;
pub const WORKER_SPO2_FIELD: u8 = 2;
pub const WORKER_TEMP_FIELD: u8 = 3;
pub const WORKER_ACCEL_FIELD: u8 = 4;
pub const WORKER_FALL_FIELD: u8 = 5;
pub const WORKER_PRESENCE_FIELD: u8 = 6;

pub const ENV_TEMP_FIELD: u8 = 1;
pub const ENV_HUMIDITY_FIELD: u8 = 2;
pub const ENV_SOUND_FIELD: u8 = 3;
pub const ENV_AIR_QUALITY_FIELD: u8 = 4;
pub const ENV_DUST_FIELD: u8 = 5;
pub const ENV_FLAME_FIELD: u8 = 6;

const SPO2_FLOOR: f64 = 70.0;
const BODY_TEMP_FLOOR: f64 = 34.0;

/// Coerce a feed value to a finite number.
///
/// Blank strings, `null`, unparseable text and non-finite results all yield `None`.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn worker_raw(entry: &FeedEntry, index: u8) -> f64 {
    coerce_number(entry.field(index)).unwrap_or(0.0)
}

pub fn normalize_worker(entry: &FeedEntry) -> Reading {
    let heart_rate = worker_raw(entry, WORKER_HEART_RATE_FIELD);
    let spo2 = worker_raw(entry, WORKER_SPO2_FIELD);
    let body_temp = worker_raw(entry, WORKER_TEMP_FIELD);
    let accel = worker_raw(entry, WORKER_ACCEL_FIELD);

    Reading {
        heart_rate: (heart_rate > 0.0).then_some(heart_rate),
        spo2: (spo2 >= SPO2_FLOOR).then_some(spo2),
        body_temp: (body_temp >= BODY_TEMP_FLOOR).then_some(body_temp),
        accel: (accel > 0.0).then_some(accel),
        fall: worker_raw(entry, WORKER_FALL_FIELD) != 0.0,
        presence: worker_raw(entry, WORKER_PRESENCE_FIELD) != 0.0,
    }
}

fn environment_value(entry: &FeedEntry, index: u8) -> Option<f64> {
    coerce_number(entry.field(index)).filter(|v| *v >= 0.0)
}

pub fn normalize_environment(entry: &FeedEntry) -> EnvironmentReading {
    EnvironmentReading {
        ambient_temp: environment_value(entry, ENV_TEMP_FIELD),
        humidity: environment_value(entry, ENV_HUMIDITY_FIELD),
        sound_level: environment_value(entry, ENV_SOUND_FIELD),
        air_quality: environment_value(entry, ENV_AIR_QUALITY_FIELD),
        dust: environment_value(entry, ENV_DUST_FIELD),
        flame: environment_value(entry, ENV_FLAME_FIELD).map(|v| v != 0.0),
    }
}
