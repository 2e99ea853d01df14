use serde::{Deserialize, Serialize};

use crate::models::{Reading, Tone};

const ANOMALY_PENALTY: i32 = 8;
const FALL_PENALTY: i32 = 25;

/// Per-factor contributions behind one HACI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HaciBreakdown {
    pub spo2: i32,
    pub heart_rate: i32,
    pub temperature: i32,
    pub activity: i32,
    pub penalty: i32,
    pub score: u8,
}

/// Compute the HACI score with its four sub-scores and penalties.
///
/// Stateless: the same reading and anomaly flag always give the same result.
pub fn score_breakdown(reading: &Reading, anomaly: bool) -> HaciBreakdown {
    let spo2 = score_spo2(reading.spo2);
    let heart_rate = score_heart_rate(reading.heart_rate);
    let temperature = score_temperature(reading.body_temp);
    let activity = score_activity(reading.accel, reading.fall);

    let mut penalty = 0;
    if anomaly {
        penalty += ANOMALY_PENALTY;
    }
    if reading.fall {
        penalty += FALL_PENALTY;
    }

    let sum = spo2 + heart_rate + temperature + activity - penalty;

    HaciBreakdown {
        spo2,
        heart_rate,
        temperature,
        activity,
        penalty,
        score: sum.clamp(0, 100) as u8,
    }
}

pub fn compute_haci(reading: &Reading, anomaly: bool) -> u8 {
    score_breakdown(reading, anomaly).score
}

/// SpO2 factor, max 35.
fn score_spo2(spo2: Option<f64>) -> i32 {
    match spo2 {
        None => 24,
        Some(s) if s >= 95.0 => 35,
        Some(s) if s >= 92.0 => 28,
        Some(s) if s >= 88.0 => 20,
        Some(_) => 12,
    }
}

/// Heart-rate factor, max 25.
fn score_heart_rate(heart_rate: Option<f64>) -> i32 {
    match heart_rate {
        None => 18,
        Some(hr) if (60.0..=100.0).contains(&hr) => 25,
        Some(hr) if hr <= 120.0 => 18,
        Some(_) => 12,
    }
}

/// Body-temperature factor, max 20.
fn score_temperature(body_temp: Option<f64>) -> i32 {
    match body_temp {
        None => 14,
        Some(t) if t <= 37.5 => 20,
        Some(t) if t <= 38.0 => 14,
        Some(_) => 10,
    }
}

/// Activity factor, max 20. A fall zeroes it; missing acceleration scores as
/// the least stable band.
fn score_activity(accel: Option<f64>, fall: bool) -> i32 {
    if fall {
        return 0;
    }
    match accel {
        Some(a) if (0.90..=1.10).contains(&a) => 20,
        Some(a) if a <= 1.35 => 16,
        Some(a) if a <= 1.80 => 12,
        _ => 8,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeverityBand {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl SeverityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => SeverityBand::Safe,
            60..=79 => SeverityBand::Moderate,
            40..=59 => SeverityBand::Warning,
            _ => SeverityBand::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::Safe => "SAFE",
            SeverityBand::Moderate => "MODERATE",
            SeverityBand::Warning => "WARNING",
            SeverityBand::Critical => "CRITICAL",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SeverityBand::Safe => Tone::Good,
            SeverityBand::Moderate | SeverityBand::Warning => Tone::Warn,
            SeverityBand::Critical => Tone::Bad,
        }
    }
}
