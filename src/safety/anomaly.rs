use crate::models::Reading;

/// Flags a reading as unusual. Implementations must be pure.
pub trait AnomalyDetector: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect(&self, reading: &Reading) -> bool;
}

/// Fixed threshold table used until a trained classifier is available.
#[derive(Debug, Clone)]
pub struct RuleDetector {
    pub accel_limit: f64,
    pub heart_rate_limit: f64,
    pub spo2_floor: f64,
}

impl Default for RuleDetector {
    fn default() -> Self {
        Self {
            accel_limit: 2.2,
            heart_rate_limit: 130.0,
            spo2_floor: 90.0,
        }
    }
}

impl AnomalyDetector for RuleDetector {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn detect(&self, reading: &Reading) -> bool {
        reading.fall
            || reading.accel.is_some_and(|a| a > self.accel_limit)
            || reading.heart_rate.is_some_and(|hr| hr > self.heart_rate_limit)
            || reading.spo2.is_some_and(|s| s < self.spo2_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> Reading {
        Reading {
            heart_rate: Some(75.0),
            spo2: Some(97.0),
            body_temp: Some(36.8),
            accel: Some(1.0),
            ..Reading::present()
        }
    }

    #[test]
    fn nominal_reading_is_not_anomalous() {
        assert!(!RuleDetector::default().detect(&nominal()));
    }

    #[test]
    fn each_rule_trips_on_its_own() {
        let detector = RuleDetector::default();
        assert!(detector.detect(&Reading { fall: true, ..nominal() }));
        assert!(detector.detect(&Reading { accel: Some(2.21), ..nominal() }));
        assert!(detector.detect(&Reading { heart_rate: Some(131.0), ..nominal() }));
        assert!(detector.detect(&Reading { spo2: Some(89.9), ..nominal() }));
    }

    #[test]
    fn limits_are_exclusive() {
        let detector = RuleDetector::default();
        assert!(!detector.detect(&Reading { accel: Some(2.2), ..nominal() }));
        assert!(!detector.detect(&Reading { heart_rate: Some(130.0), ..nominal() }));
        assert!(!detector.detect(&Reading { spo2: Some(90.0), ..nominal() }));
    }

    #[test]
    fn absent_fields_never_trip() {
        assert!(!RuleDetector::default().detect(&Reading::present()));
    }
}
