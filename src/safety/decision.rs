use crate::models::{Action, Badge, Notification, Reading};

const LOW_SPO2_LIMIT: f64 = 92.0;
const HEAT_STRESS_LIMIT: f64 = 38.0;
const BREAK_SCORE_LIMIT: u8 = 60;
const ANOMALY_BREAK_SCORE_LIMIT: u8 = 75;

/// Pick the single action for this cycle.
///
/// Rules are checked in hazard order (fall, low SpO2, heat, fatigue) and the
/// first match wins. An absent worker short-circuits to the waiting action.
pub fn decide_action(reading: &Reading, score: u8, anomaly: bool) -> Action {
    if !reading.presence {
        return Action::awaiting_presence();
    }

    if reading.fall {
        return Action {
            title: "Emergency: Fall detected".into(),
            detail: "Stay still. Call supervisor immediately.".into(),
            badge: Badge::Critical,
            notification: Some(Notification::new(
                "🚨 EMERGENCY",
                "Fall detected! Call supervisor.",
            )),
        };
    }

    if reading.spo2.is_some_and(|s| s < LOW_SPO2_LIMIT) {
        return Action {
            title: "Alert: Low SpO₂".into(),
            detail: "Move to a safe zone and take deep breaths.".into(),
            badge: Badge::Alert,
            notification: Some(Notification::new(
                "⚠ Low SpO₂",
                "Move to safe zone immediately.",
            )),
        };
    }

    if reading.body_temp.is_some_and(|t| t > HEAT_STRESS_LIMIT) {
        return Action {
            title: "Alert: Heat stress risk".into(),
            detail: "Hydrate and cool down. Inform supervisor if persistent.".into(),
            badge: Badge::Alert,
            notification: Some(Notification::new(
                "⚠ Heat Stress",
                "Take rest + hydration now.",
            )),
        };
    }

    if score < BREAK_SCORE_LIMIT || (anomaly && score < ANOMALY_BREAK_SCORE_LIMIT) {
        return Action {
            title: "Micro-break recommended".into(),
            detail: "Take 3–5 minutes rest + hydrate. Resume when stable.".into(),
            badge: Badge::Break,
            notification: Some(Notification::new(
                "⚠ Micro-break",
                "Take 3–5 minutes rest + hydrate.",
            )),
        };
    }

    Action {
        title: "Normal".into(),
        detail: "All readings stable. Continue monitoring.".into(),
        badge: Badge::Safe,
        notification: None,
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
    fn fall_outranks_low_spo2() {
        let reading = Reading {
            fall: true,
            spo2: Some(80.0),
            ..nominal()
        };
        let action = decide_action(&reading, 10, true);
        assert_eq!(action.badge, Badge::Critical);
        assert_eq!(action.title, "Emergency: Fall detected");
        assert!(action.notification.is_some());
    }

    #[test]
    fn low_spo2_outranks_heat() {
        let reading = Reading {
            spo2: Some(91.0),
            body_temp: Some(39.0),
            ..nominal()
        };
        let action = decide_action(&reading, 50, true);
        assert_eq!(action.badge, Badge::Alert);
        assert_eq!(action.title, "Alert: Low SpO₂");
    }

    #[test]
    fn heat_outranks_break() {
        let reading = Reading {
            body_temp: Some(38.01),
            ..nominal()
        };
        let action = decide_action(&reading, 20, false);
        assert_eq!(action.title, "Alert: Heat stress risk");
        assert_eq!(action.notification.unwrap().title, "⚠ Heat Stress");
    }

    #[test]
    fn threshold_values_do_not_alert() {
        let reading = Reading {
            spo2: Some(92.0),
            body_temp: Some(38.0),
            ..nominal()
        };
        assert_eq!(decide_action(&reading, 90, false).badge, Badge::Safe);
    }

    #[test]
    fn break_on_low_score_or_anomalous_middling_score() {
        assert_eq!(decide_action(&nominal(), 59, false).badge, Badge::Break);
        assert_eq!(decide_action(&nominal(), 60, false).badge, Badge::Safe);
        assert_eq!(decide_action(&nominal(), 74, true).badge, Badge::Break);
        assert_eq!(decide_action(&nominal(), 75, true).badge, Badge::Safe);
    }

    #[test]
    fn safe_action_has_no_notification() {
        let action = decide_action(&nominal(), 100, false);
        assert_eq!(action.badge, Badge::Safe);
        assert_eq!(action.title, "Normal");
        assert!(action.notification.is_none());
    }

    #[test]
    fn absent_worker_gets_waiting_action_regardless_of_vitals() {
        let reading = Reading {
            presence: false,
            fall: true,
            spo2: Some(75.0),
            ..Reading::default()
        };
        let action = decide_action(&reading, 0, true);
        assert_eq!(action.badge, Badge::NotApplicable);
        assert!(action.notification.is_none());
    }
}
