use crate::models::Notification;
use crate::safety::SeverityBand;

/// Identity of the last forwarded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupKey {
    pub title: String,
    pub body: String,
    pub band: SeverityBand,
}

/// Suppresses a notification whose (title, body, band) matches the last one
/// forwarded. Lives for the whole process.
#[derive(Debug, Default)]
pub struct NotificationGate {
    last_sent: Option<DedupKey>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the notification should go out, recording it as sent.
    pub fn admit(&mut self, notification: &Notification, band: SeverityBand) -> bool {
        let unchanged = self.last_sent.as_ref().is_some_and(|key| {
            key.band == band && key.title == notification.title && key.body == notification.body
        });
        if unchanged {
            return false;
        }

        self.last_sent = Some(DedupKey {
            title: notification.title.clone(),
            body: notification.body.clone(),
            band,
        });
        true
    }

    pub fn last_sent(&self) -> Option<&DedupKey> {
        self.last_sent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_spo2() -> Notification {
        Notification::new("⚠ Low SpO₂", "Move to safe zone immediately.")
    }

    #[test]
    fn identical_repeat_is_suppressed() {
        let mut gate = NotificationGate::new();
        assert!(gate.admit(&low_spo2(), SeverityBand::Warning));
        assert!(!gate.admit(&low_spo2(), SeverityBand::Warning));
        assert!(!gate.admit(&low_spo2(), SeverityBand::Warning));
    }

    #[test]
    fn band_change_unsuppresses() {
        let mut gate = NotificationGate::new();
        assert!(gate.admit(&low_spo2(), SeverityBand::Warning));
        assert!(gate.admit(&low_spo2(), SeverityBand::Critical));
        assert_eq!(gate.last_sent().unwrap().band, SeverityBand::Critical);
    }

    #[test]
    fn message_change_unsuppresses() {
        let mut gate = NotificationGate::new();
        let heat = Notification::new("⚠ Heat Stress", "Take rest + hydration now.");
        assert!(gate.admit(&low_spo2(), SeverityBand::Warning));
        assert!(gate.admit(&heat, SeverityBand::Warning));
        assert!(gate.admit(&low_spo2(), SeverityBand::Warning));
    }
}
