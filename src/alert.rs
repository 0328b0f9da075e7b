//! Alert arbitration: which sensor, if any, raises an alert this cycle.

use crate::config::{Thresholds, THRESHOLDS};
use crate::sensors::SensorSnapshot;
use crate::timer::in_cooldown;

/// Sensor that triggered an alert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertType {
    Sound,
    Fire,
    Water,
    Tamper,
    Proximity,
}

impl AlertType {
    /// Name used in diagnostic records
    pub fn sensor_name(self) -> &'static str {
        match self {
            AlertType::Sound => "Sound Sensor",
            AlertType::Fire => "Fire Sensor",
            AlertType::Water => "Water Sensor",
            AlertType::Tamper => "Tamper Sensor",
            AlertType::Proximity => "Proximity Sensor",
        }
    }
}

/// How loudly an alert is announced.
/// Only Critical alerts reach the screen, LED and buzzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertSeverity {
    Normal,
    Moderate,
    Critical,
}

impl AlertSeverity {
    pub fn label(self) -> &'static str {
        match self {
            AlertSeverity::Normal => "NORMAL",
            AlertSeverity::Moderate => "MODERATE",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertDecision {
    pub kind: AlertType,
    pub severity: AlertSeverity,
    pub message: &'static str,
}

struct Rule {
    decision: AlertDecision,
    trips: fn(&SensorSnapshot, &Thresholds) -> bool,
}

const fn rule(
    kind: AlertType,
    severity: AlertSeverity,
    message: &'static str,
    trips: fn(&SensorSnapshot, &Thresholds) -> bool,
) -> Rule {
    Rule {
        decision: AlertDecision {
            kind,
            severity,
            message,
        },
        trips,
    }
}

// Checked top to bottom, the first rule that trips wins.
// Flame, water and light sensors read lower when they detect something.
const RULES: [Rule; 5] = [
    rule(
        AlertType::Fire,
        AlertSeverity::Critical,
        "FIRE DETECTED",
        |s, t| s.flame < t.flame,
    ),
    rule(
        AlertType::Proximity,
        AlertSeverity::Critical,
        "PROXIMITY ALERT",
        |s, t| s.distance_cm < t.distance_cm,
    ),
    rule(
        AlertType::Sound,
        AlertSeverity::Moderate,
        "Sound Alert",
        |s, t| s.sound > t.sound,
    ),
    rule(
        AlertType::Water,
        AlertSeverity::Critical,
        "Water Detected",
        |s, t| s.water < t.water,
    ),
    rule(
        AlertType::Tamper,
        AlertSeverity::Moderate,
        "Tamper Alert",
        |s, t| s.light < t.light,
    ),
];

/// Pure alert decision logic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlertPolicy {
    thresholds: Thresholds,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new(THRESHOLDS)
    }
}

impl AlertPolicy {
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Decides whether the snapshot raises an alert.
    /// Nothing fires while `now_ms - last_alert_ms < cooldown_ms`, whatever the readings.
    pub fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        now_ms: u64,
        last_alert_ms: u64,
        cooldown_ms: u64,
    ) -> Option<AlertDecision> {
        if in_cooldown(now_ms, last_alert_ms, cooldown_ms) {
            return None;
        }
        RULES
            .iter()
            .find(|rule| (rule.trips)(snapshot, &self.thresholds))
            .map(|rule| rule.decision)
    }
}
