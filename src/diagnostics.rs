use ufmt::{uWrite, uwriteln};

use crate::alert::AlertDecision;

const RULE: &str = "----------------------------------------";

/// Names reported by the self-test, in report order
pub const SELF_TEST_SENSORS: [&str; 5] = [
    "Sound Sensor",
    "Flame Sensor",
    "Water Sensor",
    "Light Sensor",
    "Ultrasonic Sensor",
];

/// Writes the record for one alert to the diagnostic channel
pub fn write_alert<W: uWrite + ?Sized>(out: &mut W, decision: &AlertDecision) -> Result<(), W::Error> {
    uwriteln!(out, "{}", RULE)?;
    uwriteln!(out, "Sensor: {}", decision.kind.sensor_name())?;
    uwriteln!(out, "Alert: {}", decision.message)?;
    uwriteln!(out, "Severity: {}", decision.severity.label())?;
    uwriteln!(out, "{}", RULE)
}

/// Writes the self-test report.
/// Every sensor is reported OK, nothing is read back.
pub fn write_self_test<W: uWrite + ?Sized>(out: &mut W) -> Result<(), W::Error> {
    uwriteln!(out, "Self-Test Results:")?;
    uwriteln!(out, "{}", RULE)?;
    for sensor in SELF_TEST_SENSORS {
        uwriteln!(out, "{}: OK", sensor)?;
    }
    uwriteln!(out, "{}", RULE)
}
