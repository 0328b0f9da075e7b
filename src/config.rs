/// Thresholds defines the reading at which each sensor is considered alarm-worthy.
/// sound: Trips when the reading is above this value
/// flame: Trips when the reading is below this value (lower is more sensitive)
/// water: Trips when the reading is below this value
/// light: Trips when the reading is below this value (enclosure opened / covered)
/// distance_cm: Trips when an object is closer than this many centimeters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    pub sound: u16,
    pub flame: u16,
    pub water: u16,
    pub light: u16,
    pub distance_cm: u16,
}

impl Thresholds {
    pub const fn new() -> Self {
        Thresholds {
            sound: 400,
            flame: 250,
            water: 500,
            light: 500,
            distance_cm: 50,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new()
    }
}

pub const THRESHOLDS: Thresholds = Thresholds::new();

// Alerting
pub const ALERT_COOLDOWN_MS: u64 = 5000;
pub const ALERT_HOLD_MS: u32 = 2000; // Time the alert stays on screen after the buzzer
pub const ALERT_REPEATS: usize = 3;
pub const ALERT_HIGH_TONE_HZ: u32 = 2000;
pub const ALERT_LOW_TONE_HZ: u32 = 1500;
pub const ALERT_TONE_MS: u32 = 200;
pub const ALERT_PAUSE_MS: u32 = 300;

// Main loop
pub const LOOP_INTERVAL_MS: u32 = 100;

// Self-test
pub const SELF_TEST_STEP_MS: u32 = 500;
pub const SELF_TEST_TONE_HZ: u32 = 1000;
pub const SELF_TEST_TONE_MS: u32 = 200;
pub const SELF_TEST_TONE_SLOT_MS: u32 = 300;

// Ultrasonic probe
pub const ECHO_TIMEOUT_US: u64 = 38_000; // HC-SR04 drops the echo line after ~38ms
pub const NO_ECHO_CM: u16 = u16::MAX;

// Analog inputs are reported on a 10-bit scale
pub const ANALOG_FULL_SCALE: u16 = 1023;
