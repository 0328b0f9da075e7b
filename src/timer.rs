/// Monotonic time source. On the RP2040 this is the 1MHz system timer.
pub trait Clock {
    /// Microseconds since boot
    fn now_us(&self) -> u64;

    /// Milliseconds since boot
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

/// True while an alert at `last_alert_ms` still suppresses new ones.
/// A clock reading behind `last_alert_ms` counts as still cooling down.
pub const fn in_cooldown(now_ms: u64, last_alert_ms: u64, period_ms: u64) -> bool {
    now_ms.saturating_sub(last_alert_ms) < period_ms
}

/// Global alert cooldown shared by every alert type.
/// last_alert_ms: When the last alert was dispatched; 0 until the first one
/// period_ms: How long new alerts are suppressed afterwards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cooldown {
    last_alert_ms: u64,
    period_ms: u64,
}

impl Cooldown {
    pub const fn new(period_ms: u64) -> Cooldown {
        Self {
            last_alert_ms: 0,
            period_ms,
        }
    }

    pub fn last_alert_ms(&self) -> u64 {
        self.last_alert_ms
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Records an alert at `now_ms`. The timestamp never moves backwards.
    pub fn arm(&mut self, now_ms: u64) {
        if now_ms > self.last_alert_ms {
            self.last_alert_ms = now_ms;
        }
    }
}
