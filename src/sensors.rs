use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{ECHO_TIMEOUT_US, NO_ECHO_CM};
use crate::timer::Clock;

/// Analog inputs of the monitor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Sound,
    Flame,
    Water,
    Light,
}

/// Raw analog capability.
/// Readings are on a 10-bit scale (0..=1023); adapters never fail and return
/// an in-range value when a channel cannot be read.
pub trait AnalogChannels {
    fn read(&mut self, channel: Channel) -> u16;
}

/// Every sensor reading of one loop iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    pub sound: u16,
    pub flame: u16,
    pub water: u16,
    pub light: u16,
    pub distance_cm: u16,
}

/// Source of [`SensorSnapshot`]s for the main loop
pub trait Sensors {
    fn sample<D: DelayNs, C: Clock>(&mut self, delay: &mut D, clock: &C) -> SensorSnapshot;
}

/// Converts an echo pulse width to centimeters (speed of sound 0.034cm/us, there and back)
pub fn echo_to_cm(echo_us: u64) -> u16 {
    let cm = echo_us.saturating_mul(17) / 1000;
    u16::try_from(cm).unwrap_or(u16::MAX)
}

/// HC-SR04 style ultrasonic range finder
pub struct UltrasonicProbe<T, E>
where
    T: OutputPin,
    E: InputPin,
{
    trigger: T,
    echo: E,
    timeout_us: u64,
}

impl<T, E> UltrasonicProbe<T, E>
where
    T: OutputPin,
    E: InputPin,
{
    pub fn new(trigger: T, echo: E) -> Self {
        Self::with_timeout(trigger, echo, ECHO_TIMEOUT_US)
    }

    pub fn with_timeout(trigger: T, echo: E, timeout_us: u64) -> Self {
        Self {
            trigger,
            echo,
            timeout_us,
        }
    }

    /// Fires a trigger pulse and times the echo.
    /// returns None when no complete echo arrives within the timeout
    pub fn measure_cm<D: DelayNs, C: Clock>(&mut self, delay: &mut D, clock: &C) -> Option<u16> {
        self.trigger.set_low().ok();
        delay.delay_us(2);
        self.trigger.set_high().ok();
        delay.delay_us(10);
        self.trigger.set_low().ok();

        self.pulse_width_us(clock).map(echo_to_cm)
    }

    fn pulse_width_us<C: Clock>(&mut self, clock: &C) -> Option<u64> {
        let start = clock.now_us();
        // A previous echo may still be in flight
        self.wait_for(false, start, clock)?;
        self.wait_for(true, start, clock)?;
        let rise = clock.now_us();
        self.wait_for(false, start, clock)?;
        Some(clock.now_us().saturating_sub(rise))
    }

    fn wait_for<C: Clock>(&mut self, high: bool, start: u64, clock: &C) -> Option<()> {
        loop {
            if self.echo.is_high().unwrap_or(false) == high {
                return Some(());
            }
            if clock.now_us().saturating_sub(start) >= self.timeout_us {
                return None;
            }
        }
    }
}

/// Polls every sensor of the monitor once per call
pub struct SensorReader<A, T, E>
where
    A: AnalogChannels,
    T: OutputPin,
    E: InputPin,
{
    analog: A,
    probe: UltrasonicProbe<T, E>,
}

impl<A, T, E> SensorReader<A, T, E>
where
    A: AnalogChannels,
    T: OutputPin,
    E: InputPin,
{
    pub fn new(analog: A, probe: UltrasonicProbe<T, E>) -> Self {
        Self { analog, probe }
    }
}

impl<A, T, E> Sensors for SensorReader<A, T, E>
where
    A: AnalogChannels,
    T: OutputPin,
    E: InputPin,
{
    fn sample<D: DelayNs, C: Clock>(&mut self, delay: &mut D, clock: &C) -> SensorSnapshot {
        let sound = self.analog.read(Channel::Sound);
        let flame = self.analog.read(Channel::Flame);
        let water = self.analog.read(Channel::Water);
        let light = self.analog.read(Channel::Light);
        let distance_cm = match self.probe.measure_cm(delay, clock) {
            Some(cm) => cm,
            None => {
                warn!("No echo from ultrasonic probe, assuming no obstacle");
                NO_ECHO_CM
            }
        };

        let snapshot = SensorSnapshot {
            sound,
            flame,
            water,
            light,
            distance_cm,
        };
        trace!(
            "sound={} flame={} water={} light={} distance={}cm",
            sound,
            flame,
            water,
            light,
            distance_cm
        );
        snapshot
    }
}
