//! Test doubles for the hardware traits.
//! Time is simulated: delays advance a shared microsecond counter and every
//! clock read moves it forward by 1us so busy-wait loops terminate.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use ufmt::uWrite;

use crate::buzzer::ToneOutput;
use crate::indicator::{Indicator, Rgb};
use crate::rendering::TextDisplay;
use crate::sensors::{SensorSnapshot, Sensors};
use crate::timer::Clock;

#[derive(Clone, Debug, Default)]
pub struct SimTime {
    micros: Rc<Cell<u64>>,
}

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, us: u64) {
        self.micros.set(self.micros.get().saturating_add(us));
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    pub fn elapsed_us(&self) -> u64 {
        self.micros.get()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.micros.get() / 1000
    }
}

impl Clock for SimTime {
    fn now_us(&self) -> u64 {
        let now = self.micros.get();
        self.advance_us(1);
        now
    }
}

pub struct SimDelay {
    time: SimTime,
}

impl SimDelay {
    pub fn new(time: SimTime) -> Self {
        Self { time }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_us(u64::from(ns).div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.time.advance_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.advance_ms(u64::from(ms));
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockPin {
    pub states: Rc<RefCell<Vec<bool>>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_states(&self) -> Vec<bool> {
        self.states.borrow().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.states.borrow().last().copied()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.states.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.states.borrow_mut().push(true);
        Ok(())
    }
}

/// Echo line that is high while `rise_us <= t < fall_us`
pub struct EchoPin {
    time: SimTime,
    rise_us: u64,
    fall_us: u64,
}

impl EchoPin {
    pub fn new(time: SimTime, rise_us: u64, fall_us: u64) -> Self {
        Self {
            time,
            rise_us,
            fall_us,
        }
    }

    pub fn never(time: SimTime) -> Self {
        Self::new(time, u64::MAX, u64::MAX)
    }
}

impl ErrorType for EchoPin {
    type Error = Infallible;
}

impl InputPin for EchoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let t = self.time.elapsed_us();
        Ok(self.rise_us <= t && t < self.fall_us)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Line(u8, String),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    ops: Vec<DisplayOp>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.clone()
    }

    /// What the two rows show after every recorded operation
    pub fn screen(&self) -> (String, String) {
        let mut rows = (String::new(), String::new());
        for op in &self.ops {
            match op {
                DisplayOp::Clear => rows = (String::new(), String::new()),
                DisplayOp::Line(0, text) => rows.0 = text.clone(),
                DisplayOp::Line(_, text) => rows.1 = text.clone(),
            }
        }
        rows
    }
}

impl TextDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.ops.push(DisplayOp::Clear);
    }

    fn write_line(&mut self, row: u8, text: &str) {
        self.ops.push(DisplayOp::Line(row, text.into()));
    }
}

#[derive(Debug, Default)]
pub struct RecordingIndicator {
    colors: Vec<Rgb>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.colors.clone()
    }
}

impl Indicator for RecordingIndicator {
    fn set_color(&mut self, color: Rgb) {
        self.colors.push(color);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuzzerOp {
    Play {
        frequency_hz: u32,
        duration_ms: u32,
        at_ms: u64,
    },
    Stop {
        at_ms: u64,
    },
}

pub struct RecordingBuzzer {
    time: SimTime,
    ops: Vec<BuzzerOp>,
}

impl RecordingBuzzer {
    pub fn new(time: SimTime) -> Self {
        Self {
            time,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> Vec<BuzzerOp> {
        self.ops.clone()
    }
}

impl ToneOutput for RecordingBuzzer {
    fn play(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.ops.push(BuzzerOp::Play {
            frequency_hz,
            duration_ms,
            at_ms: self.time.elapsed_ms(),
        });
    }

    fn stop(&mut self) {
        self.ops.push(BuzzerOp::Stop {
            at_ms: self.time.elapsed_ms(),
        });
    }
}

/// Diagnostic channel captured as text
#[derive(Debug, Default)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl uWrite for Transcript {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.text.push_str(s);
        Ok(())
    }
}

/// Replays readings in order, then keeps returning the last one
pub struct ScriptedSensors {
    readings: VecDeque<SensorSnapshot>,
    last: SensorSnapshot,
}

impl ScriptedSensors {
    pub fn new(readings: &[SensorSnapshot]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            last: SensorSnapshot {
                sound: 100,
                flame: 900,
                water: 900,
                light: 800,
                distance_cm: 200,
            },
        }
    }
}

impl Sensors for ScriptedSensors {
    fn sample<D: DelayNs, C: Clock>(&mut self, _delay: &mut D, _clock: &C) -> SensorSnapshot {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last
    }
}
