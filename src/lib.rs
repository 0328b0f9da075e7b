#![cfg_attr(not(test), no_std)]

//! # homeguard
//! ## A home security monitor in Rust
//!
//! Features:
//! - Fire, water, sound, tamper (light) and proximity detection
//! - Fixed-priority alert arbitration with a global cooldown
//! - 16x2 LCD status screen
//! - RGB status LED and buzzer siren for critical alerts
//! - Alert records on a text diagnostic channel

#[macro_use]
mod fmt;

pub mod alert;
pub mod buzzer;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod indicator;
pub mod rendering;
pub mod sensors;
pub mod system;
pub mod timer;

#[cfg(test)]
mod mock;

pub use alert::{AlertDecision, AlertPolicy, AlertSeverity, AlertType};
pub use dispatch::{dispatch, MonitorState, OutputDrivers, SystemPhase};
pub use sensors::SensorSnapshot;
pub use system::Monitor;
