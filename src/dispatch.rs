use embedded_hal::delay::DelayNs;
use ufmt::uWrite;

use crate::alert::{AlertDecision, AlertSeverity};
use crate::buzzer::{sound_critical, ToneOutput};
use crate::config::{ALERT_COOLDOWN_MS, ALERT_HOLD_MS};
use crate::diagnostics::write_alert;
use crate::indicator::{Indicator, Rgb};
use crate::rendering::{render_alert_screen, render_ready_screen, TextDisplay};
use crate::timer::Cooldown;

/// Coarse operating mode shown to the operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemPhase {
    Startup,
    SelfTest,
    Normal,
    Alert,
}

/// Mutable state carried from one loop iteration to the next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorState {
    pub phase: SystemPhase,
    pub cooldown: Cooldown,
}

impl MonitorState {
    pub const fn new(cooldown_ms: u64) -> Self {
        Self {
            phase: SystemPhase::Startup,
            cooldown: Cooldown::new(cooldown_ms),
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new(ALERT_COOLDOWN_MS)
    }
}

/// The display, status LED and buzzer
pub struct OutputDrivers<L, I, Z>
where
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
{
    pub display: L,
    pub indicator: I,
    pub buzzer: Z,
}

impl<L, I, Z> OutputDrivers<L, I, Z>
where
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
{
    pub fn new(display: L, indicator: I, buzzer: Z) -> Self {
        Self {
            display,
            indicator,
            buzzer,
        }
    }

    /// Resting state: ready screen and a green LED
    pub fn show_ready(&mut self) {
        render_ready_screen(&mut self.display);
        self.indicator.set_color(Rgb::GREEN);
    }
}

/// Acts on an alert decision.
/// The cooldown is armed and the record logged for every severity; critical
/// alerts also block for the full siren and hold time before returning to
/// the ready screen.
pub fn dispatch<L, I, Z, W, D>(
    state: &mut MonitorState,
    decision: &AlertDecision,
    now_ms: u64,
    outputs: &mut OutputDrivers<L, I, Z>,
    diagnostics: &mut W,
    delay: &mut D,
) where
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
    W: uWrite,
    D: DelayNs,
{
    state.cooldown.arm(now_ms);
    write_alert(diagnostics, decision).ok();
    info!(
        "{}: {} ({})",
        decision.kind.sensor_name(),
        decision.message,
        decision.severity.label()
    );

    if decision.severity != AlertSeverity::Critical {
        return;
    }

    raise_critical(state, decision, outputs);
    sound_critical(&mut outputs.buzzer, delay);
    delay.delay_ms(ALERT_HOLD_MS);
    clear_critical(state, outputs);
}

/// Enters the Alert phase: alert banner and a red LED
pub fn raise_critical<L, I, Z>(
    state: &mut MonitorState,
    decision: &AlertDecision,
    outputs: &mut OutputDrivers<L, I, Z>,
) where
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
{
    state.phase = SystemPhase::Alert;
    render_alert_screen(&mut outputs.display, decision.message);
    outputs.indicator.set_color(Rgb::RED);
}

/// Leaves the Alert phase and restores the ready screen
pub fn clear_critical<L, I, Z>(state: &mut MonitorState, outputs: &mut OutputDrivers<L, I, Z>)
where
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
{
    state.phase = SystemPhase::Normal;
    outputs.show_ready();
    debug!("Alert cleared, monitoring resumed");
}
