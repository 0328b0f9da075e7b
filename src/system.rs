use embedded_hal::delay::DelayNs;
use ufmt::uWrite;

use crate::alert::{AlertDecision, AlertPolicy};
use crate::buzzer::ToneOutput;
use crate::config::{
    LOOP_INTERVAL_MS, SELF_TEST_STEP_MS, SELF_TEST_TONE_HZ, SELF_TEST_TONE_MS,
    SELF_TEST_TONE_SLOT_MS,
};
use crate::diagnostics::write_self_test;
use crate::dispatch::{dispatch, MonitorState, OutputDrivers, SystemPhase};
use crate::indicator::{Indicator, Rgb};
use crate::rendering::{render_startup_screen, TextDisplay};
use crate::sensors::{SensorSnapshot, Sensors};
use crate::timer::Clock;

/// The cooperative main loop of the monitor.
/// Everything runs on one thread; alert sequences block sampling until they finish.
pub struct Monitor<S, L, I, Z, W, D, C>
where
    S: Sensors,
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
    W: uWrite,
    D: DelayNs,
    C: Clock,
{
    sensors: S,
    outputs: OutputDrivers<L, I, Z>,
    diagnostics: W,
    delay: D,
    clock: C,
    policy: AlertPolicy,
    state: MonitorState,
}

impl<S, L, I, Z, W, D, C> Monitor<S, L, I, Z, W, D, C>
where
    S: Sensors,
    L: TextDisplay,
    I: Indicator,
    Z: ToneOutput,
    W: uWrite,
    D: DelayNs,
    C: Clock,
{
    pub fn new(
        sensors: S,
        outputs: OutputDrivers<L, I, Z>,
        diagnostics: W,
        delay: D,
        clock: C,
    ) -> Self {
        Self::with_policy(
            sensors,
            outputs,
            diagnostics,
            delay,
            clock,
            AlertPolicy::default(),
            MonitorState::default(),
        )
    }

    pub fn with_policy(
        sensors: S,
        outputs: OutputDrivers<L, I, Z>,
        diagnostics: W,
        delay: D,
        clock: C,
        policy: AlertPolicy,
        state: MonitorState,
    ) -> Self {
        Self {
            sensors,
            outputs,
            diagnostics,
            delay,
            clock,
            policy,
            state,
        }
    }

    pub fn phase(&self) -> SystemPhase {
        self.state.phase
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn outputs(&self) -> &OutputDrivers<L, I, Z> {
        &self.outputs
    }

    pub fn diagnostics(&self) -> &W {
        &self.diagnostics
    }

    /// Brings outputs to a safe state, runs the self-test and enters Normal
    pub fn start(&mut self) {
        self.state.phase = SystemPhase::Startup;
        info!("Home monitor starting");
        self.outputs.indicator.set_color(Rgb::OFF);
        self.outputs.buzzer.stop();
        render_startup_screen(&mut self.outputs.display);

        self.state.phase = SystemPhase::SelfTest;
        self.self_test();

        self.state.phase = SystemPhase::Normal;
        self.outputs.show_ready();
        info!("Home monitor ready");
    }

    // Cosmetic: cycles the outputs and reports every sensor OK without reading any
    fn self_test(&mut self) {
        for color in [Rgb::RED, Rgb::GREEN, Rgb::BLUE] {
            self.outputs.indicator.set_color(color);
            self.delay.delay_ms(SELF_TEST_STEP_MS);
        }
        self.outputs.indicator.set_color(Rgb::OFF);

        self.outputs.buzzer.play(SELF_TEST_TONE_HZ, SELF_TEST_TONE_MS);
        self.delay.delay_ms(SELF_TEST_TONE_MS);
        self.outputs.buzzer.stop();
        self.delay.delay_ms(SELF_TEST_TONE_SLOT_MS - SELF_TEST_TONE_MS);

        write_self_test(&mut self.diagnostics).ok();
    }

    /// One loop iteration: sample, decide, act, then sleep the loop interval
    pub fn step(&mut self) -> Option<AlertDecision> {
        let snapshot: SensorSnapshot = self.sensors.sample(&mut self.delay, &self.clock);
        let now_ms = self.clock.now_ms();
        let decision = self.policy.evaluate(
            &snapshot,
            now_ms,
            self.state.cooldown.last_alert_ms(),
            self.state.cooldown.period_ms(),
        );

        if let Some(decision) = &decision {
            dispatch(
                &mut self.state,
                decision,
                now_ms,
                &mut self.outputs,
                &mut self.diagnostics,
                &mut self.delay,
            );
        }

        self.delay.delay_ms(LOOP_INTERVAL_MS);
        decision
    }

    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.step();
        }
    }
}
