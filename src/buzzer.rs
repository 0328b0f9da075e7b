use embedded_hal::delay::DelayNs;

use crate::config::{
    ALERT_HIGH_TONE_HZ, ALERT_LOW_TONE_HZ, ALERT_PAUSE_MS, ALERT_REPEATS, ALERT_TONE_MS,
};

/// Tone generator driving the buzzer.
/// `play` starts a tone and returns immediately; callers wait out the duration.
pub trait ToneOutput {
    fn play(&mut self, frequency_hz: u32, duration_ms: u32);
    fn stop(&mut self);
}

/// One timed step of a buzzer sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Tone { frequency_hz: u32, duration_ms: u32 },
    Pause(u32),
}

/// High/low siren played for critical alerts, repeated [`ALERT_REPEATS`] times
pub const CRITICAL_PATTERN: [Step; 4] = [
    Step::Tone {
        frequency_hz: ALERT_HIGH_TONE_HZ,
        duration_ms: ALERT_TONE_MS,
    },
    Step::Pause(ALERT_PAUSE_MS),
    Step::Tone {
        frequency_hz: ALERT_LOW_TONE_HZ,
        duration_ms: ALERT_TONE_MS,
    },
    Step::Pause(ALERT_PAUSE_MS),
];

/// Plays the steps in order, blocking for each one.
/// Every tone is stopped before the next step starts.
pub fn play_sequence<Z, D>(buzzer: &mut Z, delay: &mut D, steps: &[Step])
where
    Z: ToneOutput,
    D: DelayNs,
{
    for step in steps {
        match *step {
            Step::Tone {
                frequency_hz,
                duration_ms,
            } => {
                buzzer.play(frequency_hz, duration_ms);
                delay.delay_ms(duration_ms);
                buzzer.stop();
            }
            Step::Pause(ms) => delay.delay_ms(ms),
        }
    }
}

/// Sounds the critical siren and leaves the buzzer silent
pub fn sound_critical<Z, D>(buzzer: &mut Z, delay: &mut D)
where
    Z: ToneOutput,
    D: DelayNs,
{
    for _ in 0..ALERT_REPEATS {
        play_sequence(buzzer, delay, &CRITICAL_PATTERN);
    }
    buzzer.stop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BuzzerOp, RecordingBuzzer, SimDelay, SimTime};

    #[test]
    fn test_tone_is_stopped_after_its_duration() {
        let time = SimTime::new();
        let mut delay = SimDelay::new(time.clone());
        let mut buzzer = RecordingBuzzer::new(time.clone());

        play_sequence(
            &mut buzzer,
            &mut delay,
            &[Step::Tone {
                frequency_hz: 1000,
                duration_ms: 200,
            }],
        );

        assert_eq!(
            buzzer.ops(),
            vec![
                BuzzerOp::Play {
                    frequency_hz: 1000,
                    duration_ms: 200,
                    at_ms: 0
                },
                BuzzerOp::Stop { at_ms: 200 },
            ]
        );
    }

    #[test]
    fn test_critical_siren() {
        let time = SimTime::new();
        let mut delay = SimDelay::new(time.clone());
        let mut buzzer = RecordingBuzzer::new(time.clone());

        sound_critical(&mut buzzer, &mut delay);

        let tones: Vec<u32> = buzzer
            .ops()
            .iter()
            .filter_map(|op| match op {
                BuzzerOp::Play { frequency_hz, .. } => Some(*frequency_hz),
                _ => None,
            })
            .collect();
        assert_eq!(tones, vec![2000, 1500, 2000, 1500, 2000, 1500]);
        assert_eq!(buzzer.ops().last(), Some(&BuzzerOp::Stop { at_ms: 3000 }));
        assert_eq!(time.elapsed_ms(), 3000);
    }
}
