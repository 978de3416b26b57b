// Breathing effect: e^sin(x), shifted and stretched so that it spans
// the whole hardware range.
//
//     (exp(sin(phase * pi)) - 1/e) * (999 / (e - 1/e))

use std::f64::consts::PI;

use crate::color::Color;
use crate::color::HardwareFrame;
use crate::color::HARDWARE_MAX;

const INV_E: f64 = 0.36787944;
const AMPLITUDE_GAIN: f64 = 425.03360505;

pub const PHASE_STEP: f64 = 0.01;
/// Number of ticks until the phase returns to zero (phase 2.0).
pub const STEPS_PER_PERIOD: u32 = 200;

pub fn amplitude(phase: f64) -> f64 {
    return ((phase * PI).sin().exp() - INV_E) * AMPLITUDE_GAIN;
}

/// Phase accumulator of the breathing effect.
///
/// The phase is kept as a step count so that it wraps after exactly
/// `STEPS_PER_PERIOD` ticks instead of drifting with float error.
#[derive(Clone, Debug, Default)]
pub struct BreathWaveform {
    step: u32,
}

impl BreathWaveform {
    pub fn new() -> BreathWaveform {
        return BreathWaveform { step: 0 };
    }

    /// Current phase in [0, 2.0).
    pub fn phase(&self) -> f64 {
        return self.step as f64 * PHASE_STEP;
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Computes the frame for the current phase, then advances the phase.
    pub fn next_frame(&mut self, color: &Color) -> HardwareFrame {
        let amp = amplitude(self.phase());
        self.step += 1;
        if self.step >= STEPS_PER_PERIOD {
            self.step = 0;
        }
        return HardwareFrame {
            r: modulate(color.r, amp),
            g: modulate(color.g, amp),
            b: modulate(color.b, amp),
        };
    }
}

fn modulate(channel: f64, amp: f64) -> i64 {
    (HARDWARE_MAX - (channel * amp).abs()) as i64
}
