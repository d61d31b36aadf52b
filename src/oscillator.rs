// src/oscillator.rs
// Phase-continuous sine source

use std::f64::consts::TAU;

/// Fraction of full scale used for tones.
pub const AMPLITUDE: f64 = 0.8;

/// Sine oscillator that remembers where the previous tone stopped, so tone
/// quanta written back to back join without a click.
#[derive(Debug, Clone)]
pub struct Oscillator {
    omega: f64,
    phase: f64,
}

impl Oscillator {
    pub fn new(frequency_hz: f64, sample_rate: u32) -> Self {
        Self {
            omega: TAU * frequency_hz / sample_rate as f64,
            phase: 0.0,
        }
    }

    /// Current phase in radians, in `[0, 2π)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Appends `frames` tone samples, each written `channels` times.
    pub fn fill(&mut self, out: &mut Vec<i16>, frames: usize, channels: u16) {
        let scale = AMPLITUDE * i16::MAX as f64;
        let limit = i16::MAX as f64;
        out.reserve(frames * channels as usize);

        for i in 0..frames {
            let value = (self.phase + i as f64 * self.omega).sin() * scale;
            let sample = value.clamp(-limit, limit) as i16;
            for _ in 0..channels {
                out.push(sample);
            }
        }

        self.phase = (self.phase + frames as f64 * self.omega).rem_euclid(TAU);
    }
}
