// src/params.rs
// Tone parameters with the safe operating ranges applied

use std::ops::RangeInclusive;

pub const FREQUENCY_RANGE_HZ: RangeInclusive<f64> = 20.0..=8000.0;
pub const WPM_RANGE: RangeInclusive<f64> = 0.0..=50.0;
pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8000..=48000;

/// Slowest speed actually synthesized. A clamped speed of 0 wpm would make
/// the unit duration infinite.
pub const MIN_SYNTH_WPM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channels {
    Mono,
    #[default]
    Stereo,
}

impl Channels {
    pub fn count(self) -> u16 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

/// Oscillator and timing settings. Construct through [`ToneParameters::new`],
/// which clamps every value into its legal range instead of rejecting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    frequency_hz: f64,
    words_per_minute: f64,
    samples_per_second: u32,
    channels: Channels,
}

impl ToneParameters {
    pub fn new(
        frequency_hz: f64,
        words_per_minute: f64,
        samples_per_second: u32,
        channels: Channels,
    ) -> Self {
        let params = Self {
            frequency_hz: clamp_f64(frequency_hz, FREQUENCY_RANGE_HZ),
            words_per_minute: clamp_f64(words_per_minute, WPM_RANGE),
            samples_per_second: samples_per_second
                .clamp(*SAMPLE_RATE_RANGE.start(), *SAMPLE_RATE_RANGE.end()),
            channels,
        };
        if params.frequency_hz != frequency_hz
            || params.words_per_minute != words_per_minute
            || params.samples_per_second != samples_per_second
        {
            log::debug!(
                "clamped tone parameters to {} Hz, {} wpm, {} sps",
                params.frequency_hz,
                params.words_per_minute,
                params.samples_per_second
            );
        }
        params
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn words_per_minute(&self) -> f64 {
        self.words_per_minute
    }

    pub fn samples_per_second(&self) -> u32 {
        self.samples_per_second
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Speed used for timing, never below [`MIN_SYNTH_WPM`].
    pub fn synth_wpm(&self) -> f64 {
        self.words_per_minute.max(MIN_SYNTH_WPM)
    }

    /// Seconds per Morse unit (PARIS: 50 units per word).
    pub fn unit_seconds(&self) -> f64 {
        1.2 / self.synth_wpm()
    }

    /// PCM frames in one quantum of tone or silence.
    pub fn frames_per_unit(&self) -> usize {
        (self.unit_seconds() * self.samples_per_second as f64).round() as usize
    }
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self::new(880.0, 20.0, 44100, Channels::Stereo)
    }
}

/// Narrows a sample rate read as a signed integer (CLI flag, config file)
/// into [`SAMPLE_RATE_RANGE`].
pub fn clamp_sample_rate(samples_per_second: i64) -> u32 {
    let (low, high) = (*SAMPLE_RATE_RANGE.start(), *SAMPLE_RATE_RANGE.end());
    samples_per_second.clamp(low as i64, high as i64) as u32
}

// NaN goes to the lower bound.
fn clamp_f64(value: f64, range: RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
