// src/generator.rs
// Morse code WAV generator

use crate::error::Result;
use crate::oscillator::Oscillator;
use crate::params::ToneParameters;
use crate::wav::{self, PcmBuffer};
use std::path::{Path, PathBuf};

/// One unit of tone or one unit of silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantum {
    Tone,
    Silence,
}

/// Symbols of the display-form Morse string that produce sound.
///
/// Gaps follow the 1/2/4 scheme: every element ends with one unit of
/// silence, every space in the code adds two more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseElement {
    Dit,
    Dah,
    Space,
}

impl MorseElement {
    pub fn quanta(self) -> &'static [Quantum] {
        use Quantum::*;
        match self {
            MorseElement::Dit => &[Tone, Silence],
            MorseElement::Dah => &[Tone, Tone, Tone, Silence],
            MorseElement::Space => &[Silence, Silence],
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(MorseElement::Dit),
            '-' => Some(MorseElement::Dah),
            ' ' => Some(MorseElement::Space),
            _ => None,
        }
    }
}

/// Elements of a display-form Morse string; any other character is skipped.
pub fn morse_elements(code: &str) -> impl Iterator<Item = MorseElement> + '_ {
    code.chars().filter_map(MorseElement::from_symbol)
}

/// What a finished synthesis call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct WavSummary {
    pub path: PathBuf,
    /// PCM frames (samples per channel).
    pub frames: usize,
    pub channels: u16,
    pub sample_rate: u32,
    /// Whole file size, header included.
    pub bytes: usize,
}

impl WavSummary {
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    /// Individual samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.frames * self.channels as usize
    }
}

pub struct MorseGenerator {
    params: ToneParameters,
    frames_per_unit: usize,
}

impl MorseGenerator {
    pub fn new(params: ToneParameters) -> Self {
        let frames_per_unit = params.frames_per_unit();
        Self {
            params,
            frames_per_unit,
        }
    }

    pub fn params(&self) -> &ToneParameters {
        &self.params
    }

    pub fn frames_per_unit(&self) -> usize {
        self.frames_per_unit
    }

    /// Frames [`render`](Self::render) will produce for `code`, without rendering it.
    pub fn frame_count(&self, code: &str) -> usize {
        let quanta: usize = morse_elements(code).map(|e| e.quanta().len()).sum();
        quanta * self.frames_per_unit
    }

    /// Renders a display-form Morse string (`.`, `-`, spaces) to PCM.
    pub fn render(&self, code: &str) -> PcmBuffer {
        let channels = self.params.channels().count();
        let mut oscillator =
            Oscillator::new(self.params.frequency_hz(), self.params.samples_per_second());
        let mut samples = Vec::with_capacity(self.frame_count(code) * channels as usize);

        for element in morse_elements(code) {
            for quantum in element.quanta() {
                match quantum {
                    Quantum::Tone => {
                        oscillator.fill(&mut samples, self.frames_per_unit, channels)
                    }
                    Quantum::Silence => {
                        samples.resize(samples.len() + self.frames_per_unit * channels as usize, 0)
                    }
                }
            }
        }

        PcmBuffer::new(samples, channels)
    }

    /// Renders `code` and serializes it as a complete WAV image.
    pub fn generate_wav_bytes(&self, code: &str) -> Result<(PcmBuffer, Vec<u8>)> {
        let pcm = self.render(code);
        let bytes = wav::encode_wav(&pcm, self.params.samples_per_second())?;
        Ok((pcm, bytes))
    }

    /// Renders `code` into a new uniquely named WAV file inside `dir`.
    pub fn generate_wav_file<P: AsRef<Path>>(&self, code: &str, dir: P) -> Result<WavSummary> {
        log::info!(
            "wave: {} Hz, tone: {} Hz, code: {:.2} Hz ({} wpm)",
            self.params.samples_per_second(),
            self.params.frequency_hz(),
            self.params.synth_wpm() / 1.2,
            self.params.words_per_minute()
        );

        let (pcm, bytes) = self.generate_wav_bytes(code)?;
        let path = wav::write_unique(dir.as_ref(), &bytes)?;

        let summary = WavSummary {
            path,
            frames: pcm.frame_count(),
            channels: pcm.channels(),
            sample_rate: self.params.samples_per_second(),
            bytes: bytes.len(),
        };
        log::info!(
            "{} PCM samples ({:.2} s @ {} kHz) written to {:?} ({:.2} kB)",
            summary.sample_count(),
            summary.duration_secs(),
            summary.sample_rate as f64 / 1e3,
            summary.path,
            summary.bytes as f64 / 1024.0
        );
        Ok(summary)
    }
}
