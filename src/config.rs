// src/config.rs
// TOML configuration file support

use crate::params::{Channels, ToneParameters, clamp_sample_rate};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Defaults for synthesis, normally read from a TOML file:
///
/// ```toml
/// output_dir = "wav-files-morse"
/// frequency_hz = 880.0
/// words_per_minute = 20.0
/// samples_per_second = 44100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub frequency_hz: f64,
    pub words_per_minute: f64,
    /// Signed so out-of-range values are clamped rather than rejected.
    pub samples_per_second: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("wav-files-morse"),
            frequency_hz: 880.0,
            words_per_minute: 20.0,
            samples_per_second: 44100,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Tone parameters for these settings, clamped into range.
    pub fn tone_parameters(&self, channels: Channels) -> ToneParameters {
        ToneParameters::new(
            self.frequency_hz,
            self.words_per_minute,
            clamp_sample_rate(self.samples_per_second),
            channels,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            output_dir: PathBuf::from("/tmp/morse"),
            frequency_hz: 600.0,
            words_per_minute: 25.0,
            samples_per_second: 22050,
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();
        let loaded = Config::from_file(temp_file.path()).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("words_per_minute = 30.0").unwrap();
        assert_eq!(config.words_per_minute, 30.0);
        assert_eq!(config.frequency_hz, 880.0);
        assert_eq!(config.output_dir, PathBuf::from("wav-files-morse"));
    }

    #[test]
    fn test_tone_parameters_are_clamped() {
        let config = Config {
            frequency_hz: 5.0,
            samples_per_second: 1000,
            ..Config::default()
        };
        let params = config.tone_parameters(Channels::Mono);
        assert_eq!(params.frequency_hz(), 20.0);
        assert_eq!(params.samples_per_second(), 8000);
    }

    #[test]
    fn test_negative_sample_rate_in_file_is_clamped() {
        let config: Config = toml::from_str("samples_per_second = -5").unwrap();
        assert_eq!(config.samples_per_second, -5);
        let params = config.tone_parameters(Channels::Stereo);
        assert_eq!(params.samples_per_second(), 8000);

        let config: Config = toml::from_str("samples_per_second = 5000000000").unwrap();
        assert_eq!(config.tone_parameters(Channels::Mono).samples_per_second(), 48000);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
    }
}
