// src/lib.rs
// Library interface for morsewav

pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod hex;
pub mod oscillator;
pub mod params;
pub mod table;
pub mod wav;

pub use codec::{fix_input, morse_binary, morse_decode, morse_encode};
pub use config::Config;
pub use error::{MorseError, Result};
pub use generator::{MorseGenerator, WavSummary};
pub use hex::{Dialect, bin_morse_hexdecimal, hexdecimal_bin_txt};
pub use params::{Channels, ToneParameters};
pub use wav::PcmBuffer;
