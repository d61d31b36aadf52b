// src/error.rs
// Error types for morsewav

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which alphabet a rejected decode input was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `0 1 . -` and whitespace
    Morse,
    /// hex tokens `2E 2D 20`
    HexSymbolic,
    /// hex tokens `30 31 20`
    HexBinary,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Morse => write!(f, "morse (0 1 . - <space>)"),
            InputKind::HexSymbolic => write!(f, "hex morse (2E 2D 20)"),
            InputKind::HexBinary => write!(f, "hex binary morse (30 31 20)"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MorseError {
    #[error("INPUT-ERROR: input is not valid {kind}")]
    Input { kind: InputKind },

    #[error("cannot create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output file {path:?}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, MorseError>;
