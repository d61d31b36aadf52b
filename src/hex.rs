// src/hex.rs
// Hexadecimal byte notation of binary Morse

use crate::codec::{morse_binary, morse_decode};
use crate::error::{InputKind, MorseError, Result};

const SPACE_TOKEN: &str = "20";

/// Selects which ASCII codes the hex tokens stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `.` `-` space as `2E` `2D` `20` (dialect 0)
    #[default]
    Symbolic,
    /// `0` `1` space as `30` `31` `20` (dialect 1)
    Binary,
}

impl Dialect {
    fn dit(self) -> &'static str {
        match self {
            Dialect::Symbolic => "2E",
            Dialect::Binary => "30",
        }
    }

    fn dah(self) -> &'static str {
        match self {
            Dialect::Symbolic => "2D",
            Dialect::Binary => "31",
        }
    }

    fn input_kind(self) -> InputKind {
        match self {
            Dialect::Symbolic => InputKind::HexSymbolic,
            Dialect::Binary => InputKind::HexBinary,
        }
    }
}

impl TryFrom<u8> for Dialect {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Dialect::Symbolic),
            1 => Ok(Dialect::Binary),
            other => Err(format!("unknown hex dialect {other}, expected 0 or 1")),
        }
    }
}

/// Encodes text as space-separated hex tokens.
///
/// `"SOS"` in [`Dialect::Symbolic`] gives
/// `"2E 2E 2E 20 2D 2D 2D 20 2E 2E 2E"`; a word break shows up as `20 20`.
pub fn bin_morse_hexdecimal(text: &str, dialect: Dialect) -> String {
    morse_binary(text)
        .chars()
        .filter_map(|c| match c {
            '0' => Some(dialect.dit()),
            '1' => Some(dialect.dah()),
            ' ' => Some(SPACE_TOKEN),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes hex tokens written by [`bin_morse_hexdecimal`] in the same dialect.
///
/// Whitespace inside the input is ignored, so `2E2E20` and `2E 2E 20` are the
/// same. Any pair that is not one of the dialect's three tokens rejects the
/// whole input.
pub fn hexdecimal_bin_txt(hex: &str, dialect: Dialect) -> Result<String> {
    let input_error = || MorseError::Input {
        kind: dialect.input_kind(),
    };

    let digits: Vec<u8> = hex
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if digits.is_empty() || digits.len() % 2 != 0 {
        return Err(input_error());
    }

    let mut binary = String::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let symbol = match pair {
            p if p == SPACE_TOKEN.as_bytes() => ' ',
            p if p == dialect.dit().as_bytes() => '0',
            p if p == dialect.dah().as_bytes() => '1',
            _ => return Err(input_error()),
        };
        binary.push(symbol);
    }
    log::debug!("hex {dialect:?} decoded to binary {binary:?}");

    morse_decode(binary.trim_matches(' ')).map_err(|_| input_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dialects() {
        assert_eq!(
            bin_morse_hexdecimal("SOS", Dialect::Symbolic),
            "2E 2E 2E 20 2D 2D 2D 20 2E 2E 2E"
        );
        assert_eq!(bin_morse_hexdecimal("ET", Dialect::Binary), "30 20 31");
        assert_eq!(bin_morse_hexdecimal("E T", Dialect::Binary), "30 20 20 31");
        assert_eq!(bin_morse_hexdecimal("", Dialect::Binary), "");
    }

    #[test]
    fn test_decode_dialects() {
        assert_eq!(
            hexdecimal_bin_txt("2E 2E 2E 20 2D 2D 2D 20 2E 2E 2E", Dialect::Symbolic).unwrap(),
            "SOS"
        );
        assert_eq!(hexdecimal_bin_txt("30 20 20 31", Dialect::Binary).unwrap(), "E T");
        assert_eq!(hexdecimal_bin_txt("302031", Dialect::Binary).unwrap(), "ET");
        assert_eq!(hexdecimal_bin_txt("2e 2d", Dialect::Symbolic).unwrap(), "ET");
    }

    #[test]
    fn test_decode_rejects_wrong_dialect() {
        let err = hexdecimal_bin_txt("2E 2D", Dialect::Binary).unwrap_err();
        assert!(matches!(
            err,
            MorseError::Input {
                kind: InputKind::HexBinary
            }
        ));
        assert!(hexdecimal_bin_txt("30 31", Dialect::Symbolic).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(hexdecimal_bin_txt("", Dialect::Symbolic).is_err());
        assert!(hexdecimal_bin_txt("2E 2", Dialect::Symbolic).is_err());
        assert!(hexdecimal_bin_txt("41 42", Dialect::Symbolic).is_err());
        assert!(hexdecimal_bin_txt("20 20", Dialect::Symbolic).is_err());
    }

    #[test]
    fn test_dialect_from_selector() {
        assert_eq!(Dialect::try_from(0), Ok(Dialect::Symbolic));
        assert_eq!(Dialect::try_from(1), Ok(Dialect::Binary));
        assert!(Dialect::try_from(2).is_err());
    }
}
