// src/codec.rs
// Text <-> Morse conversion in symbolic (. -) and binary (0 1) notation

use crate::error::{InputKind, MorseError, Result};
use crate::table::{CodeTable, Glyph, MAX_SYMBOL_UNITS, to_display};

const PUNCTUATION: &str = "!$\"'(),-./:;=?@_";

/// Characters that survive `fix_input`.
pub fn is_supported(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_ascii_whitespace() || PUNCTUATION.contains(ch)
}

/// Cleans raw text before encoding. Every run of unsupported characters
/// becomes a single space, then surrounding spaces are trimmed.
pub fn fix_input(text: &str) -> String {
    let mut fixed = String::with_capacity(text.len());
    for token in text.split(|c: char| !is_supported(c)).filter(|t| !t.is_empty()) {
        fixed.push_str(token);
        fixed.push(' ');
    }
    fixed.trim_matches(' ').to_string()
}

/// Encodes text as display-form Morse, e.g. `"SOS"` -> `"... --- ..."`.
/// Words are separated by two spaces.
pub fn morse_encode(text: &str) -> String {
    encode_with(text, to_display)
}

/// Encodes text as binary Morse, e.g. `"SOS"` -> `"000 111 000"`.
pub fn morse_binary(text: &str) -> String {
    encode_with(text, |code| code.to_string())
}

fn encode_with(text: &str, render: impl Fn(&str) -> String) -> String {
    let table = CodeTable::get();
    let normalized = collapse_whitespace(&fix_input(text));

    let mut line = String::with_capacity(normalized.len() * 6);
    for ch in normalized.chars() {
        // fix_input left only table characters
        if let Some(code) = table.symbol(ch) {
            line.push_str(&render(code));
            line.push(' ');
        }
    }
    line.trim_matches(' ').to_string()
}

/// Every whitespace run becomes one plain space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Decodes symbolic or binary Morse back to text.
///
/// Letters are separated by one space and words by two. A token that is too
/// long, not in the table, or mixing `.`/`-` with `0`/`1` decodes to `?` and
/// decoding carries on. Letters in different notations may share a line. Input
/// containing anything but `0 1 . -` and whitespace is rejected as a whole.
pub fn morse_decode(code: &str) -> Result<String> {
    if code.is_empty() || !code.chars().all(|c| is_morse_char(c) || c.is_ascii_whitespace()) {
        return Err(MorseError::Input {
            kind: InputKind::Morse,
        });
    }

    let table = CodeTable::get();
    let code: String = code
        .chars()
        .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
        .collect();

    let mut tokens: Vec<&str> = code.split(' ').collect();
    // A single trailing separator does not open another token.
    if tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    let mut line = String::with_capacity(tokens.len());
    for token in tokens {
        if token.is_empty() {
            line.push(' ');
            continue;
        }
        let ch = if token.len() > MAX_SYMBOL_UNITS {
            '?'
        } else {
            match table.lookup(token) {
                Some(Glyph::Char(ch)) => ch,
                Some(Glyph::Unknown) | None => '?',
            }
        };
        line.push(ch);
    }

    Ok(collapse_spaces(&line))
}

fn is_morse_char(ch: char) -> bool {
    matches!(ch, '0' | '1' | '.' | '-')
}

/// Runs of two or more spaces become one.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(ch);
    }
    out
}
