// src/table.rs
// Character <-> Morse symbol tables

use std::collections::HashMap;
use std::sync::LazyLock;

/// Longest symbol the table holds, in dit/dah units. Decode tokens longer
/// than this are never looked up.
pub const MAX_SYMBOL_UNITS: usize = 8;

/// Eight dits, the "error" prosign. Occupies the reverse table as a sentinel.
pub const UNKNOWN_CODE: &str = "00000000";

// '0' is a dit and '1' a dah. Space has the empty symbol.
const ENTRIES: &[(char, &str)] = &[
    (' ', ""),
    ('!', "101011"),
    ('$', "0001001"),
    ('"', "010010"),
    ('\'', "011110"),
    ('(', "10110"),
    (')', "101101"),
    (',', "110011"),
    ('-', "100001"),
    ('.', "010101"),
    ('/', "10010"),
    ('0', "11111"),
    ('1', "01111"),
    ('2', "00111"),
    ('3', "00011"),
    ('4', "00001"),
    ('5', "00000"),
    ('6', "10000"),
    ('7', "11000"),
    ('8', "11100"),
    ('9', "11110"),
    (':', "111000"),
    (';', "101010"),
    ('=', "10001"),
    ('?', "001100"),
    ('@', "011010"),
    ('A', "01"),
    ('B', "1000"),
    ('C', "1010"),
    ('D', "100"),
    ('E', "0"),
    ('F', "0010"),
    ('G', "110"),
    ('H', "0000"),
    ('I', "00"),
    ('J', "0111"),
    ('K', "101"),
    ('L', "0100"),
    ('M', "11"),
    ('N', "10"),
    ('O', "111"),
    ('P', "0110"),
    ('Q', "1101"),
    ('R', "010"),
    ('S', "000"),
    ('T', "1"),
    ('U', "001"),
    ('V', "0001"),
    ('W', "011"),
    ('X', "1001"),
    ('Y', "1011"),
    ('Z', "1100"),
    ('_', "001101"),
];

static TABLE: LazyLock<CodeTable> = LazyLock::new(CodeTable::build);

/// What a reverse lookup resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Char(char),
    /// The eight-dit sentinel.
    Unknown,
}

pub struct CodeTable {
    forward: HashMap<char, &'static str>,
    reverse: HashMap<&'static str, Glyph>,
}

impl CodeTable {
    /// The process-wide table, built on first use and never mutated.
    pub fn get() -> &'static CodeTable {
        &TABLE
    }

    fn build() -> Self {
        let forward: HashMap<char, &'static str> = ENTRIES.iter().cloned().collect();

        let mut reverse = HashMap::with_capacity(ENTRIES.len());
        for &(ch, code) in ENTRIES {
            // Space is structural in decode, never a lookup.
            if code.is_empty() {
                continue;
            }
            let previous = reverse.insert(code, Glyph::Char(ch));
            assert!(previous.is_none(), "morse code {code} assigned twice");
        }
        let previous = reverse.insert(UNKNOWN_CODE, Glyph::Unknown);
        assert!(previous.is_none(), "sentinel code collides with a character");

        log::debug!("built morse table with {} characters", forward.len());
        Self { forward, reverse }
    }

    /// Binary symbol (`0`/`1`) for a character. Lowercase letters fold to uppercase.
    pub fn symbol(&self, ch: char) -> Option<&'static str> {
        self.forward.get(&ch.to_ascii_uppercase()).copied()
    }

    /// Display symbol (`.`/`-`) for a character.
    pub fn display(&self, ch: char) -> Option<String> {
        self.symbol(ch).map(to_display)
    }

    /// Reverse lookup. Accepts either notation, but not both in one code.
    pub fn lookup(&self, code: &str) -> Option<Glyph> {
        let symbolic = code.contains(['.', '-']);
        let binary = code.contains(['0', '1']);
        if symbolic && binary {
            return None;
        }
        self.reverse.get(to_binary(code).as_str()).copied()
    }

    /// Every supported character, space included.
    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        ENTRIES.iter().map(|&(ch, _)| ch)
    }
}

/// `0`/`1` to `.`/`-`; other characters pass through.
pub fn to_display(code: &str) -> String {
    code.chars()
        .map(|c| match c {
            '0' => '.',
            '1' => '-',
            other => other,
        })
        .collect()
}

/// `.`/`-` to `0`/`1`; other characters pass through.
pub fn to_binary(code: &str) -> String {
    code.chars()
        .map(|c| match c {
            '.' => '0',
            '-' => '1',
            other => other,
        })
        .collect()
}

/// Milliseconds per Morse element at the given speed, using the 50-element
/// PARIS word. Zero for a non-positive speed.
pub fn unit_milliseconds(wpm: f64) -> f64 {
    if wpm > 0.0 {
        let elements_per_second = 50.0 * wpm / 60.0;
        1000.0 / elements_per_second
    } else {
        0.0
    }
}
