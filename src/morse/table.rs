// src/morse/table.rs  -  Character <-> code table (0 = dit, 1 = dah)
use crate::error::{MorseError, Result};
use std::collections::{HashMap, HashSet};

/// Dot symbol used in display codes. Not configurable.
pub const DOT: char = '.';

/// Default dash symbol used in display codes.
pub const DASH: char = '-';

/// International Morse alphabet plus the common punctuation signs.
const PREDEFINED: &[(char, &str)] = &[
    ('A', "01"),     ('B', "1000"),   ('C', "1010"),   ('D', "100"),
    ('E', "0"),      ('F', "0010"),   ('G', "110"),    ('H', "0000"),
    ('I', "00"),     ('J', "0111"),   ('K', "101"),    ('L', "0100"),
    ('M', "11"),     ('N', "10"),     ('O', "111"),    ('P', "0110"),
    ('Q', "1101"),   ('R', "010"),    ('S', "000"),    ('T', "1"),
    ('U', "001"),    ('V', "0001"),   ('W', "011"),    ('X', "1001"),
    ('Y', "1011"),   ('Z', "1100"),
    ('0', "11111"),  ('1', "01111"),  ('2', "00111"),  ('3', "00011"),
    ('4', "00001"),  ('5', "00000"),  ('6', "10000"),  ('7', "11000"),
    ('8', "11100"),  ('9', "11110"),
    ('.', "010101"), (',', "110011"), ('?', "001100"), ('\'', "011110"),
    ('!', "101011"), ('/', "10010"),  ('(', "10110"),  (')', "101101"),
    ('&', "01000"),  (':', "111000"), (';', "101010"), ('=', "10001"),
    ('+', "01010"),  ('-', "100001"), ('_', "001101"), ('"', "010010"),
    ('$', "0001001"),('@', "011010"), ('|', "01001"),
];

/// Forward and reverse mapping between characters and their binary codes.
///
/// The predefined alphabet is captured once at construction and can never be
/// overwritten or removed. Custom entries may be added with [`CodeTable::set`]
/// and removed again with [`CodeTable::unset`]. No two characters ever share a
/// code, so every code decodes unambiguously.
#[derive(Debug, Clone)]
pub struct CodeTable {
    forward:    HashMap<char, String>,
    reverse:    HashMap<String, char>,
    /// Key order for iteration: predefined first, then custom by insertion.
    order:      Vec<char>,
    predefined: HashSet<char>,
    dash:       char,
}

impl Default for CodeTable {
    fn default() -> Self { Self::new() }
}

impl CodeTable {
    pub fn new() -> Self {
        let mut forward = HashMap::with_capacity(PREDEFINED.len());
        let mut reverse = HashMap::with_capacity(PREDEFINED.len());
        let mut order   = Vec::with_capacity(PREDEFINED.len());
        for &(ch, code) in PREDEFINED {
            forward.insert(ch, code.to_string());
            reverse.insert(code.to_string(), ch);
            order.push(ch);
        }
        let predefined = order.iter().copied().collect();
        Self { forward, reverse, order, predefined, dash: DASH }
    }

    /// Table rendering dahs with `dash` instead of `-`.
    pub fn with_dash(dash: char) -> Result<Self> {
        if dash == DOT || dash.is_whitespace() {
            return Err(MorseError::InvalidDash(dash));
        }
        Ok(Self { dash, ..Self::new() })
    }

    pub fn dash(&self) -> char { self.dash }

    pub fn has(&self, ch: char) -> bool { self.forward.contains_key(&ch) }

    pub fn is_predefined(&self, ch: char) -> bool { self.predefined.contains(&ch) }

    pub fn len(&self) -> usize { self.forward.len() }

    pub fn is_empty(&self) -> bool { self.forward.is_empty() }

    /// Binary code (`0`/`1`) for `ch`.
    pub fn get(&self, ch: char) -> Result<&str> {
        self.forward
            .get(&ch)
            .map(String::as_str)
            .ok_or(MorseError::NotFound(ch))
    }

    /// Add a custom mapping.
    ///
    /// Fails without touching the table if `ch` is already mapped, if `code` is
    /// not a non-empty run of `0`/`1`, or if another character owns `code`.
    pub fn set(&mut self, ch: char, code: &str) -> Result<()> {
        if self.has(ch) {
            return Err(MorseError::PredefinedConflict(ch));
        }
        if code.is_empty() || !code.chars().all(|c| c == '0' || c == '1') {
            return Err(MorseError::InvalidCode(code.to_string()));
        }
        if let Some(&existing) = self.reverse.get(code) {
            return Err(MorseError::DuplicateCode { code: code.to_string(), existing });
        }

        self.forward.insert(ch, code.to_string());
        self.reverse.insert(code.to_string(), ch);
        self.order.push(ch);
        log::debug!("[table] set {:?} = {}", ch, code);
        Ok(())
    }

    /// Remove a custom mapping, returning its code. `Ok(None)` if `ch` was never set.
    pub fn unset(&mut self, ch: char) -> Result<Option<String>> {
        if self.is_predefined(ch) {
            return Err(MorseError::PredefinedImmutable(ch));
        }
        let Some(code) = self.forward.remove(&ch) else {
            return Ok(None);
        };
        self.reverse.remove(&code);
        self.order.retain(|&c| c != ch);
        log::debug!("[table] unset {:?} (was {})", ch, code);
        Ok(Some(code))
    }

    /// Human-readable code for `ch`, e.g. `.-` for `A`.
    pub fn to_display(&self, ch: char) -> Result<String> {
        let dash = self.dash;
        Ok(self
            .get(ch)?
            .chars()
            .map(|bit| if bit == '0' { DOT } else { dash })
            .collect())
    }

    /// Character for a human-readable code. Any symbol other than the dot and
    /// the configured dash makes the code unknown.
    pub fn from_display(&self, display: &str) -> Result<char> {
        let unknown = || MorseError::UnknownCode(display.to_string());
        let key = display
            .chars()
            .map(|sym| match sym {
                DOT                  => Some('0'),
                s if s == self.dash  => Some('1'),
                _                    => None,
            })
            .collect::<Option<String>>()
            .ok_or_else(unknown)?;
        self.reverse.get(&key).copied().ok_or_else(unknown)
    }

    /// All entries as `(character, binary code)`.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.order
            .iter()
            .filter_map(move |ch| self.forward.get(ch).map(|code| (*ch, code.as_str())))
    }
}
