// src/morse/encoder.rs  -  Text -> sequence of keying elements
use crate::morse::{CodeTable, Timing};

/// One keying element. Gaps count dit-long silences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Dit,
    Dah,
    Gap(usize),
}

impl Element {
    /// Length in dit units.
    pub fn units(&self) -> usize {
        match self {
            Element::Dit    => 1,
            Element::Dah    => 3,
            Element::Gap(n) => *n,
        }
    }
}

/// Encode full text into keying elements.
///
/// Text is uppercased; every whitespace character adds a word gap. Each
/// element is followed by a one-unit gap and each character by its extra
/// character gap. Characters without a code are skipped silently.
pub fn encode(text: &str, table: &CodeTable, timing: &Timing) -> Vec<Element> {
    let mut seq = Vec::new();
    let extra = timing.extra_char_units();

    for ch in text.chars().flat_map(char::to_uppercase) {
        if ch.is_whitespace() {
            push_gap(&mut seq, timing.word_gap);
        } else if let Ok(code) = table.get(ch) {
            for bit in code.chars() {
                seq.push(if bit == '0' { Element::Dit } else { Element::Dah });
                seq.push(Element::Gap(1));
            }
            push_gap(&mut seq, extra);
        }
    }
    seq
}

fn push_gap(seq: &mut Vec<Element>, units: usize) {
    if units > 0 {
        seq.push(Element::Gap(units));
    }
}
