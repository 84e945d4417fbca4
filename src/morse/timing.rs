// src/morse/timing.rs  -  CW speed -> dit length and gap counts (Farnsworth aware)

/// Speeds below this keep 15-speed elements and stretch the gaps instead.
pub const FARNSWORTH_THRESHOLD: f64 = 15.0;

/// All timing derived from one CW speed.
///
/// Gaps are in dit units; one unit is one dit-long silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub dit:       f64,  // seconds
    pub char_gap:  f64,  // units between characters (fractional under Farnsworth)
    pub word_gap:  usize, // units per whitespace character
}

impl Timing {
    /// Standard: dit = 1.145 s / speed, 3-unit character gap.
    pub fn from_speed(speed: f64) -> Self {
        if speed < FARNSWORTH_THRESHOLD {
            return Self::farnsworth(speed);
        }
        Self::with_gap(1.145 / speed, 3.0)
    }

    /// Farnsworth: elements at 15-speed, character and word gaps stretched to `speed`.
    pub fn farnsworth(speed: f64) -> Self {
        Self::with_gap(1.145 / FARNSWORTH_THRESHOLD, 122.5 / speed - 31.0 / 6.0)
    }

    fn with_gap(dit: f64, char_gap: f64) -> Self {
        let word_gap = (2.0 * char_gap + 0.5).floor().max(0.0) as usize;
        Self { dit, char_gap, word_gap }
    }

    /// Silence units appended after a character's trailing element gap.
    /// Counts the whole units `1, 2, ..` below `char_gap`.
    pub fn extra_char_units(&self) -> usize {
        (self.char_gap.ceil() - 1.0).max(0.0) as usize
    }
}
