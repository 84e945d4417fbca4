// src/error.rs  -  Library error type
use thiserror::Error;

/// Result alias carrying [`MorseError`].
pub type Result<T> = std::result::Result<T, MorseError>;

/// Every recoverable failure the table, translator and synthesizer can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MorseError {
    /// Lookup of a character with no mapping.
    #[error("no morse code for character {0:?}")]
    NotFound(char),

    /// Display code that maps to no character.
    #[error("no character for morse code {0:?}")]
    UnknownCode(String),

    /// `set` on a character that already has a mapping (predefined or custom).
    #[error("can't override existing character {0:?}")]
    PredefinedConflict(char),

    #[error("code must be a non-empty string of zeroes and ones (0/1), got {0:?}")]
    InvalidCode(String),

    #[error("there is already a character with code {code} ({existing:?})")]
    DuplicateCode { code: String, existing: char },

    #[error("can't unset predefined character {0:?}")]
    PredefinedImmutable(char),

    /// Dash symbol that would collide with the dot or the element separator.
    #[error("invalid dash symbol {0:?}")]
    InvalidDash(char),

    #[error("{setting} out of range, got {value}")]
    InvalidSetting { setting: &'static str, value: f64 },

    /// Sample count too large for the 32-bit WAV size fields.
    #[error("audio of {0} samples does not fit in a WAV container")]
    AudioTooLong(usize),
}
