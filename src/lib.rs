//! Morse code translation and CW tone rendering.
//!
//! [`CodeTable`] holds the character <-> code mapping (`0` = dit, `1` = dah),
//! [`Translator`] converts text to human-readable Morse and back, and
//! [`ToneSynthesizer`] renders text as an 8-bit mono WAV file.
//!
//! ```
//! use cw_morse::Translator;
//!
//! let t = Translator::default();
//! assert_eq!(t.to_morse("sos"), "... --- ...");
//! assert_eq!(t.from_morse("... --- ..."), "SOS");
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod morse;

pub use audio::{SynthConfig, ToneSynthesizer};
pub use error::{MorseError, Result};
pub use morse::{CodeTable, DefaultCase, Translator, TranslatorConfig};
