// src/audio/mod.rs  -  Tone synthesis + WAV container
pub mod synth;
pub mod wav;

pub use synth::{SynthConfig, ToneSynthesizer};
pub use wav::{pcm_data, wav_bytes, write_wav, WavFormat};
