// src/audio/wav.rs  -  Canonical 44-byte-header PCM WAV container
use crate::error::{MorseError, Result};
use std::io::{self, Write};

/// Size of the RIFF + fmt + data headers.
pub const HEADER_LEN: usize = 44;

/// WAV format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels:        u16,
    pub sample_rate:     u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Unsigned 8-bit mono, the only layout the synthesizer produces.
    pub fn mono_u8(sample_rate: u32) -> Self {
        Self { channels: 1, sample_rate, bits_per_sample: 8 }
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Write a complete WAV file. `data_len` must equal `pcm.len()`.
pub fn write_wav<W: Write>(w: &mut W, format: &WavFormat, data_len: u32, pcm: &[u8]) -> io::Result<()> {
    // RIFF header
    w.write_all(b"RIFF")?;
    w.write_all(&(36 + data_len).to_le_bytes())?;
    w.write_all(b"WAVE")?;

    // fmt chunk
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?; // PCM
    w.write_all(&format.channels.to_le_bytes())?;
    w.write_all(&format.sample_rate.to_le_bytes())?;
    w.write_all(&format.byte_rate().to_le_bytes())?;
    w.write_all(&format.block_align().to_le_bytes())?;
    w.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    w.write_all(b"data")?;
    w.write_all(&data_len.to_le_bytes())?;
    w.write_all(pcm)
}

/// WAV file as bytes. Fails if `pcm` is too long for the 32-bit size fields.
pub fn wav_bytes(format: &WavFormat, pcm: &[u8]) -> Result<Vec<u8>> {
    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|n| n.checked_add(36).is_some())
        .ok_or(MorseError::AudioTooLong(pcm.len()))?;

    let mut buf = Vec::with_capacity(HEADER_LEN + pcm.len());
    write_wav(&mut buf, format, data_len, pcm).expect("writing to Vec should not fail");
    Ok(buf)
}

/// PCM payload of a WAV buffer produced by [`wav_bytes`], or `None` if the
/// header is not the canonical layout.
pub fn pcm_data(wav: &[u8]) -> Option<&[u8]> {
    if wav.len() < HEADER_LEN
        || &wav[0..4] != b"RIFF"
        || &wav[8..12] != b"WAVE"
        || &wav[36..40] != b"data"
    {
        return None;
    }
    let len = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]) as usize;
    let end = HEADER_LEN.checked_add(len)?;
    wav.get(HEADER_LEN..end)
}
