// src/audio/synth.rs  -  Morse text -> enveloped 8-bit sine tone
use crate::audio::wav::{wav_bytes, WavFormat};
use crate::error::{MorseError, Result};
use crate::morse::{encode, CodeTable, Element, Timing};
use std::f64::consts::FRAC_PI_2;

/// 2π truncated to nine decimals. Sample output is pinned to this value.
#[allow(clippy::approx_constant)]
const TAU: f64 = 6.283185307;

/// Slowest accepted CW speed. Farnsworth gaps grow as 1 / speed.
pub const MIN_CW_SPEED: f64 = 1.0;

/// Silence level of unsigned 8-bit PCM.
const MID_SCALE: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// CW speed; below 15 Farnsworth spacing applies.
    pub cw_speed:    f64,
    /// Samples per second.
    pub sample_rate: u32,
    /// Tone frequency in Hz.
    pub frequency:   f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { cw_speed: 30.0, sample_rate: 11050, frequency: 700.0 }
    }
}

/// Renders text as a CW tone in a WAV container.
///
/// Every `generate` call starts from a fresh oscillator; nothing carries over
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct ToneSynthesizer {
    table:  CodeTable,
    config: SynthConfig,
}

impl ToneSynthesizer {
    pub fn new() -> Self { Self::default() }

    pub fn with_table(table: CodeTable) -> Self {
        Self { table, config: SynthConfig::default() }
    }

    /// Synthesizer with every field of `config` validated by its setter.
    pub fn with_config(table: CodeTable, config: SynthConfig) -> Result<Self> {
        let mut synth = Self::with_table(table);
        synth
            .set_cw_speed(config.cw_speed)?
            .set_sample_rate(config.sample_rate)?
            .set_frequency(config.frequency)?;
        Ok(synth)
    }

    pub fn table(&self) -> &CodeTable { &self.table }
    pub fn table_mut(&mut self) -> &mut CodeTable { &mut self.table }
    pub fn config(&self) -> &SynthConfig { &self.config }

    pub fn set_cw_speed(&mut self, speed: f64) -> Result<&mut Self> {
        if speed < MIN_CW_SPEED {
            return Err(MorseError::InvalidSetting { setting: "cw_speed", value: speed });
        }
        self.config.cw_speed = positive("cw_speed", speed)?;
        Ok(self)
    }

    pub fn set_sample_rate(&mut self, rate: u32) -> Result<&mut Self> {
        if rate == 0 {
            return Err(MorseError::InvalidSetting { setting: "sample_rate", value: 0.0 });
        }
        self.config.sample_rate = rate;
        Ok(self)
    }

    pub fn set_frequency(&mut self, hz: f64) -> Result<&mut Self> {
        self.config.frequency = positive("frequency", hz)?;
        Ok(self)
    }

    pub fn timing(&self) -> Timing { Timing::from_speed(self.config.cw_speed) }

    /// Nominal length of the rendered text in seconds.
    pub fn duration_secs(&self, text: &str) -> f64 {
        let timing = self.timing();
        let units: usize = encode(text, &self.table, &timing).iter().map(Element::units).sum();
        units as f64 * timing.dit
    }

    /// Raw unsigned 8-bit PCM samples, no container.
    pub fn samples(&self, text: &str) -> Vec<u8> {
        let timing  = self.timing();
        let buffers = ElementBuffers::render(timing.dit, self.config.sample_rate, self.config.frequency);
        let seq     = encode(text, &self.table, &timing);
        log::debug!(
            "[synth] dit={:.4}s char_gap={:.3} word_gap={} elements={} samples/dit={}",
            timing.dit, timing.char_gap, timing.word_gap, seq.len(), buffers.space.len()
        );

        let mut out = Vec::new();
        for el in &seq {
            match *el {
                Element::Dit    => out.extend_from_slice(&buffers.dit),
                Element::Dah    => out.extend_from_slice(&buffers.dah),
                Element::Gap(n) => for _ in 0..n { out.extend_from_slice(&buffers.space) },
            }
        }
        out
    }

    /// Complete WAV file for `text`.
    pub fn generate(&self, text: &str) -> Result<Vec<u8>> {
        let pcm = self.samples(text);
        log::debug!("[synth] {} samples @ {} Hz", pcm.len(), self.config.sample_rate);
        wav_bytes(&WavFormat::mono_u8(self.config.sample_rate), &pcm)
    }
}

fn positive(setting: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MorseError::InvalidSetting { setting, value })
    }
}

/// Sine oscillator with a phase accumulator wrapped at [`TAU`].
#[derive(Debug, Clone, Copy)]
struct Oscillator {
    phase: f64,
    step:  f64,
}

impl Oscillator {
    fn new(sample_dt: f64, frequency: f64) -> Self {
        let tone_time = 1.0 / frequency;
        Self { phase: 0.0, step: TAU * sample_dt / tone_time }
    }

    fn next(&mut self) -> f64 {
        self.phase += self.step;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        self.phase.sin()
    }
}

fn to_u8(x: f64) -> u8 {
    (120.0 * x + 128.0).floor() as u8
}

/// Pre-rendered dit, dah and one-dit silence.
struct ElementBuffers {
    dit:   Vec<u8>,
    dah:   Vec<u8>,
    space: Vec<u8>,
}

impl ElementBuffers {
    /// One oscillator feeds both tones: the dit and the dah share their rise,
    /// so the dah continues in phase where the dit starts to decay.
    /// Loops advance by `1 / sample_rate` until the accumulated time reaches `dit`.
    fn render(dit: f64, sample_rate: u32, frequency: f64) -> Self {
        let dt   = 1.0 / sample_rate as f64;
        let half = 0.5 * dit;
        let mut osc = Oscillator::new(dt, frequency);
        let mut b = Self { dit: Vec::new(), dah: Vec::new(), space: Vec::new() };

        // first dit-time: both rise, then the dit decays while the dah holds
        let mut t = 0.0;
        while t < dit {
            let x = osc.next();
            if t < half {
                let v = to_u8(x * (FRAC_PI_2 * t / half).sin());
                b.dit.push(v);
                b.dah.push(v);
            } else if t > half {
                b.dah.push(to_u8(x));
                b.dit.push(to_u8(x * (FRAC_PI_2 * (dit - t) / half).sin()));
            } else {
                b.dit.push(to_u8(x));
                b.dah.push(to_u8(x));
            }
            b.space.push(MID_SCALE);
            t += dt;
        }

        // second dit-time: dah at full amplitude
        let mut t = 0.0;
        while t < dit {
            b.dah.push(to_u8(osc.next()));
            t += dt;
        }

        // third dit-time: dah holds, then decays over the last half
        let mut t = 0.0;
        while t < dit {
            let mut x = osc.next();
            if t > half {
                x *= (FRAC_PI_2 * (dit - t) / half).sin();
            }
            b.dah.push(to_u8(x));
            t += dt;
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_lengths() {
        let b = ElementBuffers::render(0.1, 1000, 700.0);
        let n = b.space.len();
        // 0.001 s steps accumulated until they reach 0.1 s
        assert_eq!(n, 100);
        assert_eq!(b.dit.len(), n);
        assert_eq!(b.dah.len(), 3 * n);
        assert!(b.space.iter().all(|&s| s == MID_SCALE));
    }

    #[test]
    fn dit_and_dah_share_rise() {
        let b = ElementBuffers::render(0.1, 8000, 700.0);
        let half = b.dit.len() / 2;
        assert_eq!(&b.dit[..half], &b.dah[..half]);
        // envelope starts and ends near silence
        assert_eq!(b.dit[0], MID_SCALE);
        let tail = *b.dah.last().unwrap() as i16 - MID_SCALE as i16;
        assert!(tail.abs() <= 2);
    }

    #[test]
    fn samples_stay_in_range() {
        let b = ElementBuffers::render(1.145 / 30.0, 11050, 700.0);
        assert!(b.dah.iter().all(|&s| (8..=248).contains(&s)));
        assert!(b.dah.iter().any(|&s| s > 240));
    }

    #[test]
    fn oscillator_wraps() {
        let mut osc = Oscillator::new(1.0 / 4.0, 1.0);
        for _ in 0..10 {
            osc.next();
            assert!(osc.phase < TAU);
        }
    }

    #[test]
    fn letter_e_layout() {
        let synth = ToneSynthesizer::new();
        let pcm = synth.samples("E");
        let n = ElementBuffers::render(synth.timing().dit, 11050, 700.0).space.len();
        // dit + element gap + 2 extra char units
        assert_eq!(pcm.len(), 4 * n);
        assert!(pcm[n..].iter().all(|&s| s == MID_SCALE));
    }

    #[test]
    fn unknown_characters_are_silent() {
        let synth = ToneSynthesizer::new();
        assert!(synth.samples("øæ").is_empty());
        assert_eq!(synth.samples("e"), synth.samples("E"));
    }

    #[test]
    fn generate_is_deterministic() {
        let synth = ToneSynthesizer::new();
        assert_eq!(synth.generate("SOS").unwrap(), synth.generate("SOS").unwrap());
    }

    #[test]
    fn invalid_settings_leave_config_unchanged() {
        let mut synth = ToneSynthesizer::new();
        synth.set_cw_speed(12.0).unwrap();
        assert!(matches!(
            synth.set_cw_speed(f64::NAN),
            Err(MorseError::InvalidSetting { setting: "cw_speed", .. })
        ));
        assert!(synth.set_frequency(f64::INFINITY).is_err());
        assert!(synth.set_frequency(-5.0).is_err());
        assert!(synth.set_sample_rate(0).is_err());
        assert_eq!(synth.config(), &SynthConfig { cw_speed: 12.0, ..Default::default() });
    }

    #[test]
    fn speed_below_minimum_is_rejected() {
        let mut synth = ToneSynthesizer::new();
        for speed in [1e-17, 0.001, 0.5] {
            assert!(matches!(
                synth.set_cw_speed(speed),
                Err(MorseError::InvalidSetting { setting: "cw_speed", .. })
            ));
        }
        synth.set_cw_speed(MIN_CW_SPEED).unwrap();
        assert_eq!(synth.config().cw_speed, MIN_CW_SPEED);
        assert!(!synth.generate("E").unwrap().is_empty());
    }

    #[test]
    fn letter_e_golden_samples() {
        let synth = ToneSynthesizer::new();
        let pcm = synth.samples("E");
        // 422 samples per dit at 30 wpm / 11050 Hz
        assert_eq!(pcm.len(), 4 * 422);
        assert_eq!(&pcm[..8], &[0x80, 0x80, 0x81, 0x82, 0x83, 0x83, 0x81, 0x7f]);
        assert_eq!(&pcm[209..213], &[0xf1, 0xd9, 0xb3, 0x85]);
        assert_eq!(&pcm[418..422], &[127, 126, 126, 127]);
        assert_eq!(pcm.iter().map(|&s| s as u64).sum::<u64>(), 215_859);
    }

    #[test]
    fn with_config_validates() {
        let bad = SynthConfig { frequency: 0.0, ..Default::default() };
        assert!(ToneSynthesizer::with_config(CodeTable::new(), bad).is_err());
    }

    #[test]
    fn custom_table_entry_is_rendered() {
        let mut synth = ToneSynthesizer::new();
        assert!(synth.samples("%").is_empty());
        synth.table_mut().set('%', "0").unwrap_err();
        synth.table_mut().set('%', "10000001").unwrap();
        assert!(!synth.samples("%").is_empty());
    }
}
