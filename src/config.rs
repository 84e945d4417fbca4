// src/config.rs  -  Runtime configuration (CLI + TOML)
use crate::audio::{SynthConfig, ToneSynthesizer};
use crate::morse::{CodeTable, DefaultCase, Translator, TranslatorConfig};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  cw-morse --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug)]
#[command(
    name    = "cw-morse",
    about   = "Morse code translator and CW tone generator",
    version,
)]
pub struct Cli {
    /// Config file path (default: ~/.config/cw-morse/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Symbol used for dahs in Morse text (default: -)
    #[arg(long, global = true)]
    pub dash: Option<char>,

    /// Symbol sent for characters without a code (default: #)
    #[arg(long, global = true)]
    pub replacement: Option<char>,

    /// Separator between encoded words (default: two spaces)
    #[arg(long, global = true)]
    pub word_separator: Option<String>,

    /// Keep letter case using case modifier signs
    #[arg(long, action, global = true)]
    pub case_sensitive: bool,

    /// Case sent without a modifier: lower | upper
    #[arg(long, global = true)]
    pub default_case: Option<DefaultCase>,

    /// CW speed for WAV output (default: 30; below 15 uses Farnsworth spacing)
    #[arg(long, global = true)]
    pub wpm: Option<f64>,

    /// WAV sample rate in Hz (default: 11050)
    #[arg(long, global = true)]
    pub sample_rate: Option<u32>,

    /// Tone frequency in Hz (default: 700)
    #[arg(long, global = true)]
    pub tone: Option<f64>,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Translate text to Morse (reads stdin if TEXT is omitted)
    Encode { text: Option<String> },
    /// Translate Morse to text (reads stdin if MORSE is omitted)
    Decode { morse: Option<String> },
    /// Render text as a CW tone WAV file
    Wav {
        text: Option<String>,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the code table, custom entries included
    Table,
}

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub table: Option<TableCfg>,
    pub text:  Option<TextCfg>,
    pub audio: Option<AudioCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCfg {
    pub dash:   Option<char>,
    /// Extra characters: one-character key -> code of 0 (dit) / 1 (dah)
    pub custom: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextCfg {
    pub replacement:    Option<char>,
    pub word_separator: Option<String>,
    pub case_sensitive: Option<bool>,
    pub default_case:   Option<DefaultCase>,
    pub upper_modifier: Option<char>,
    pub lower_modifier: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioCfg {
    pub wpm:         Option<f64>,
    pub sample_rate: Option<u32>,
    pub tone_hz:     Option<f64>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dash:   char,
    pub custom: BTreeMap<String, String>,
    pub text:   TranslatorConfig,
    pub audio:  SynthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dash:   crate::morse::table::DASH,
            custom: BTreeMap::new(),
            text:   TranslatorConfig::default(),
            audio:  SynthConfig::default(),
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc);
            log::debug!("[config] loaded {:?}", path);
        } else if cli.config.is_some() {
            bail!("Config file {:?} does not exist", path);
        } else {
            eprintln!(
                "No config file found at {}\n  \
                 → Run `cw-morse --write-config` to create one.",
                path.display()
            );
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli);
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) {
        if let Some(t) = &fc.table {
            if let Some(v) = t.dash        { self.dash   = v; }
            if let Some(v) = &t.custom     { self.custom = v.clone(); }
        }
        if let Some(t) = &fc.text {
            if let Some(v) = t.replacement     { self.text.replacement    = v; }
            if let Some(v) = &t.word_separator { self.text.word_separator = v.clone(); }
            if let Some(v) = t.case_sensitive  { self.text.case_sensitive = v; }
            if let Some(v) = t.default_case    { self.text.default_case   = v; }
            if let Some(v) = t.upper_modifier  { self.text.upper_modifier = v; }
            if let Some(v) = t.lower_modifier  { self.text.lower_modifier = v; }
        }
        if let Some(a) = &fc.audio {
            if let Some(v) = a.wpm         { self.audio.cw_speed    = v; }
            if let Some(v) = a.sample_rate { self.audio.sample_rate = v; }
            if let Some(v) = a.tone_hz     { self.audio.frequency   = v; }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = cli.dash            { self.dash                = v; }
        if let Some(v) = cli.replacement     { self.text.replacement    = v; }
        if let Some(v) = &cli.word_separator { self.text.word_separator = v.clone(); }
        if cli.case_sensitive                { self.text.case_sensitive = true; }
        if let Some(v) = cli.default_case    { self.text.default_case   = v; }
        if let Some(v) = cli.wpm             { self.audio.cw_speed      = v; }
        if let Some(v) = cli.sample_rate     { self.audio.sample_rate   = v; }
        if let Some(v) = cli.tone            { self.audio.frequency     = v; }
    }

    /// Predefined table with the configured dash and custom entries applied.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::with_dash(self.dash)?;
        for (key, code) in &self.custom {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => bail!("Custom table key {:?} must be exactly one character", key),
            };
            table.set(ch, code)
                .with_context(|| format!("Adding custom table entry {:?}", key))?;
        }
        Ok(table)
    }

    pub fn translator(&self) -> Result<Translator> {
        Ok(Translator::with_table(self.code_table()?, self.text.clone()))
    }

    pub fn synthesizer(&self) -> Result<ToneSynthesizer> {
        ToneSynthesizer::with_config(self.code_table()?, self.audio)
            .context("Invalid [audio] settings")
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join("cw-morse").join("config.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}
