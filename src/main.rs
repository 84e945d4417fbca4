// src/main.rs  -  cw-morse  entry point
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cw_morse::config::{self, AppConfig, Cli, Command};
use std::io::Read;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cfg = AppConfig::load(&cli)?;

    match command {
        Command::Encode { text } => {
            let translator = cfg.translator()?;
            println!("{}", translator.to_morse(&input(text)?));
        }
        Command::Decode { morse } => {
            let translator = cfg.translator()?;
            println!("{}", translator.from_morse(&input(morse)?));
        }
        Command::Wav { text, output } => {
            let synth = cfg.synthesizer()?;
            let text  = input(text)?;
            let wav   = synth.generate(&text)?;
            std::fs::write(&output, &wav)
                .with_context(|| format!("Writing WAV to {:?}", output))?;
            log::info!(
                "[wav] {} bytes, {:.2}s nominal @ {} wpm",
                wav.len(), synth.duration_secs(&text), cfg.audio.cw_speed
            );
            println!("Wrote {}", output.display());
        }
        Command::Table => {
            let table = cfg.code_table()?;
            for (ch, _) in table.iter() {
                let display = table.to_display(ch)?;
                let mark = if table.is_predefined(ch) { "" } else { "  (custom)" };
                println!("{ch}  {display}{mark}");
            }
        }
    }
    Ok(())
}

/// Positional argument, or all of stdin without the trailing newline.
fn input(arg: Option<String>) -> Result<String> {
    if let Some(v) = arg { return Ok(v); }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Reading stdin")?;
    let trimmed = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed);
    Ok(buf)
}
