use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hks-cli")]
#[command(about = "Hollow Knight / Silksong save (de|en)code – CLI tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Platform {
    /// Encrypted container format
    Pc,
    /// Plain JSON text, no container
    Switch,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a save file to JSON text
    Decode {
        /// Path to the save file
        save: PathBuf,

        /// Path to write the JSON text
        out_json: PathBuf,

        /// Save platform; auto-detected when omitted
        #[arg(long, value_enum)]
        platform: Option<Platform>,
    },

    /// Encode JSON text to a save file
    Encode {
        /// Path to the JSON text file
        json: PathBuf,

        /// Path to write the save file
        out_save: PathBuf,

        /// Save platform
        #[arg(long, value_enum, default_value = "pc")]
        platform: Platform,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            save,
            out_json,
            platform,
        } => {
            cmd_decode(&save, &out_json, platform)?;
        }
        Commands::Encode {
            json,
            out_save,
            platform,
        } => {
            cmd_encode(&json, &out_save, platform)?;
        }
    }

    Ok(())
}

fn cmd_decode(save_path: &PathBuf, out_json_path: &PathBuf, platform: Option<Platform>) -> Result<()> {
    let raw = fs::read(save_path)
        .with_context(|| format!("Failed to read save file: {}", save_path.display()))?;

    println!("[info] len(save)={}", raw.len());

    let text = match platform {
        Some(Platform::Pc) => hks_core::decode(&raw)
            .with_context(|| format!("Failed to decode PC save: {}", save_path.display()))?,
        Some(Platform::Switch) => String::from_utf8(raw)
            .with_context(|| format!("Save is not UTF-8 text: {}", save_path.display()))?,
        None => detect_and_decode(&raw)?,
    };

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(_) => println!("[info] decoded text is valid JSON"),
        Err(e) => eprintln!("[warn] decoded text is not valid JSON: {}", e),
    }

    fs::write(out_json_path, &text)
        .with_context(|| format!("Failed to write JSON file: {}", out_json_path.display()))?;

    println!("[ok] wrote JSON -> {}", out_json_path.display());

    Ok(())
}

/// Try the encrypted PC container first, fall back to plain Switch text.
/// This heuristic lives here on purpose: the codec never guesses platforms.
fn detect_and_decode(raw: &[u8]) -> Result<String> {
    match hks_core::decode(raw) {
        Ok(text) => {
            println!("[info] detected platform: pc");
            Ok(text)
        }
        Err(e) => {
            println!("[info] not a PC container ({}), trying plain text", e);
            let text = String::from_utf8(raw.to_vec())
                .context("Save is neither a PC container nor UTF-8 text")?;
            println!("[info] detected platform: switch");
            Ok(text)
        }
    }
}

fn cmd_encode(json_path: &PathBuf, out_save_path: &PathBuf, platform: Platform) -> Result<()> {
    let text = fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&text) {
        eprintln!("[warn] input text is not valid JSON: {}", e);
    }

    let out: Vec<u8> = match platform {
        Platform::Pc => hks_core::encode(&text),
        Platform::Switch => text.into_bytes(),
    };

    fs::write(out_save_path, &out)
        .with_context(|| format!("Failed to write save file: {}", out_save_path.display()))?;

    println!("[ok] wrote save -> {}", out_save_path.display());

    Ok(())
}
