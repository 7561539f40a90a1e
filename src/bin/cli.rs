use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use des64_rs::{decrypt_stream, encrypt_stream, Des};

#[derive(Parser)]
#[command(name = "des64")]
#[command(about = "DES-family block cipher CLI tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new cipher key and save it to ~/.des64/
    GenerateKey {
        /// Name for the key file (without extension)
        #[arg(short, long, default_value = "default")]
        name: String,

        /// Overwrite existing key file
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt a byte stream
    Encrypt {
        /// Key as 16 hex digits; takes precedence over --key-name
        #[arg(short, long)]
        key: Option<String>,

        /// Name of a saved key to use
        #[arg(long, default_value = "default")]
        key_name: String,

        /// Input file (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// Decrypt a byte stream
    Decrypt {
        /// Key as 16 hex digits; takes precedence over --key-name
        #[arg(short, long)]
        key: Option<String>,

        /// Name of a saved key to use
        #[arg(long, default_value = "default")]
        key_name: String,

        /// Input file (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// List all saved keys
    ListKeys,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateKey { name, force } => generate_key(&name, force),
        Commands::Encrypt {
            key,
            key_name,
            input,
            output,
        } => {
            let cipher = Des::new(resolve_key(key.as_deref(), &key_name)?);
            let mut writer = open_output(&output)?;
            let written = encrypt_stream(&cipher, open_input(&input)?, &mut writer)
                .context("encryption failed")?;
            writer.flush().context("failed to flush output")?;
            log::info!("wrote {} ciphertext bytes", written);
            Ok(())
        }
        Commands::Decrypt {
            key,
            key_name,
            input,
            output,
        } => {
            let cipher = Des::new(resolve_key(key.as_deref(), &key_name)?);
            let mut writer = open_output(&output)?;
            let written = decrypt_stream(&cipher, open_input(&input)?, &mut writer)
                .context("decryption failed")?;
            writer.flush().context("failed to flush output")?;
            log::info!("wrote {} plaintext bytes", written);
            Ok(())
        }
        Commands::ListKeys => list_keys(),
    }
}

fn key_dir() -> Result<PathBuf> {
    let mut dir = dirs::home_dir().context("could not determine home directory")?;
    dir.push(".des64");
    Ok(dir)
}

fn key_path(name: &str) -> Result<PathBuf> {
    let mut path = key_dir()?;
    path.push(format!("{}.key", name));
    Ok(path)
}

fn generate_key(name: &str, force: bool) -> Result<()> {
    let path = key_path(name)?;
    if path.exists() && !force {
        bail!("key '{}' already exists, use --force to overwrite", name);
    }

    fs::create_dir_all(key_dir()?).context("failed to create key directory")?;

    let key = Des::generate_random_key();
    let key_hex = format!("{:016x}", key);
    fs::write(&path, &key_hex)
        .with_context(|| format!("failed to save key to {}", path.display()))?;

    println!("Generated new key '{}': {}", name, key_hex);
    println!("Key saved to: {}", path.display());
    Ok(())
}

fn resolve_key(key: Option<&str>, key_name: &str) -> Result<u64> {
    match key {
        Some(hex) => parse_key(hex),
        None => {
            let path = key_path(key_name)?;
            let contents = fs::read_to_string(&path).with_context(|| {
                format!(
                    "key '{}' not found, generate it first with 'des64 generate-key --name {}'",
                    key_name, key_name
                )
            })?;
            parse_key(&contents)
        }
    }
}

fn parse_key(hex: &str) -> Result<u64> {
    let hex = hex.trim().trim_start_matches("0x");
    if hex.len() != 16 {
        bail!("key must be exactly 16 hex digits");
    }
    u64::from_str_radix(hex, 16).context("key is not valid hex")
}

fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open input file: {}", path))?;
        Ok(Box::new(file))
    }
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        let file =
            File::create(path).with_context(|| format!("failed to create output file: {}", path))?;
        Ok(Box::new(file))
    }
}

fn list_keys() -> Result<()> {
    let dir = key_dir()?;
    let mut keys = Vec::new();
    if dir.exists() {
        for entry in fs::read_dir(&dir).context("failed to read key directory")? {
            let path = entry.context("failed to read key directory entry")?.path();
            if path.extension().is_some_and(|ext| ext == "key") {
                if let Some(name) = path.file_stem() {
                    keys.push(name.to_string_lossy().into_owned());
                }
            }
        }
    }

    if keys.is_empty() {
        println!("No keys found. Generate one with 'des64 generate-key'");
    } else {
        keys.sort();
        println!("Available keys:");
        for key in keys {
            println!("  {}", key);
        }
    }
    Ok(())
}
