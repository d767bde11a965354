//! Zero-Net CLI
//!
//! Encode profile JSON ke token `SS1:`, decode/inspect token hasil scan,
//! dan bangun emergency link untuk QR.
//!
//! Usage:
//!   zeronet --secret <SECRET> encode --input profile.json [--report]
//!   zeronet decode 'SS1:...'
//!   zeronet inspect 'SS1:...'
//!   zeronet url --base https://records.example.org --input profile.json
//!
//! Secret juga bisa dari env `ZERONET_SECRET`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zeronet::config::SECRET_ENV;
use zeronet::protocol::TOKEN_PREFIX;
use zeronet::{emergency_url, token_from_url, CodecConfig, CodecError, EmergencyProfile, ZeroNetCodec};

#[derive(Parser)]
#[command(name = "zeronet", version, about = "Zero-Net QR emergency-profile codec")]
struct Cli {
    /// Shared integrity secret
    #[arg(long, env = SECRET_ENV, hide_env_values = true)]
    secret: String,

    /// Verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode profile JSON menjadi token
    Encode {
        /// File JSON (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Tampilkan field yang di-truncate dan ukuran tiap stage
        #[arg(long)]
        report: bool,
    },
    /// Decode token (atau emergency URL) menjadi profile JSON
    Decode { token: String },
    /// Verifikasi token dan tampilkan statistik
    Inspect { token: String },
    /// Encode profile dan bangun emergency URL
    Url {
        #[arg(long)]
        base: String,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("zeronet=debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_profile(input: Option<&PathBuf>) -> Result<EmergencyProfile> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read profile from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("invalid profile JSON")
}

/// Terima token mentah atau URL `/emergency/<token>`
/// Terima token mentah atau emergency URL hasil scan
fn normalize_token(input: &str) -> Result<String> {
    let input = input.trim();
    if input.starts_with(TOKEN_PREFIX) {
        return Ok(input.to_string());
    }
    token_from_url(input).context("invalid emergency URL")
}

fn run(cli: Cli) -> Result<()> {
    let codec = ZeroNetCodec::new(CodecConfig::new(cli.secret.into_bytes())?)?;

    match cli.command {
        Command::Encode { input, report } => {
            let profile = read_profile(input.as_ref())?;
            if report {
                let encoded = codec.encode_with_report(&profile)?;
                println!("{}", serde_json::to_string_pretty(&encoded)?);
            } else {
                println!("{}", codec.encode_emergency_profile(&profile)?);
            }
        }
        Command::Decode { token } => {
            let profile = codec.decode_emergency_profile(&normalize_token(&token)?)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Inspect { token } => {
            let info = codec.inspect(&normalize_token(&token)?)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Url { base, input } => {
            let profile = read_profile(input.as_ref())?;
            let token = codec.encode_emergency_profile(&profile)?;
            println!("{}", emergency_url(&base, &token));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CodecError>() {
                Some(e) if e.is_decode_error() => {
                    eprintln!("❌ Invalid or corrupted emergency code ({})", e);
                }
                Some(e) if e.is_size_error() => {
                    eprintln!("⚠️  {}: shorten allergies, medications or conditions", e);
                }
                _ => eprintln!("❌ {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
