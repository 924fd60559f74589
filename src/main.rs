use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod input;
use safeguard::{Config, CryptoOverrides, Safeguard, config::default_config_path, packet};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, clap::Args)]
struct CryptoArgs {
    /// PBKDF2 iteration count (default: 10000)
    #[arg(long, env = "SAFEGUARD_ITERATIONS", global = true, allow_negative_numbers = true)]
    iterations: Option<i64>,

    /// Derived key length in bytes (default: 128)
    #[arg(long = "key-length", env = "SAFEGUARD_KEY_LENGTH", global = true, allow_negative_numbers = true)]
    key_length: Option<i64>,

    /// Salt length in hex characters (default: 64)
    #[arg(long = "salt-length", env = "SAFEGUARD_SALT_LENGTH", global = true, allow_negative_numbers = true)]
    salt_length: Option<i64>,

    /// Hash this many random bytes when no text is given
    #[arg(
        long = "default-plain-text-length",
        env = "SAFEGUARD_DEFAULT_PLAIN_TEXT_LENGTH",
        global = true,
        allow_negative_numbers = true
    )]
    default_plain_text_length: Option<i64>,
}

impl CryptoArgs {
    fn to_overrides(&self) -> CryptoOverrides {
        CryptoOverrides {
            iterations: self.iterations,
            key_length: self.key_length,
            salt_length: self.salt_length,
            default_plain_text_length: self.default_plain_text_length,
        }
    }
}

fn resolve_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Ok(Config::load(&p)?),
        None => match default_config_path() {
            Some(p) if p.exists() => Config::load(&p)
                .with_context(|| format!("failed to load default config {}", p.display())),
            _ => Ok(Config::default()),
        },
    }
}

#[derive(Debug, Parser)]
#[command(name = "safeguard")]
#[command(
    version,
    about = "Salted PBKDF2 password hashing with portable hash packets."
)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true, value_name = "PATH", env = "SAFEGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(flatten)]
    crypto: CryptoArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes plain text into a hash packet
    Hash,

    /// Checks plain text against a hash packet
    #[command(arg_required_else_help = true)]
    Verify { packet: String },

    /// Prints the fields of a hash packet
    #[command(arg_required_else_help = true)]
    Decode { packet: String },

    /// Prints the effective configuration
    Config,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let default_filter = if args.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = resolve_config(args.config.clone())?;
    config.crypto.merge(&args.crypto.to_overrides());
    let safeguard = Safeguard::with_config(config.crypto.clone());

    match args.command {
        Commands::Hash => {
            let text = input::read_text()?;
            let packet = safeguard.hash(text.as_deref().map(String::as_str))?;
            println!("{packet}");
        }
        Commands::Verify { packet } => {
            let text = input::read_text()?;
            let matched = safeguard.verify(text.as_deref().map(String::as_str), Some(&packet))?;
            if matched {
                println!("match");
            } else {
                println!("no match");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Decode { packet } => {
            let record = packet::decode(Some(&packet))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
