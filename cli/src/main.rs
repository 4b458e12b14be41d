//! pushsub CLI - VAPID key management for web push subscriptions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pushsub::{commands, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pushsub", version, about = "VAPID key management for web push")]
struct Cli {
    /// Directory holding vapid_keys.json (default: $PUSHSUB_INSTANCE_DIR or ./instance)
    #[arg(long, global = true)]
    instance_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new VAPID key pair
    Generate {
        /// Replace an existing key pair
        #[arg(long)]
        force: bool,
    },
    /// Print the public key for the page's data-vapid-key attribute
    PublicKey,
    /// Validate the key pair
    Check,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.instance_dir)?;

    match cli.command {
        Commands::Generate { force } => {
            let keys = commands::generate(&config, force)?;
            println!("VAPID keys written to {}", config.keys_path().display());
            println!("Public key: {}", keys.public_key_base64url());
        }
        Commands::PublicKey => {
            println!("{}", commands::public_key(&config)?);
        }
        Commands::Check => {
            commands::check(&config)?;
            println!("VAPID keys at {} are valid", config.keys_path().display());
        }
    }

    Ok(())
}
