//! Subcommand implementations.

use anyhow::{Context, Result};
use pushsub_core::url_base64_to_bytes;

use crate::config::Config;
use crate::vapid::VapidKeys;

/// Create a key pair and write it to the instance directory.
///
/// Refuses to replace an existing file unless `force` is set: rotating the
/// key invalidates every subscription created with the old one.
pub fn generate(config: &Config, force: bool) -> Result<VapidKeys> {
    let path = config.keys_path();
    if path.exists() && !force {
        anyhow::bail!(
            "VAPID keys already exist at {} (use --force to replace them)",
            path.display()
        );
    }

    let keys = VapidKeys::generate()?;
    keys.save(&path)?;
    log::info!("[WebPush] Wrote VAPID keys to {}", path.display());
    Ok(keys)
}

/// Public key of the existing key pair, as pages embed it.
pub fn public_key(config: &Config) -> Result<String> {
    let keys = VapidKeys::load(&config.keys_path())?;
    Ok(keys.public_key_base64url().to_string())
}

/// Validate the key file and that browsers will accept its public key.
pub fn check(config: &Config) -> Result<()> {
    let keys = VapidKeys::load(&config.keys_path())?;
    keys.validate()?;

    // Same conversion the page runs before PushManager.subscribe()
    let application_server_key = url_base64_to_bytes(keys.public_key_base64url())
        .context("Public key is not usable as applicationServerKey")?;
    anyhow::ensure!(
        application_server_key == keys.public_key_bytes()?,
        "Public key does not survive the browser-side conversion"
    );
    Ok(())
}
