//! VAPID key pair handling for Web Push (RFC 8292).
//!
//! The key file is the one the subscription server loads at startup:
//!
//! ```json
//! { "publicKey": "BEl62iUY...", "privateKey": "x3Fb..." }
//! ```
//!
//! The public key is what pages embed in `data-vapid-key`; the private key
//! signs the server's push requests.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use p256::ecdsa::SigningKey;
use p256::elliptic_curve::rand_core::OsRng;
use serde::{Deserialize, Serialize};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{fs, path::Path};

/// VAPID keypair for web push authentication.
///
/// The private key is the raw 32-byte P-256 scalar (base64url), the format
/// web push libraries take directly. The public key is the uncompressed SEC1
/// point (65 bytes).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VapidKeys {
    /// Uncompressed public key bytes (base64url, 65 bytes decoded).
    public_key: String,
    /// Raw 32-byte P-256 private key scalar (base64url).
    private_key: String,
}

impl VapidKeys {
    /// Generate a fresh VAPID keypair.
    pub fn generate() -> Result<Self> {
        let signing_key = SigningKey::random(&mut OsRng);

        // SEC1 uncompressed public key (65 bytes: 0x04 || x || y)
        let public_bytes = signing_key.verifying_key().to_encoded_point(false);

        Ok(Self {
            public_key: BASE64URL.encode(public_bytes.as_bytes()),
            private_key: BASE64URL.encode(signing_key.to_bytes().as_slice()),
        })
    }

    /// Base64url-encoded uncompressed public key, the page's `applicationServerKey`.
    pub fn public_key_base64url(&self) -> &str {
        &self.public_key
    }

    /// Base64url-encoded raw 32-byte private key scalar.
    pub fn private_key_base64url(&self) -> &str {
        &self.private_key
    }

    /// Check the public key is a 65-byte uncompressed P-256 point, the private
    /// key a valid scalar, and that they belong together.
    pub fn validate(&self) -> Result<()> {
        let pub_bytes = self.public_key_bytes()?;
        anyhow::ensure!(
            pub_bytes.len() == 65 && pub_bytes[0] == 0x04,
            "VAPID public key must be 65-byte uncompressed P-256 point"
        );

        let priv_bytes = BASE64URL
            .decode(&self.private_key)
            .context("Invalid base64url for VAPID private key")?;
        anyhow::ensure!(
            priv_bytes.len() == 32,
            "VAPID private key must be 32-byte P-256 scalar, got {} bytes",
            priv_bytes.len()
        );
        let signing_key = SigningKey::from_bytes(priv_bytes.as_slice().into())
            .context("VAPID private key is not a valid P-256 scalar")?;

        let derived = signing_key.verifying_key().to_encoded_point(false);
        anyhow::ensure!(
            derived.as_bytes() == pub_bytes.as_slice(),
            "VAPID public key does not match the private key"
        );
        Ok(())
    }

    /// Migrate legacy private key formats (SEC1 DER, PKCS8 DER) to the raw scalar.
    ///
    /// Key files written by other tooling often carry the private key as DER.
    /// If the key is already 32 bytes, this is a no-op.
    pub fn migrate_if_needed(self) -> Result<Self> {
        let priv_bytes = BASE64URL
            .decode(&self.private_key)
            .context("Failed to decode VAPID private key")?;

        if priv_bytes.len() == 32 {
            return Ok(self);
        }

        // Try SEC1 DER first (109 bytes typically), then PKCS8 DER (~138 bytes)
        let signing_key = if let Ok(sk) = p256::SecretKey::from_sec1_der(&priv_bytes) {
            SigningKey::from(sk)
        } else {
            use p256::pkcs8::DecodePrivateKey;
            SigningKey::from_pkcs8_der(&priv_bytes)
                .context("VAPID private key is not valid 32-byte scalar, SEC1 DER, or PKCS8 DER")?
        };

        log::info!(
            "[WebPush] Migrated VAPID key from legacy DER ({} bytes) to raw scalar",
            priv_bytes.len()
        );

        Ok(Self {
            public_key: self.public_key,
            private_key: BASE64URL.encode(signing_key.to_bytes().as_slice()),
        })
    }

    /// Uncompressed public key bytes (65 bytes).
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        BASE64URL
            .decode(&self.public_key)
            .context("Invalid base64url for VAPID public key")
    }

    /// Load a key file, migrating legacy private key formats.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read VAPID keys from {}", path.display()))?;
        let keys: Self = serde_json::from_str(&content)
            .with_context(|| format!("Malformed VAPID key file {}", path.display()))?;
        keys.migrate_if_needed()
    }

    /// Write the key file, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write VAPID keys to {}", path.display()))?;

        // Set restrictive permissions (owner read/write only)
        #[cfg(unix)]
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }
}
