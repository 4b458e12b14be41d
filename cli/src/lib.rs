//! pushsub key tool.
//!
//! Generates and inspects the VAPID key pair shared by the subscription
//! server (which signs pushes with the private key) and the pages (which
//! subscribe with the public key).
//!
//! # Modules
//!
//! - [`commands`] - `generate`, `public-key`, `check`
//! - [`config`] - Instance directory resolution
//! - [`vapid`] - Key pair generation, validation, persistence

pub mod commands;
pub mod config;
pub mod vapid;

pub use config::Config;
pub use vapid::VapidKeys;
