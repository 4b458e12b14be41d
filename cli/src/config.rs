//! Key tool configuration.
//!
//! Resolves where the VAPID key file lives. The server reads it from its
//! instance directory, so that is where the tool writes it too.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// File name of the key pair inside the instance directory.
pub const KEYS_FILE: &str = "vapid_keys.json";

/// Environment variable overriding the instance directory.
pub const INSTANCE_DIR_ENV: &str = "PUSHSUB_INSTANCE_DIR";

/// Configuration for the pushsub CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `vapid_keys.json`.
    pub instance_dir: PathBuf,
}

impl Config {
    /// Resolve the instance directory.
    ///
    /// Priority:
    /// 1. `--instance-dir` flag
    /// 2. `PUSHSUB_INSTANCE_DIR` env var
    /// 3. `./instance`
    pub fn load(instance_dir: Option<PathBuf>) -> Result<Self> {
        let instance_dir = match instance_dir {
            Some(dir) => dir,
            None => match std::env::var(INSTANCE_DIR_ENV) {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => std::env::current_dir()
                    .context("Could not determine current directory")?
                    .join("instance"),
            },
        };
        Ok(Self { instance_dir })
    }

    /// Path of the key file.
    pub fn keys_path(&self) -> PathBuf {
        self.instance_dir.join(KEYS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let config = Config::load(Some(PathBuf::from("/srv/app/instance"))).expect("load");
        assert_eq!(config.keys_path(), PathBuf::from("/srv/app/instance/vapid_keys.json"));
    }
}
