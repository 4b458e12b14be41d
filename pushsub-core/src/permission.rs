//! Notification permission state machine.
//!
//! ```text
//! default ──prompt──► granted   (subscription allowed from now on)
//!    │
//!    └──────prompt──► denied    (terminal for the session, never re-prompted)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `Notification.permission` as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// The user has not decided yet.
    Default,
    /// Notifications allowed.
    Granted,
    /// Notifications blocked; only the browser settings can undo this.
    Denied,
}

/// What the enable action must do for a given permission state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStep {
    /// Ask the user, then re-evaluate the answer.
    Prompt,
    /// Go ahead with the subscription.
    Proceed,
    /// Stop and point the user at the browser settings.
    Blocked,
}

impl Permission {
    /// Next step of the enable action in this state.
    pub fn step(self) -> PermissionStep {
        match self {
            Self::Default => PermissionStep::Prompt,
            Self::Granted => PermissionStep::Proceed,
            Self::Denied => PermissionStep::Blocked,
        }
    }

    /// The string the platform uses for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            other => Err(format!("unknown notification permission: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps() {
        assert_eq!(Permission::Default.step(), PermissionStep::Prompt);
        assert_eq!(Permission::Granted.step(), PermissionStep::Proceed);
        assert_eq!(Permission::Denied.step(), PermissionStep::Blocked);
    }

    #[test]
    fn test_parse_platform_strings() {
        for p in [Permission::Default, Permission::Granted, Permission::Denied] {
            assert_eq!(p.as_str().parse::<Permission>(), Ok(p));
        }
        assert!("prompt".parse::<Permission>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&Permission::Granted).expect("serialize"),
            "\"granted\""
        );
    }
}
