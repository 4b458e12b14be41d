//! Client and worker configuration.
//!
//! Every field has a default matching the stock deployment (worker at
//! `/service-worker.js`, endpoints at `/save-subscription` and
//! `/delete-subscription`), so pages only pass the values they change.

use serde::{Deserialize, Serialize};

/// Configuration of the page-side activation script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Path the worker script is registered from.
    pub worker_path: String,
    /// Endpoint receiving the full subscription.
    pub save_endpoint: String,
    /// Endpoint receiving `{ endpoint }` on unsubscribe.
    pub delete_endpoint: String,
    /// Id of the "enable notifications" control. Nothing runs without it.
    pub enable_button_id: String,
    /// Id of the optional "disable notifications" control.
    pub disable_button_id: String,
    /// Attribute of the enable control holding the VAPID public key.
    pub vapid_key_attribute: String,
    /// User-visible texts.
    pub messages: Messages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            worker_path: "/service-worker.js".to_string(),
            save_endpoint: "/save-subscription".to_string(),
            delete_endpoint: "/delete-subscription".to_string(),
            enable_button_id: "enable-notifications".to_string(),
            disable_button_id: "disable-notifications".to_string(),
            vapid_key_attribute: "data-vapid-key".to_string(),
            messages: Messages::default(),
        }
    }
}

/// Texts shown to the user through blocking alerts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub insecure_origin: String,
    pub permission_required: String,
    pub permission_blocked: String,
    pub enabled: String,
    /// Followed by the error message.
    pub subscribe_failed: String,
    pub nothing_to_unsubscribe: String,
    pub disabled: String,
    /// Followed by the error message.
    pub unsubscribe_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            insecure_origin: "Push notifications need HTTPS or localhost".to_string(),
            permission_required: "Notifications must be allowed.".to_string(),
            permission_blocked: "Please enable notifications in the site settings.".to_string(),
            enabled: "Notifications enabled".to_string(),
            subscribe_failed: "Subscription failed: ".to_string(),
            nothing_to_unsubscribe: "No subscription to cancel".to_string(),
            disabled: "Notifications disabled".to_string(),
            unsubscribe_failed: "Unsubscribe failed: ".to_string(),
        }
    }
}

/// Configuration of the background worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Title used when the payload has none.
    pub default_title: String,
    pub icon: String,
    /// Small monochrome image for the status bar (Android).
    pub badge: String,
    /// Window opened when a notification is clicked.
    pub click_url: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            default_title: "New notification".to_string(),
            icon: "/static/icons/icon.png".to_string(),
            badge: "/static/icons/badge.png".to_string(),
            click_url: "/".to_string(),
        }
    }
}
