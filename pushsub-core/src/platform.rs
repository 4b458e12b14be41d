//! Seams between the flows and the browser.
//!
//! The browser APIs are single-threaded and promise-based, so every trait is
//! `?Send` and implementations are free to hold `JsValue`s.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::permission::Permission;
use crate::subscription::SubscriptionRecord;
use crate::worker::NotificationSpec;

/// A rejected platform call, keeping the DOMException-style name and message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct PlatformError {
    /// Exception name, e.g. `NotAllowedError` or `AbortError`.
    pub name: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Options passed to `PushManager.subscribe()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Every push must result in a visible notification. Always `true` here.
    pub user_visible_only: bool,
    /// Raw VAPID public key (65-byte uncompressed P-256 point).
    pub application_server_key: Vec<u8>,
}

/// Status and body of a server response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerReply {
    pub status: u16,
    pub body: Option<String>,
}

impl ServerReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Page-side platform: permissions, the push manager of the registered
/// worker, `fetch`, and `alert`.
#[async_trait(?Send)]
pub trait PushPlatform {
    /// Platform subscription handle.
    type Subscription: PushSubscriptionHandle;

    /// Current `Notification.permission`.
    fn permission(&self) -> Permission;

    /// `Notification.requestPermission()`.
    async fn request_permission(&self) -> Result<Permission, PlatformError>;

    /// `PushManager.getSubscription()`.
    async fn get_subscription(&self) -> Result<Option<Self::Subscription>, PlatformError>;

    /// `PushManager.subscribe()`.
    async fn subscribe(&self, options: &SubscribeOptions) -> Result<Self::Subscription, PlatformError>;

    /// POST `body` as JSON to `path`.
    async fn post_json(&self, path: &str, body: &Value) -> Result<ServerReply, PlatformError>;

    /// Blocking user-visible message.
    fn alert(&self, message: &str);
}

/// A live platform subscription.
#[async_trait(?Send)]
pub trait PushSubscriptionHandle {
    /// Snapshot of the subscription (`toJSON()`).
    fn record(&self) -> Result<SubscriptionRecord, PlatformError>;

    /// Cancel at the push service. Returns whether it was cancelled.
    async fn unsubscribe(&self) -> Result<bool, PlatformError>;
}

/// Worker-side platform: the registration and the clients list.
#[async_trait(?Send)]
pub trait WorkerHost {
    /// `registration.showNotification()`.
    async fn show_notification(&self, spec: &NotificationSpec) -> Result<(), PlatformError>;

    /// Focus a window already showing `url`, or open a new one.
    async fn focus_or_open_window(&self, url: &str) -> Result<(), PlatformError>;
}

/// The notification carried by a click event.
pub trait ClickedNotification {
    fn close(&self);
}
