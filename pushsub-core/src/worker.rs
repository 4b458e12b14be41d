//! Background worker handlers.
//!
//! A push always ends in a visible notification (subscriptions are created
//! with `userVisibleOnly`), so a payload that can't be read degrades to the
//! default title and an empty body instead of failing the handler.

use serde::Deserialize;
use thiserror::Error;

use crate::config::WorkerConfig;
use crate::platform::{ClickedNotification, PlatformError, WorkerHost};

/// Worker handler failures. Only platform calls can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("failed to show notification: {0}")]
    ShowNotification(PlatformError),
    #[error("failed to open window: {0}")]
    OpenWindow(PlatformError),
}

/// Inbound push message body, e.g. `{"title": "Status update", "body": "..."}`.
///
/// Other fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    /// Decode the message text, falling back to an empty payload.
    ///
    /// `None` is a push without data. JSON that isn't an object, or whose
    /// `title`/`body` aren't strings, counts as unreadable.
    pub fn decode(data: Option<&str>) -> Self {
        let Some(text) = data else {
            log::warn!("[Worker] Push data parse error: push carried no data");
            return Self::default();
        };
        match Self::parse(text) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("[Worker] Push data parse error: {}", e);
                Self::default()
            }
        }
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected a JSON object, got {}",
                value
            )));
        }
        serde_json::from_value(value)
    }
}

/// Everything passed to `showNotification(title, options)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
}

impl NotificationSpec {
    /// Fill in defaults and the fixed assets.
    pub fn from_payload(payload: PushPayload, config: &WorkerConfig) -> Self {
        Self {
            title: payload
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| config.default_title.clone()),
            body: payload.body.unwrap_or_default(),
            icon: config.icon.clone(),
            badge: config.badge.clone(),
        }
    }
}

/// Handle a push event: decode, then show the notification.
///
/// The returned future resolves once the platform has displayed it; callers
/// hand it to `waitUntil` so the worker stays alive that long.
pub async fn handle_push<H: WorkerHost>(
    host: &H,
    config: &WorkerConfig,
    data: Option<&str>,
) -> Result<NotificationSpec, WorkerError> {
    let notification = NotificationSpec::from_payload(PushPayload::decode(data), config);
    host.show_notification(&notification)
        .await
        .map_err(WorkerError::ShowNotification)?;
    Ok(notification)
}

/// Handle a notification click: close it, then bring up the app window.
pub async fn handle_notification_click<H: WorkerHost, N: ClickedNotification>(
    host: &H,
    config: &WorkerConfig,
    notification: &N,
) -> Result<(), WorkerError> {
    log::info!("[Worker] Notification click received");
    notification.close();
    host.focus_or_open_window(&config.click_url)
        .await
        .map_err(WorkerError::OpenWindow)
}
