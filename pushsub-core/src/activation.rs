//! Enable/disable actions of the activation script.
//!
//! Each action is a strict sequence (permission → subscription lookup →
//! subscribe/unsubscribe → server report) where every step needs the result of
//! the previous one. Nothing is retried and nothing guards against a second
//! click racing the first; the push service's own subscription semantics make
//! a duplicate `subscribe()` return the same subscription.

use thiserror::Error;

use crate::config::{ClientConfig, Messages};
use crate::key::{url_base64_to_bytes, KeyError};
use crate::permission::{Permission, PermissionStep};
use crate::platform::{PlatformError, PushPlatform, PushSubscriptionHandle, SubscribeOptions};
use crate::subscription::{DeleteRequest, ServerAck};

/// Push requires a secure context; `localhost` counts as one.
///
/// Only the hostname prefix is checked for localhost: some browsers (Edge)
/// don't treat `127.0.0.1` as secure for push.
pub fn is_secure_origin(origin: &str, hostname: &str) -> bool {
    origin.starts_with("https") || hostname.starts_with("localhost")
}

/// What the activation script does once the page has loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSetup {
    /// No enable control on this page; leave it alone.
    NoControls,
    /// Push is unavailable here; alert once and stop.
    InsecureOrigin,
    /// Register the worker and bind the controls.
    Register,
}

/// Decide the page-load step. The control check comes first so pages
/// without it never see the insecure-origin alert.
pub fn page_setup(has_enable_control: bool, origin: &str, hostname: &str) -> PageSetup {
    if !has_enable_control {
        PageSetup::NoControls
    } else if !is_secure_origin(origin, hostname) {
        PageSetup::InsecureOrigin
    } else {
        PageSetup::Register
    }
}

/// Ways the enable action can stop.
#[derive(Error, Debug)]
pub enum EnableError {
    #[error("notification permission was not granted")]
    PermissionNotGranted,
    #[error("notification permission is denied")]
    PermissionDenied,
    #[error("{0}")]
    Key(#[from] KeyError),
    #[error("{0}")]
    Platform(#[from] PlatformError),
    #[error("failed to encode subscription: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server rejected the subscription (HTTP {status})")]
    Server { status: u16 },
}

impl EnableError {
    /// Alert text for this failure.
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            Self::PermissionNotGranted => messages.permission_required.clone(),
            Self::PermissionDenied => messages.permission_blocked.clone(),
            Self::Platform(e) => format!("{}{}", messages.subscribe_failed, e.message),
            other => format!("{}{}", messages.subscribe_failed, other),
        }
    }
}

/// Result of a successful enable action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnableOutcome {
    pub endpoint: String,
    /// An existing subscription was sent instead of creating a new one.
    pub reused: bool,
    pub ack: Option<ServerAck>,
}

/// Ways the disable action can stop.
#[derive(Error, Debug)]
pub enum DisableError {
    #[error("{0}")]
    Platform(#[from] PlatformError),
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server rejected the deletion (HTTP {status})")]
    Server { status: u16 },
}

impl DisableError {
    /// Alert text for this failure.
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            Self::Platform(e) => format!("{}{}", messages.unsubscribe_failed, e.message),
            other => format!("{}{}", messages.unsubscribe_failed, other),
        }
    }
}

/// Result of a successful disable action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisableOutcome {
    /// There was no subscription; no network call was made.
    NothingToUnsubscribe,
    Unsubscribed {
        endpoint: String,
        ack: Option<ServerAck>,
    },
}

/// Make sure the browser holds a subscription and the server knows about it.
pub async fn enable<P: PushPlatform>(
    platform: &P,
    config: &ClientConfig,
    vapid_key: &str,
) -> Result<EnableOutcome, EnableError> {
    match platform.permission().step() {
        PermissionStep::Prompt => {
            let answer = platform.request_permission().await?;
            log::info!("[WebPush] Notification.permission={}", answer);
            if answer != Permission::Granted {
                return Err(EnableError::PermissionNotGranted);
            }
        }
        PermissionStep::Blocked => return Err(EnableError::PermissionDenied),
        PermissionStep::Proceed => {}
    }

    let (subscription, reused) = match platform.get_subscription().await? {
        Some(existing) => {
            log::info!("[WebPush] Existing subscription found, not creating another");
            (existing, true)
        }
        None => {
            let options = SubscribeOptions {
                user_visible_only: true,
                application_server_key: url_base64_to_bytes(vapid_key)?,
            };
            let created = platform.subscribe(&options).await?;
            (created, false)
        }
    };

    let record = subscription.record()?;
    log::info!("[WebPush] Subscription: {:?}", record);

    let reply = platform
        .post_json(&config.save_endpoint, &serde_json::to_value(&record)?)
        .await?;
    if !reply.is_success() {
        return Err(EnableError::Server {
            status: reply.status,
        });
    }
    let ack = reply.body.as_deref().and_then(ServerAck::from_body);
    if let Some(ack) = &ack {
        log::info!("[WebPush] Server acknowledged subscription: {}", ack.status);
    }

    Ok(EnableOutcome {
        endpoint: record.endpoint,
        reused,
        ack,
    })
}

/// Run [`enable`] and tell the user how it went.
pub async fn enable_and_report<P: PushPlatform>(
    platform: &P,
    config: &ClientConfig,
    vapid_key: &str,
) -> Result<EnableOutcome, EnableError> {
    let result = enable(platform, config, vapid_key).await;
    match &result {
        Ok(_) => platform.alert(&config.messages.enabled),
        Err(e) => {
            match e {
                EnableError::Platform(p) => {
                    log::error!("[WebPush] Subscription failed: {} {}", p.name, p.message);
                }
                EnableError::PermissionNotGranted | EnableError::PermissionDenied => {
                    log::warn!("[WebPush] {}", e);
                }
                other => log::error!("[WebPush] Subscription failed: {}", other),
            }
            platform.alert(&e.user_message(&config.messages));
        }
    }
    result
}

/// Cancel the browser's subscription and ask the server to forget it.
pub async fn disable<P: PushPlatform>(
    platform: &P,
    config: &ClientConfig,
) -> Result<DisableOutcome, DisableError> {
    let Some(subscription) = platform.get_subscription().await? else {
        return Ok(DisableOutcome::NothingToUnsubscribe);
    };
    let endpoint = subscription.record()?.endpoint;

    if !subscription.unsubscribe().await? {
        log::warn!("[WebPush] Push service reported the subscription was not cancelled");
    }

    let body = serde_json::to_value(DeleteRequest {
        endpoint: endpoint.clone(),
    })?;
    let reply = platform.post_json(&config.delete_endpoint, &body).await?;
    if !reply.is_success() {
        return Err(DisableError::Server {
            status: reply.status,
        });
    }

    Ok(DisableOutcome::Unsubscribed {
        endpoint,
        ack: reply.body.as_deref().and_then(ServerAck::from_body),
    })
}

/// Run [`disable`] and tell the user how it went.
pub async fn disable_and_report<P: PushPlatform>(
    platform: &P,
    config: &ClientConfig,
) -> Result<DisableOutcome, DisableError> {
    let result = disable(platform, config).await;
    match &result {
        Ok(DisableOutcome::NothingToUnsubscribe) => {
            platform.alert(&config.messages.nothing_to_unsubscribe);
        }
        Ok(DisableOutcome::Unsubscribed { .. }) => platform.alert(&config.messages.disabled),
        Err(e) => {
            log::error!("[WebPush] Unsubscribe failed: {}", e);
            platform.alert(&e.user_message(&config.messages));
        }
    }
    result
}
