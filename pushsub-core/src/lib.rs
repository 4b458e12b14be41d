//! Platform-independent core of the pushsub web push client.
//!
//! Holds everything the browser-side crates share: the VAPID key conversion
//! helper, the notification permission state machine, the wire types sent to
//! the subscription endpoints, and the enable/disable/push/click flows.
//!
//! The flows are written against small platform traits ([`PushPlatform`],
//! [`WorkerHost`]) so they run unchanged in the browser (`web-sys`
//! implementations live in `pushsub-client-wasm` and `pushsub-worker-wasm`)
//! and under native tests with in-memory fakes.
//!
//! # Flow
//!
//! ```text
//! Page load
//!     ↓
//! secure origin check → register /service-worker.js → wait until ready
//!     ↓
//! "enable" click → permission → existing subscription? → subscribe → POST /save-subscription
//!     ↓
//! Push service delivers message → worker shows notification
//!     ↓
//! Notification click → worker closes it and opens /
//! ```

// Rust guideline compliant 2026-02

pub mod activation;
pub mod config;
pub mod key;
pub mod permission;
pub mod platform;
pub mod subscription;
pub mod worker;

#[cfg(feature = "web")]
pub mod web;

pub use activation::{
    disable, disable_and_report, enable, enable_and_report, is_secure_origin, page_setup,
    DisableError, DisableOutcome, EnableError, EnableOutcome, PageSetup,
};
pub use config::{ClientConfig, Messages, WorkerConfig};
pub use key::{url_base64_to_bytes, KeyError};
pub use permission::{Permission, PermissionStep};
pub use platform::{
    ClickedNotification, PlatformError, PushPlatform, PushSubscriptionHandle, ServerReply,
    SubscribeOptions, WorkerHost,
};
pub use subscription::{DeleteRequest, ServerAck, SubscriptionKeys, SubscriptionRecord};
pub use worker::{
    handle_notification_click, handle_push, NotificationSpec, PushPayload, WorkerError,
};
