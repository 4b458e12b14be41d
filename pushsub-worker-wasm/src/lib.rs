//! WebAssembly service worker for web push notifications.
//!
//! `/service-worker.js` loads this module and forwards its `push` and
//! `notificationclick` events to [`handle_push_event`] and
//! [`handle_notification_click_event`]. The listeners themselves stay in the
//! script because browsers only honour listeners added during its first
//! evaluation; the script passes the returned promises to `waitUntil` so the
//! worker lives until the notification is shown or the window is opened.

use std::cell::RefCell;

use pushsub_core::worker::{handle_notification_click, handle_push};
use pushsub_core::WorkerConfig;
use wasm_bindgen::prelude::*;
use web_sys::{NotificationEvent, PushEvent};

mod host;

pub use host::{EventNotification, ServiceWorkerHost};

thread_local! {
    static CONFIG: RefCell<WorkerConfig> = RefCell::new(WorkerConfig::default());
}

fn config() -> WorkerConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Override [`WorkerConfig`] defaults, e.g. `configure({ icon: "/img/bell.png" })`.
#[wasm_bindgen]
pub fn configure(overrides: JsValue) -> Result<(), JsValue> {
    let parsed: WorkerConfig = serde_wasm_bindgen::from_value(overrides)?;
    CONFIG.with(|c| *c.borrow_mut() = parsed);
    Ok(())
}

/// Show the notification for a push event.
///
/// Never rejects: unreadable payloads degrade to the default notification
/// and platform failures are logged.
#[wasm_bindgen(js_name = "handlePushEvent")]
pub async fn handle_push_event(event: PushEvent) {
    let data = event.data().map(|d| d.text());
    let host = ServiceWorkerHost::current();
    match handle_push(&host, &config(), data.as_deref()).await {
        Ok(notification) => log::debug!("[Worker] Showed notification: {}", notification.title),
        Err(e) => log::error!("[Worker] {}", e),
    }
}

/// Close the clicked notification and focus or open the app window.
#[wasm_bindgen(js_name = "handleNotificationClickEvent")]
pub async fn handle_notification_click_event(event: NotificationEvent) {
    let host = ServiceWorkerHost::current();
    let notification = EventNotification::new(event.notification());
    if let Err(e) = handle_notification_click(&host, &config(), &notification).await {
        log::error!("[Worker] {}", e);
    }
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    pushsub_core::web::init_logging(log::LevelFilter::Info);
}
