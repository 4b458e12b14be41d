//! `web-sys` implementation of the worker-side platform.

use async_trait::async_trait;
use js_sys::Array;
use pushsub_core::{ClickedNotification, NotificationSpec, PlatformError, WorkerHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    ClientQueryOptions, ClientType, Notification, NotificationOptions, ServiceWorkerGlobalScope,
    Url, WindowClient,
};

/// The running service worker (`self`).
#[derive(Debug, Clone)]
pub struct ServiceWorkerHost {
    scope: ServiceWorkerGlobalScope,
}

impl ServiceWorkerHost {
    pub fn current() -> Self {
        Self {
            scope: js_sys::global().unchecked_into::<ServiceWorkerGlobalScope>(),
        }
    }

    /// Resolve `url` against the worker's origin, as `Client.url` reports it.
    fn absolute_url(&self, url: &str) -> Result<String, PlatformError> {
        Ok(Url::new_with_base(url, &self.scope.location().href())?.href())
    }
}

#[async_trait(?Send)]
impl WorkerHost for ServiceWorkerHost {
    async fn show_notification(&self, notification: &NotificationSpec) -> Result<(), PlatformError> {
        let options = NotificationOptions::new();
        options.set_body(&notification.body);
        options.set_icon(&notification.icon);
        options.set_badge(&notification.badge);
        JsFuture::from(
            self.scope
                .registration()
                .show_notification_with_options(&notification.title, &options)?,
        )
        .await?;
        Ok(())
    }

    async fn focus_or_open_window(&self, url: &str) -> Result<(), PlatformError> {
        let target = self.absolute_url(url)?;
        let clients = self.scope.clients();

        let query = ClientQueryOptions::new();
        query.set_type(ClientType::Window);
        query.set_include_uncontrolled(true);
        let windows = Array::from(&JsFuture::from(clients.match_all_with_options(&query)).await?);

        for client in windows.iter() {
            let client = client.unchecked_into::<WindowClient>();
            if client.url() == target {
                JsFuture::from(client.focus()?).await?;
                return Ok(());
            }
        }

        JsFuture::from(clients.open_window(url)).await?;
        Ok(())
    }
}

/// The notification attached to a `notificationclick` event.
#[derive(Debug, Clone)]
pub struct EventNotification {
    inner: Notification,
}

impl EventNotification {
    pub fn new(inner: Notification) -> Self {
        Self { inner }
    }
}

impl ClickedNotification for EventNotification {
    fn close(&self) {
        self.inner.close();
    }
}
