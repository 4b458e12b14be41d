//! `web-sys` implementation of the page-side push platform.

use async_trait::async_trait;
use gloo::net::http::Request;
use js_sys::Uint8Array;
use pushsub_core::{
    Permission, PlatformError, PushPlatform, PushSubscriptionHandle, ServerReply, SubscribeOptions,
    SubscriptionRecord,
};
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Notification, NotificationPermission, PushManager, PushSubscription,
    PushSubscriptionOptionsInit, ServiceWorkerRegistration,
};

/// Push platform backed by the registration of our service worker.
#[derive(Debug, Clone)]
pub struct BrowserPushPlatform {
    registration: ServiceWorkerRegistration,
}

impl BrowserPushPlatform {
    /// Register the worker script and wait until it is active.
    ///
    /// Push subscriptions can only be created on an active registration.
    pub async fn register(worker_path: &str) -> Result<Self, PlatformError> {
        let container = gloo::utils::window().navigator().service_worker();
        let registration =
            ServiceWorkerRegistration::from(JsFuture::from(container.register(worker_path)).await?);
        JsFuture::from(container.ready()?).await?;
        Ok(Self { registration })
    }

    fn push_manager(&self) -> Result<PushManager, PlatformError> {
        Ok(self.registration.push_manager()?)
    }
}

fn permission_from(value: NotificationPermission) -> Permission {
    match value {
        NotificationPermission::Granted => Permission::Granted,
        NotificationPermission::Denied => Permission::Denied,
        _ => Permission::Default,
    }
}

#[async_trait(?Send)]
impl PushPlatform for BrowserPushPlatform {
    type Subscription = BrowserSubscription;

    fn permission(&self) -> Permission {
        permission_from(Notification::permission())
    }

    async fn request_permission(&self) -> Result<Permission, PlatformError> {
        let answer = JsFuture::from(Notification::request_permission()?).await?;
        Ok(NotificationPermission::from_js_value(&answer)
            .map(permission_from)
            .unwrap_or(Permission::Default))
    }

    async fn get_subscription(&self) -> Result<Option<BrowserSubscription>, PlatformError> {
        let value = JsFuture::from(self.push_manager()?.get_subscription()?).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        Ok(Some(BrowserSubscription {
            inner: PushSubscription::from(value),
        }))
    }

    async fn subscribe(&self, options: &SubscribeOptions) -> Result<BrowserSubscription, PlatformError> {
        let init = PushSubscriptionOptionsInit::new();
        init.set_user_visible_only(options.user_visible_only);
        init.set_application_server_key(&JsValue::from(Uint8Array::from(
            options.application_server_key.as_slice(),
        )));
        let value = JsFuture::from(self.push_manager()?.subscribe_with_options(&init)?).await?;
        Ok(BrowserSubscription {
            inner: PushSubscription::from(value),
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<ServerReply, PlatformError> {
        let response = Request::post(path)
            .json(body)
            .map_err(|e| PlatformError::new("TypeError", e.to_string()))?
            .send()
            .await
            .map_err(|e| PlatformError::new("NetworkError", e.to_string()))?;
        let status = response.status();
        let body = response.text().await.ok();
        Ok(ServerReply { status, body })
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}

/// A `PushSubscription` held by the browser.
#[derive(Debug, Clone)]
pub struct BrowserSubscription {
    inner: PushSubscription,
}

#[async_trait(?Send)]
impl PushSubscriptionHandle for BrowserSubscription {
    fn record(&self) -> Result<SubscriptionRecord, PlatformError> {
        let json = self.inner.to_json()?;
        serde_wasm_bindgen::from_value(json.into())
            .map_err(|e| PlatformError::new("DataError", format!("unreadable subscription: {e}")))
    }

    async fn unsubscribe(&self) -> Result<bool, PlatformError> {
        let done = JsFuture::from(self.inner.unsubscribe()?).await?;
        Ok(done.as_bool().unwrap_or(false))
    }
}
