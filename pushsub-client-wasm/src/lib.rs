//! WebAssembly activation script for web push notifications.
//!
//! Loaded by the page (`/static/js/push-subscription.js`). Once the DOM is
//! ready it registers `/service-worker.js` and binds the
//! `#enable-notifications` / `#disable-notifications` controls to the
//! subscribe and unsubscribe actions of [`pushsub_core::activation`].
//!
//! # Page contract
//!
//! ```html
//! <button id="enable-notifications" data-vapid-key="BEl62iUY...">Enable</button>
//! <button id="disable-notifications">Disable</button>   <!-- optional -->
//! ```
//!
//! Defaults can be overridden by setting `window.pushsubConfig` before the
//! module loads, e.g. `{ saveEndpoint: "/api/push/save" }`.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::utils::{document, window};
use js_sys::{Reflect, Uint8Array};
use pushsub_core::activation::{disable_and_report, enable_and_report};
use pushsub_core::{
    page_setup, url_base64_to_bytes, ClientConfig, KeyError, PageSetup, PlatformError,
};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

mod platform;

pub use platform::{BrowserPushPlatform, BrowserSubscription};

/// Global a page may set to override [`ClientConfig`] defaults.
const CONFIG_GLOBAL: &str = "pushsubConfig";

/// Activation failures.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Key(#[from] KeyError),
    #[error("{0}")]
    Platform(#[from] PlatformError),
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Convert a URL-safe base64 VAPID key into the bytes `PushManager.subscribe()` expects.
#[wasm_bindgen(js_name = "urlBase64ToUint8Array")]
pub fn url_base64_to_uint8_array(input: &str) -> Result<Uint8Array, JsValue> {
    let bytes = url_base64_to_bytes(input).map_err(ClientError::from)?;
    Ok(Uint8Array::from(bytes.as_slice()))
}

/// Read `window.pushsubConfig`, falling back to defaults when unset.
pub fn load_config() -> Result<ClientConfig, ClientError> {
    let value = Reflect::get(&window(), &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| ClientError::Config(format!("{:?}", e)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(ClientConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ClientError::Config(e.to_string()))
}

/// Register the worker and bind the controls.
///
/// Does nothing on pages without the enable control.
pub async fn activate(config: ClientConfig) -> Result<(), ClientError> {
    let document = document();
    let enable_button = document.get_element_by_id(&config.enable_button_id);

    let location = window().location();
    let origin = location.origin().map_err(PlatformError::from)?;
    let hostname = location.hostname().map_err(PlatformError::from)?;
    let enable_button = match (page_setup(enable_button.is_some(), &origin, &hostname), enable_button) {
        (PageSetup::Register, Some(button)) => button,
        (PageSetup::InsecureOrigin, _) => {
            log::warn!("[WebPush] Insecure origin {}, not registering", origin);
            gloo::dialogs::alert(&config.messages.insecure_origin);
            return Ok(());
        }
        _ => return Ok(()),
    };

    let vapid_key = enable_button
        .get_attribute(&config.vapid_key_attribute)
        .unwrap_or_default();
    log::info!("[WebPush] VAPID key: {}", vapid_key);

    let platform = Rc::new(BrowserPushPlatform::register(&config.worker_path).await?);
    log::info!("[WebPush] Service worker ready");

    let config = Rc::new(config);
    bind_enable(&enable_button, &platform, &config, Rc::from(vapid_key));
    if let Some(disable_button) = document.get_element_by_id(&config.disable_button_id) {
        bind_disable(&disable_button, &platform, &config);
    }
    Ok(())
}

fn bind_enable(
    button: &Element,
    platform: &Rc<BrowserPushPlatform>,
    config: &Rc<ClientConfig>,
    vapid_key: Rc<str>,
) {
    let platform = Rc::clone(platform);
    let config = Rc::clone(config);
    EventListener::new(button, "click", move |_| {
        let platform = Rc::clone(&platform);
        let config = Rc::clone(&config);
        let vapid_key = Rc::clone(&vapid_key);
        spawn_local(async move {
            // Outcome already reported to the user and logged
            let _ = enable_and_report(platform.as_ref(), &config, &vapid_key).await;
        });
    })
    .forget();
}

fn bind_disable(button: &Element, platform: &Rc<BrowserPushPlatform>, config: &Rc<ClientConfig>) {
    let platform = Rc::clone(platform);
    let config = Rc::clone(config);
    EventListener::new(button, "click", move |_| {
        let platform = Rc::clone(&platform);
        let config = Rc::clone(&config);
        spawn_local(async move {
            let _ = disable_and_report(platform.as_ref(), &config).await;
        });
    })
    .forget();
}

async fn run() {
    let result = match load_config() {
        Ok(config) => activate(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        log::error!("[WebPush] Activation failed: {}", e);
    }
}

/// Initialize the WASM module and schedule activation for DOMContentLoaded.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    pushsub_core::web::init_logging(log::LevelFilter::Info);

    let document = document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| spawn_local(run())).forget();
    } else {
        spawn_local(run());
    }
}
