//! Browser glue shared by the wasm crates.

use js_sys::Error as JsError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, DomException};

use crate::platform::PlatformError;

impl From<JsValue> for PlatformError {
    /// Keep `name`/`message` of rejected promises (`DOMException`s from the
    /// push manager, `TypeError`s from fetch).
    fn from(value: JsValue) -> Self {
        if let Some(e) = value.dyn_ref::<DomException>() {
            return Self::new(e.name(), e.message());
        }
        if let Some(e) = value.dyn_ref::<JsError>() {
            return Self::new(String::from(e.name()), String::from(e.message()));
        }
        Self::new(
            "Error",
            value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<PlatformError> for JsValue {
    fn from(err: PlatformError) -> Self {
        let js = JsError::new(&err.message);
        js.set_name(&err.name);
        js.into()
    }
}

/// `log` backend writing to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!("{}", record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&line),
            log::Level::Warn => console::warn_1(&line),
            log::Level::Info => console::info_1(&line),
            log::Level::Debug | log::Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` records to the console. Later calls are no-ops.
pub fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
