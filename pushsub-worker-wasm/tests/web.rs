//! Browser tests for the worker exports.
//!
//! Run with `wasm-pack test --headless --chrome pushsub-worker-wasm`.

#![cfg(target_arch = "wasm32")]

use pushsub_worker_wasm::configure;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn configure_accepts_partial_overrides() {
    let overrides = js_sys::JSON::parse(r#"{"icon": "/img/bell.png"}"#).expect("json");
    assert!(configure(overrides).is_ok());
}

#[wasm_bindgen_test]
fn configure_rejects_wrong_types() {
    let overrides = js_sys::JSON::parse(r#"{"clickUrl": 3}"#).expect("json");
    assert!(configure(overrides).is_err());
    assert!(configure(JsValue::from_f64(1.0)).is_err());
}
