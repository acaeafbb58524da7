//! Prefixed console output.

use wasm_bindgen::JsValue;
use web_sys::console;

fn prefixed(message: &str) -> JsValue {
    format!("folio: {message}").into()
}

pub fn log(message: &str) {
    console::log_1(&prefixed(message));
}

pub fn debug(message: &str) {
    console::debug_1(&prefixed(message));
}

pub fn warn(message: &str) {
    console::warn_1(&prefixed(message));
}

/// Log `message` followed by the raw JS value, so the console can render
/// stacks and objects natively.
pub fn error_with(message: &str, value: &JsValue) {
    console::error_2(&prefixed(message), value);
}

pub fn warn_with(message: &str, value: &JsValue) {
    console::warn_2(&prefixed(message), value);
}
