//! Browser driver: discovers the page, wires listeners, and applies the
//! patches produced by `folio-core`.

mod app;
mod console;
mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::SiteConfig;
use wasm_bindgen::prelude::*;

use app::App;
use dom::Dom;

/// Optional `<script type="application/json">` holding a [`SiteConfig`].
const CONFIG_ELEMENT_ID: &str = "folio-config";

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let config = window
        .document()
        .map(|document| load_config(&document))
        .unwrap_or_default();
    let dom = Dom::discover(window, &config)?;

    let app = App::new(config, dom);
    app.install();
    APP.with(|slot| *slot.borrow_mut() = Some(app));

    console::log("portfolio script loaded");
    Ok(())
}

fn load_config(document: &web_sys::Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            console::warn(&format!("ignoring #{CONFIG_ELEMENT_ID}: {err}"));
            SiteConfig::default()
        }
    }
}

fn with_app<R>(f: impl FnOnce(&Rc<App>) -> R) -> Option<R> {
    APP.with(|slot| slot.borrow().as_ref().map(f))
}

/// Id of the section the navigation currently highlights.
#[wasm_bindgen]
pub fn active_section() -> Option<String> {
    with_app(|app| app.active_section()).flatten()
}

/// Re-measure the page: pick the active section again and move the pill,
/// e.g. after the host page changed layout.
#[wasm_bindgen]
pub fn refresh() {
    with_app(|app| app.relayout());
}

#[wasm_bindgen]
pub fn close_menu() {
    with_app(|app| app.close_menu());
}

/// Current interaction state as JSON.
#[wasm_bindgen]
pub fn state_json() -> Result<String, JsError> {
    let snapshot = with_app(|app| app.snapshot()).ok_or_else(|| JsError::new("not started"))?;
    serde_json::to_string(&snapshot).map_err(|e| JsError::new(&e.to_string()))
}
