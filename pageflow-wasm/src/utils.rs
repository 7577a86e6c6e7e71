use pageflow_core::PageConfig;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::constants::{CONFIG_ELEMENT_ID, FALLBACK_VIEWPORT_WIDTH};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Verbose diagnostics, hidden by default in most consoles.
pub fn debug(s: &str) {
    web_sys::console::debug_1(&JsValue::from_str(s));
}

/// Read the inline JSON configuration block, falling back to defaults when it
/// is absent or invalid.
pub fn load_config(document: &Document) -> PageConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            log(&format!("Ignoring #{CONFIG_ELEMENT_ID}: {e}"));
            PageConfig::default()
        }
    }
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}
