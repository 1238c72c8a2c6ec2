//! WebAssembly entry point and platform-specific code.

use taskboard_core::{CookieSource, Shell};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlDocument;

/// Page shell backed by `location.reload()` and `window.alert()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserShell;

impl Shell for BrowserShell {
    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().reload() {
            log::error!("Failed to reload page: {:?}", e);
        }
    }

    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::error!("Failed to show alert: {:?}", e);
        }
    }
}

/// Reads `document.cookie` on every request so a rotated token is picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie_string(&self) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let html: HtmlDocument = document.dyn_into().ok()?;
        html.cookie().ok()
    }
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    log::info!("Taskboard (WASM) loaded");
}
