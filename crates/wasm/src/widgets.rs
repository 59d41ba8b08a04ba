//! JS-facing wrappers for the hero headline, the theme picker and the
//! contact form.

use crate::dom;
use constellation_core::Palette;
use constellation_widgets::{ContactForm, Typewriter, TypewriterTiming, DEFAULT_ROLES};
use wasm_bindgen::prelude::*;

/// Role cycler for the hero headline. JS waits `delay`, calls `tick()`, and
/// schedules the next call after the returned number of milliseconds.
#[wasm_bindgen]
pub struct RoleTyper {
    inner: Typewriter,
}

#[wasm_bindgen]
impl RoleTyper {
    /// Uses the default roles when `roles` is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(roles: Vec<String>) -> Self {
        let inner = if roles.is_empty() {
            Typewriter::new(DEFAULT_ROLES, TypewriterTiming::default())
        } else {
            Typewriter::new(roles.as_slice(), TypewriterTiming::default())
        };
        Self { inner }
    }

    pub fn tick(&mut self) -> f64 {
        self.inner.tick().as_secs_f64() * 1000.0
    }

    /// Milliseconds to wait before the first `tick()`.
    #[wasm_bindgen(getter)]
    pub fn delay(&self) -> f64 {
        self.inner.delay().as_secs_f64() * 1000.0
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text()
    }
}

/// Names of the built-in themes, in picker order.
#[wasm_bindgen(js_name = themeNames)]
pub fn theme_names() -> Vec<String> {
    Palette::list_names().into_iter().map(String::from).collect()
}

/// Switches the page to a built-in theme and notifies every listener,
/// including a mounted background.
#[wasm_bindgen(js_name = applyTheme)]
pub fn apply_theme(name: &str) -> Result<(), JsValue> {
    let palette = Palette::from_name(name).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    dom::publish_theme(&window, name, &palette)
}

/// Validates contact-form input. Returns a JSON object: `{"valid": true}` or
/// `{"valid": false, "errors": {field: message}}`.
#[wasm_bindgen(js_name = validateContact)]
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<String, JsValue> {
    let result = match ContactForm::new(name, email, message).validate() {
        Ok(()) => serde_json::json!({ "valid": true }),
        Err(errors) => serde_json::json!({ "valid": false, "errors": errors }),
    };
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}
