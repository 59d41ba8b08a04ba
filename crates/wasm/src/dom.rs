//! DOM event plumbing and theme exchange with the rest of the page.
//!
//! The theme picker publishes a `themeChanged` event on `window` with a
//! `{ name, primary, secondary, accent }` detail, each color an `"R G B"`
//! string, and mirrors the same colors into the `--color-*` custom
//! properties on the document root.

use constellation_core::{Palette, PALETTE_SLOTS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget, HtmlElement, Window};

pub const THEME_EVENT: &str = "themeChanged";

/// Detail keys and matching CSS custom properties, in palette slot order.
const SLOTS: [(&str, &str); PALETTE_SLOTS] = [
    ("primary", "--color-primary"),
    ("secondary", "--color-secondary"),
    ("accent", "--color-accent"),
];

/// An event listener that is removed from its target on drop.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Reads the `--color-*` custom properties from the document root.
/// Missing properties come back as empty strings.
pub fn css_theme_colors(window: &Window) -> [String; PALETTE_SLOTS] {
    let style = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|root| window.get_computed_style(&root).ok().flatten());
    SLOTS.map(|(_, property)| {
        style
            .as_ref()
            .and_then(|s| s.get_property_value(property).ok())
            .unwrap_or_default()
    })
}

/// Pulls the three color strings out of a `themeChanged` event, falling back
/// to the document's custom properties when the event carries no detail.
pub fn theme_colors_from_event(window: &Window, event: &Event) -> [String; PALETTE_SLOTS] {
    let detail = event
        .dyn_ref::<CustomEvent>()
        .map(CustomEvent::detail)
        .filter(JsValue::is_object);
    match detail {
        Some(detail) => SLOTS.map(|(key, _)| {
            js_sys::Reflect::get(&detail, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default()
        }),
        None => css_theme_colors(window),
    }
}

/// Builds a palette from raw color strings, keeping `last_known`'s color for
/// any slot that does not parse.
pub fn palette_from_strings(colors: &[String; PALETTE_SLOTS], last_known: &Palette) -> Palette {
    let parts: Vec<&str> = colors.iter().map(|c| c.trim()).collect();
    Palette::from_triplets_or(&parts, last_known)
}

/// Publishes a built-in theme to the page: sets the root custom properties and
/// dispatches `themeChanged` on `window`.
pub fn publish_theme(window: &Window, name: &str, palette: &Palette) -> Result<(), JsValue> {
    let triplets: Vec<String> = (0..PALETTE_SLOTS)
        .map(|i| palette.slot(i).to_triplet())
        .collect();

    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let root = root.dyn_into::<HtmlElement>()?;
        for ((_, property), value) in SLOTS.iter().zip(&triplets) {
            root.style().set_property(property, value)?;
        }
    }

    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"name".into(), &name.into())?;
    for ((key, _), value) in SLOTS.iter().zip(&triplets) {
        js_sys::Reflect::set(&detail, &(*key).into(), &value.as_str().into())?;
    }
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(THEME_EVENT, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_core::Rgb;

    fn strings(a: &str, b: &str, c: &str) -> [String; PALETTE_SLOTS] {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    #[test]
    fn palette_from_well_formed_strings() {
        let p = palette_from_strings(&strings("1 2 3", " 4 5 6 ", "7 8 9"), &Palette::default());
        assert_eq!(p.colors(), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)]);
    }

    #[test]
    fn malformed_slots_keep_last_known_colors() {
        let last = Palette::from_name("solar").unwrap();
        let p = palette_from_strings(&strings("1 2 3", "", "nope"), &last);
        assert_eq!(p.slot(0), Rgb::new(1, 2, 3));
        assert_eq!(p.slot(1), last.slot(1));
        assert_eq!(p.slot(2), last.slot(2));
    }
}
