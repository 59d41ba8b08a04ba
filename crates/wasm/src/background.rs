//! The particle background as mounted on a page.

use crate::canvas::CanvasSurface;
use crate::dom::{self, EventListener, THEME_EVENT};
use crate::raf::RafScheduler;
use constellation_core::{DVec2, Palette, Surface, Viewport, Xorshift64};
use constellation_field::{Animator, AnimatorState, Environment, FieldConfig, PointerEvent};
use log::warn;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

/// Handle to a mounted background. Call [`Background::unmount`] (or let JS
/// free it) when the hosting component goes away.
#[wasm_bindgen]
pub struct Background {
    animator: Animator,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl Background {
    /// Stops the animation and removes every window listener. Idempotent.
    pub fn unmount(&mut self) {
        self.animator.unmount();
        self.listeners.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animator.state() == AnimatorState::Running
    }

    /// Frames rendered since mount.
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.animator.frames() as f64
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.animator
            .inspect(|field| field.particles().len())
            .unwrap_or(0)
    }
}

/// Mounts the particle background on the canvas with id `canvas_id`.
///
/// `config` is an optional JSON object of field overrides. A missing canvas
/// or 2D context gives an inert background; only bad config JSON or values
/// are errors.
#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(canvas_id: &str, config: Option<String>) -> Result<Background, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let config = match config {
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("invalid config JSON: {e}")))?;
            FieldConfig::from_json(&value)
        }
        None => FieldConfig::default(),
    };

    let palette = dom::palette_from_strings(&dom::css_theme_colors(&window), &Palette::default());
    let env = Environment::new(Rc::new(RafScheduler::new(window.clone())));
    let surface = canvas_surface(&window, canvas_id)?;
    let has_surface = surface.is_some();
    let rng = Box::new(Xorshift64::new(random_seed()));

    let animator = Animator::mount(&env, surface, palette.clone(), config, rng)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let listeners = if has_surface {
        attach_listeners(&window, &env, palette)?
    } else {
        Vec::new()
    };

    Ok(Background {
        animator,
        listeners,
    })
}

/// Sizes the canvas to the window and wraps its 2D context.
fn canvas_surface(window: &Window, canvas_id: &str) -> Result<Option<Box<dyn Surface>>, JsValue> {
    let canvas = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let Some(canvas) = canvas else {
        warn!("no canvas element #{canvas_id}");
        return Ok(None);
    };
    let Some(mut surface) = CanvasSurface::new(canvas)? else {
        return Ok(None);
    };
    surface.resize(window_viewport(window));
    Ok(Some(Box::new(surface)))
}

fn attach_listeners(
    window: &Window,
    env: &Environment,
    palette: Palette,
) -> Result<Vec<EventListener>, JsValue> {
    let target: &web_sys::EventTarget = window.as_ref();

    let pointer = env.pointer.clone();
    let on_move = EventListener::new(target, "mousemove", move |event| {
        if let Some(e) = event.dyn_ref::<MouseEvent>() {
            let client = DVec2::new(f64::from(e.client_x()), f64::from(e.client_y()));
            pointer.emit(&PointerEvent::Moved(client));
        }
    })?;

    let pointer = env.pointer.clone();
    let on_out = EventListener::new(target, "mouseout", move |event| {
        let left_window = event
            .dyn_ref::<MouseEvent>()
            .is_some_and(|e| e.related_target().is_none());
        if left_window {
            pointer.emit(&PointerEvent::Left);
        }
    })?;

    let resize = env.resize.clone();
    let resize_window = window.clone();
    let on_resize = EventListener::new(target, "resize", move |_| {
        resize.emit(&window_viewport(&resize_window));
    })?;

    let theme = env.theme.clone();
    let theme_window = window.clone();
    let mut last_known = palette;
    let on_theme = EventListener::new(target, THEME_EVENT, move |event| {
        let colors = dom::theme_colors_from_event(&theme_window, &event);
        last_known = dom::palette_from_strings(&colors, &last_known);
        theme.emit(&last_known);
    })?;

    Ok(vec![on_move, on_out, on_resize, on_theme])
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map_or(0, |v| v as u32)
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
