//! [`Scheduler`] backed by `window.requestAnimationFrame`.

use constellation_core::{FrameCallback, FrameHandle, Scheduler};
use log::error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for RafScheduler {
    /// The callback is handed to JS as a one-shot closure that frees itself
    /// after it runs. A cancelled callback is never freed.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let js = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self.window.request_animation_frame(js.unchecked_ref()) {
            Ok(id) => FrameHandle(u64::try_from(id).unwrap_or_default()),
            Err(e) => {
                error!("requestAnimationFrame failed: {e:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Ok(id) = i32::try_from(handle.0) {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                error!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }
}
