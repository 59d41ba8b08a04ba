#![deny(unsafe_code)]
//! Browser bindings for the constellation particle background.
//!
//! [`mount_background`] wires the field to a `<canvas>`: the 2D context
//! becomes the drawing surface, `requestAnimationFrame` drives frames, and
//! window `mousemove`/`mouseout`/`resize`/`themeChanged` events feed the
//! animator. The returned [`Background`] removes everything on `unmount()`.

mod background;
mod canvas;
mod dom;
mod raf;
mod widgets;

pub use background::{mount_background, Background};
pub use canvas::CanvasSurface;
pub use raf::RafScheduler;
pub use widgets::{apply_theme, theme_names, validate_contact, RoleTyper};

use wasm_bindgen::prelude::*;

/// Installs the panic hook and console logger once per page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("constellation-wasm loaded");
}
