//! [`Surface`] over an HTML canvas 2D context.

use constellation_core::{DVec2, Glow, Rgba, Surface, Viewport};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the canvas's 2D context. Returns `Ok(None)` when the browser
    /// has no 2D context for this canvas.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let Some(ctx) = canvas.get_context("2d")? else {
            return Ok(None);
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Some(Self { canvas, ctx }))
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn origin(&self) -> DVec2 {
        let rect = self.canvas.get_bounding_client_rect();
        DVec2::new(rect.left(), rect.top())
    }

    fn clear(&mut self) {
        let size = self.viewport().size();
        self.ctx.clear_rect(0.0, 0.0, size.x, size.y);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, glow: Option<Glow>) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        if let Some(glow) = glow {
            self.ctx.set_shadow_blur(glow.blur);
            self.ctx.set_shadow_color(&glow.color.to_css());
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }
}
