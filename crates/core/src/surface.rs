//! The 2D drawing surface the animator renders onto.
//!
//! [`Surface`] is the small set of immediate-mode operations the particle
//! field needs. Implementations: the browser canvas (wasm crate), the
//! software `Raster` (raster crate), and [`Recorder`] here, which captures
//! draw calls for tests.

use crate::color::Rgba;
use crate::viewport::Viewport;
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Soft shadow drawn behind a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    /// Shadow blur radius in pixels.
    pub blur: f64,
}

/// Immediate-mode 2D drawing target.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Resizes the backing store. Contents after a resize are unspecified.
    fn resize(&mut self, viewport: Viewport);

    /// Top-left corner of the surface in client (window) coordinates.
    ///
    /// Pointer events arrive in client coordinates and are translated by
    /// this offset into surface-local space.
    fn origin(&self) -> DVec2 {
        DVec2::ZERO
    }

    /// Clears every pixel to transparent.
    fn clear(&mut self);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, glow: Option<Glow>);
}

/// One captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
        glow: Option<Glow>,
    },
}

#[derive(Debug, Default)]
struct RecorderState {
    viewport: Viewport,
    origin: DVec2,
    commands: Vec<DrawCommand>,
    resizes: Vec<Viewport>,
}

/// A [`Surface`] that records draw calls instead of rasterizing them.
///
/// Clones share the same log, so a test can hand one clone to the animator
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    state: Rc<RefCell<RecorderState>>,
}

impl Recorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(RecorderState {
                viewport,
                ..RecorderState::default()
            })),
        }
    }

    /// Places the surface at `origin` in client coordinates.
    pub fn with_origin(self, origin: DVec2) -> Self {
        self.state.borrow_mut().origin = origin;
        self
    }

    /// Every command since creation.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.state.borrow().commands.clone()
    }

    /// Commands issued after the most recent `clear`.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        let state = self.state.borrow();
        let start = state
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        state.commands[start..].to_vec()
    }

    /// Number of `clear` calls, i.e. frames rendered.
    pub fn frames(&self) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|c| **c == DrawCommand::Clear)
            .count()
    }

    /// Viewports passed to `resize`, in order.
    pub fn resizes(&self) -> Vec<Viewport> {
        self.state.borrow().resizes.clone()
    }
}

impl Surface for Recorder {
    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        let mut state = self.state.borrow_mut();
        state.viewport = viewport;
        state.resizes.push(viewport);
    }

    fn origin(&self) -> DVec2 {
        self.state.borrow().origin
    }

    fn clear(&mut self) {
        self.state.borrow_mut().commands.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.state.borrow_mut().commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, glow: Option<Glow>) {
        self.state.borrow_mut().commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow,
        });
    }
}
