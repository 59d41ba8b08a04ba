//! Viewport dimensions shared by surfaces, fields and resize events.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in CSS pixels.
///
/// Zero-sized viewports are valid: they produce an empty particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> DVec2 {
        DVec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// True when `p` lies in the closed rectangle `[0, width] x [0, height]`.
    pub fn contains(self, p: DVec2) -> bool {
        let size = self.size();
        (0.0..=size.x).contains(&p.x) && (0.0..=size.y).contains(&p.y)
    }
}
