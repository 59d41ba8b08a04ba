//! CPU rasterization of draw calls into an RGBA8 buffer.
//!
//! [`Raster`] implements [`Surface`] with straight (non-premultiplied) alpha
//! and source-over compositing. Shapes get one-pixel anti-aliasing from
//! analytic coverage; glows are a quadratic falloff ring around the circle.
//! This module has no feature gate so it can be used without the `image`
//! crate.

use constellation_core::{ConstellationError, DVec2, Glow, Rgb, Rgba, Surface, Viewport};

/// Peak alpha of a glow ring relative to its color's alpha.
const GLOW_STRENGTH: f64 = 0.5;

/// An RGBA8 pixel buffer that can be drawn on like a canvas.
#[derive(Debug, Clone)]
pub struct Raster {
    viewport: Viewport,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a transparent raster.
    ///
    /// Returns `ConstellationError::InvalidDimensions` for a zero dimension
    /// or if the buffer size overflows `usize`.
    pub fn new(viewport: Viewport) -> Result<Self, ConstellationError> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ConstellationError::InvalidDimensions);
        }
        let len = buffer_len(viewport).ok_or(ConstellationError::InvalidDimensions)?;
        Ok(Self {
            viewport,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (x, y), or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Composites the raster over an opaque background, producing a fully
    /// opaque buffer.
    pub fn flatten(&self, background: Rgb) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let a = f64::from(px[3]) / 255.0;
                let mix = |src: u8, dst: u8| {
                    (f64::from(src) * a + f64::from(dst) * (1.0 - a)).round() as u8
                };
                [
                    mix(px[0], background.r),
                    mix(px[1], background.g),
                    mix(px[2], background.b),
                    255,
                ]
            })
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.viewport.width as usize + x as usize) * 4
    }

    /// Source-over blend of `color` at `coverage` (0..=1) onto pixel (x, y).
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f64) {
        let sa = color.a * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = self.index(x, y);
        let da = f64::from(self.pixels[i + 3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let channel = |src: u8, dst: u8| {
            let c = (f64::from(src) * sa + f64::from(dst) * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        self.pixels[i] = channel(color.r, self.pixels[i]);
        self.pixels[i + 1] = channel(color.g, self.pixels[i + 1]);
        self.pixels[i + 2] = channel(color.b, self.pixels[i + 2]);
        self.pixels[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Visits every pixel whose center lies within `reach` of the box
    /// spanned by `min`..`max`, passing the pixel center.
    fn for_each_pixel_near(
        &mut self,
        min: DVec2,
        max: DVec2,
        reach: f64,
        mut f: impl FnMut(&mut Self, u32, u32, DVec2),
    ) {
        if self.pixels.is_empty() {
            return;
        }
        let w = f64::from(self.viewport.width);
        let h = f64::from(self.viewport.height);
        let x0 = (min.x - reach).floor().clamp(0.0, w - 1.0) as u32;
        let x1 = (max.x + reach).ceil().clamp(0.0, w - 1.0) as u32;
        let y0 = (min.y - reach).floor().clamp(0.0, h - 1.0) as u32;
        let y1 = (max.y + reach).ceil().clamp(0.0, h - 1.0) as u32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                f(self, x, y, center);
            }
        }
    }
}

impl Surface for Raster {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pixels = vec![0; buffer_len(viewport).unwrap_or(0)];
        if self.pixels.is_empty() {
            self.viewport = Viewport::default();
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        if !(from.is_finite() && to.is_finite()) {
            return;
        }
        let half = width.max(0.0) / 2.0;
        self.for_each_pixel_near(from.min(to), from.max(to), half + 1.0, |raster, x, y, c| {
            let coverage = half + 0.5 - distance_to_segment(c, from, to);
            raster.blend(x, y, color, coverage);
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, glow: Option<Glow>) {
        if !center.is_finite() || !(radius > 0.0) {
            return;
        }
        if let Some(glow) = glow.filter(|g| g.blur > 0.0) {
            let outer = radius + glow.blur;
            self.for_each_pixel_near(center, center, outer + 1.0, |raster, x, y, c| {
                let d = c.distance(center);
                if d > radius && d < outer {
                    let t = 1.0 - (d - radius) / glow.blur;
                    raster.blend(x, y, glow.color, GLOW_STRENGTH * t * t);
                }
            });
        }
        self.for_each_pixel_near(center, center, radius + 1.0, |raster, x, y, c| {
            let coverage = radius + 0.5 - c.distance(center);
            raster.blend(x, y, color, coverage);
        });
    }
}

fn buffer_len(viewport: Viewport) -> Option<usize> {
    (viewport.width as usize)
        .checked_mul(viewport.height as usize)?
        .checked_mul(4)
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
