//! PNG output for a [`Raster`].
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on this crate without pulling in the `image` crate.

use constellation_core::{ConstellationError, Rgb};
use std::path::Path;

use crate::pixel::Raster;

/// Writes the raster as a PNG image.
///
/// With a `background` the image is flattened onto that color and fully
/// opaque; without one the alpha channel is kept as drawn.
///
/// Returns `ConstellationError::Io` on write failure.
pub fn write_png(
    raster: &Raster,
    background: Option<Rgb>,
    path: &Path,
) -> Result<(), ConstellationError> {
    let rgba = match background {
        Some(bg) => raster.flatten(bg),
        None => raster.data().to_vec(),
    };
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), rgba)
        .ok_or_else(|| ConstellationError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| ConstellationError::Io(e.to_string()))
}
