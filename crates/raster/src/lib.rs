#![deny(unsafe_code)]
//! Offline rendering of the particle field.
//!
//! [`Raster`] is a software [`Surface`](constellation_core::Surface) that the
//! field draws into exactly as it would into a browser canvas. [`render_seed`]
//! replays a [`Seed`] into a raster; with the `png` feature the result can be
//! written to disk via [`snapshot::write_png`]. Both the CLI and the tests use
//! this crate to look at frames without a browser.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::Raster;

use constellation_core::{ConstellationError, DVec2, Palette, Seed, Xorshift64};
use constellation_field::{FieldConfig, ParticleField};
use log::debug;

/// Simulates `seed.frames` frames and renders the final state into a new
/// raster.
///
/// Returns `ConstellationError` if the seed fails validation (zero
/// dimensions, unknown theme, non-object config) or the config is out of
/// range.
pub fn render_seed(seed: &Seed) -> Result<Raster, ConstellationError> {
    let field = simulate_seed(seed)?;
    let mut raster = Raster::new(seed.viewport())?;
    field.render(&mut raster);
    Ok(raster)
}

/// Builds the field described by `seed` and steps it `seed.frames` times.
pub fn simulate_seed(seed: &Seed) -> Result<ParticleField, ConstellationError> {
    seed.validate()?;
    let palette = Palette::from_name(&seed.theme)?;
    let config = FieldConfig::from_json(&seed.config);
    let mut rng = Xorshift64::new(seed.seed);
    let mut field = ParticleField::new(seed.viewport(), palette, config, &mut rng)?;
    if let Some([x, y]) = seed.pointer {
        field.set_pointer(DVec2::new(x, y));
    }
    for _ in 0..seed.frames {
        field.step();
    }
    debug!(
        "simulated {} frames of {} particles (seed {})",
        seed.frames,
        field.particles().len(),
        seed.seed
    );
    Ok(field)
}
