//! A single particle and the per-particle physics.

use crate::config::FieldConfig;
use constellation_core::{DVec2, Palette, RandomSource, Rgba, Viewport};

/// One drifting dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Intrinsic velocity the particle relaxes back to.
    pub drift: DVec2,
    pub radius: f64,
    pub color: Rgba,
}

impl Particle {
    /// Spawns a particle uniformly over `viewport`, starting at its base drift.
    ///
    /// Draw order from `rng` is fixed (x, y, drift x, drift y, radius, color)
    /// so a seed always reproduces the same field.
    pub fn spawn(
        viewport: Viewport,
        palette: &Palette,
        config: &FieldConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let size = viewport.size();
        let position = DVec2::new(rng.next_f64() * size.x, rng.next_f64() * size.y);
        let drift = DVec2::new(
            rng.next_range(-config.max_drift, config.max_drift),
            rng.next_range(-config.max_drift, config.max_drift),
        );
        let radius = rng.next_range(config.min_radius, config.max_radius);
        let color = palette.choose(rng).with_alpha(config.particle_alpha);
        Self {
            position,
            velocity: drift,
            drift,
            radius,
            color,
        }
    }

    /// Advances one frame: friction, relax toward drift, integrate, wrap,
    /// then apply the pointer impulse for the next frame.
    ///
    /// Friction damps only the pointer-induced excursion `velocity - drift`,
    /// so with no pointer the gap to drift shrinks by
    /// `friction * (1 - relax)` every frame and velocity settles on drift.
    pub fn step(&mut self, viewport: Viewport, pointer: DVec2, config: &FieldConfig) {
        self.velocity = self.drift + (self.velocity - self.drift) * config.friction;
        self.velocity += (self.drift - self.velocity) * config.relax;
        self.position += self.velocity;

        let size = viewport.size();
        self.position = DVec2::new(
            wrap_axis(self.position.x, size.x),
            wrap_axis(self.position.y, size.y),
        );

        self.velocity += pointer_impulse(pointer - self.position, config);
    }
}

/// Toroidal wrap onto `[0, extent]`: below 0 reenters at `extent`, beyond
/// `extent` reenters at 0. A non-finite coordinate is reset to 0.
pub fn wrap_axis(value: f64, extent: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Velocity change caused by the pointer, given `offset = pointer - particle`.
///
/// Two zones inside `magnet_radius`: an outer ring pulling toward the pointer
/// with strength falling linearly to zero at the radius, and an inner core
/// (`d <= inner_radius`) pushing away at constant strength. Distances below
/// `force_epsilon` produce no force, so a pointer sitting exactly on a
/// particle never divides by zero.
pub fn pointer_impulse(offset: DVec2, config: &FieldConfig) -> DVec2 {
    let distance = offset.length();
    if !distance.is_finite()
        || distance < config.force_epsilon
        || distance >= config.magnet_radius
    {
        return DVec2::ZERO;
    }
    let direction = offset / distance;
    if distance > config.inner_radius {
        let falloff = (config.magnet_radius - distance) / config.magnet_radius;
        direction * falloff * config.attract_gain
    } else {
        -direction * config.repel_gain
    }
}
