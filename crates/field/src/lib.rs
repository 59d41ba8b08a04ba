#![deny(unsafe_code)]
//! Pointer-reactive particle field.
//!
//! A [`ParticleField`] is a set of drifting dots on a toroidal viewport.
//! Each frame every particle is damped, relaxed toward its base drift,
//! moved, wrapped, and pushed by the pointer (attracted in an outer ring,
//! repelled in an inner core). Rendering draws faint links between nearby
//! pairs, optional links to the pointer, and the dots themselves with a glow
//! near the pointer.
//!
//! The [`Animator`] wraps a field in the mount/unmount lifecycle of a UI
//! component, driven by an injected scheduler and host signals.

pub mod animator;
pub mod config;
pub mod particle;

pub use animator::{Animator, AnimatorState, Environment, PointerEvent};
pub use config::FieldConfig;
pub use particle::{pointer_impulse, wrap_axis, Particle};

use constellation_core::{
    ConstellationError, DVec2, Glow, Palette, RandomSource, Rgb, Surface, Viewport,
};
use log::debug;

/// Pointer position meaning "no recent input": far outside every radius.
pub const POINTER_ABSENT: DVec2 = DVec2::new(-1.0e9, -1.0e9);

/// Number of particles for a viewport of the given width:
/// `min(floor(width / px_per_particle), max_particles)`.
pub fn particle_count(width: u32, config: &FieldConfig) -> usize {
    let by_width = (f64::from(width) / config.px_per_particle).floor();
    if by_width.is_finite() && by_width > 0.0 {
        (by_width as usize).min(config.max_particles)
    } else {
        0
    }
}

/// Alpha of the link between two particles `distance` apart.
///
/// Falls linearly from `link_alpha` at distance 0 to exactly 0 at
/// `link_distance`, and is 0 beyond it.
pub fn link_opacity(distance: f64, config: &FieldConfig) -> f64 {
    proximity_alpha(distance, config.link_distance, config.link_alpha)
}

/// Alpha of the link from a particle to the pointer `distance` away.
pub fn pointer_link_opacity(distance: f64, config: &FieldConfig) -> f64 {
    proximity_alpha(distance, config.pointer_link_distance, config.pointer_link_alpha)
}

fn proximity_alpha(distance: f64, threshold: f64, max_alpha: f64) -> f64 {
    if threshold <= 0.0 || !(distance <= threshold) {
        return 0.0;
    }
    (1.0 - distance / threshold) * max_alpha
}

/// The particle simulation: particles, viewport, palette and pointer.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    palette: Palette,
    particles: Vec<Particle>,
    pointer: DVec2,
}

impl ParticleField {
    /// Validates `config` and spawns a fresh field for `viewport`.
    pub fn new(
        viewport: Viewport,
        palette: Palette,
        config: FieldConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, ConstellationError> {
        config.validate()?;
        let mut field = Self {
            config,
            viewport,
            palette,
            particles: Vec::new(),
            pointer: POINTER_ABSENT,
        };
        field.reinitialize(rng);
        Ok(field)
    }

    /// Discards every particle and spawns a new set from the current
    /// viewport and palette.
    pub fn reinitialize(&mut self, rng: &mut dyn RandomSource) {
        let count = particle_count(self.viewport.width, &self.config);
        self.particles = (0..count)
            .map(|_| Particle::spawn(self.viewport, &self.palette, &self.config, rng))
            .collect();
        debug!(
            "particle field reinitialized: {count} particles for {}x{}",
            self.viewport.width, self.viewport.height
        );
    }

    /// Adopts a new viewport and regenerates the field.
    pub fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) {
        self.viewport = viewport;
        self.reinitialize(rng);
    }

    /// Adopts a new palette and regenerates the field.
    pub fn set_palette(&mut self, palette: Palette, rng: &mut dyn RandomSource) {
        self.palette = palette;
        self.reinitialize(rng);
    }

    /// Sets the pointer in surface-local coordinates.
    pub fn set_pointer(&mut self, pointer: DVec2) {
        self.pointer = if pointer.is_finite() {
            pointer
        } else {
            POINTER_ABSENT
        };
    }

    /// Forgets the pointer; particles decay back to pure drift.
    pub fn clear_pointer(&mut self) {
        self.pointer = POINTER_ABSENT;
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advances every particle by one frame.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step(self.viewport, self.pointer, &self.config);
        }
    }

    /// Draws the current state: clear, pair links, pointer links, particles.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        let cfg = &self.config;

        let link_rgb: Rgb = if cfg.theme_links {
            self.palette.primary()
        } else {
            cfg.link_color
        };
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let alpha = link_opacity(a.position.distance(b.position), cfg);
                if alpha > 0.0 {
                    surface.stroke_line(
                        a.position,
                        b.position,
                        link_rgb.with_alpha(alpha),
                        cfg.link_width,
                    );
                }
            }
        }

        if cfg.pointer_links {
            for p in &self.particles {
                let alpha = pointer_link_opacity(p.position.distance(self.pointer), cfg);
                if alpha > 0.0 {
                    surface.stroke_line(
                        p.position,
                        self.pointer,
                        p.color.rgb().with_alpha(alpha),
                        cfg.link_width,
                    );
                }
            }
        }

        for p in &self.particles {
            let glow = (p.position.distance(self.pointer) < cfg.glow_radius).then_some(Glow {
                color: p.color,
                blur: cfg.glow_blur,
            });
            surface.fill_circle(p.position, p.radius, p.color, glow);
        }
    }

    /// One full frame: step, then render.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.step();
        self.render(surface);
    }
}
