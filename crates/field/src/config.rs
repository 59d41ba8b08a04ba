//! Tunable constants of the particle field.
//!
//! None of these values are load-bearing for correctness; they were tuned by
//! eye. The invariants (count formula, wrap, drift convergence, guarded
//! forces) hold for any configuration that passes [`FieldConfig::validate`].

use constellation_core::params::{param_bool, param_f64, param_rgb, param_usize};
use constellation_core::{ConstellationError, Rgb};
use serde_json::{json, Value};

const DEFAULT_PX_PER_PARTICLE: f64 = 10.0;
const DEFAULT_MAX_PARTICLES: usize = 160;
const DEFAULT_MAX_DRIFT: f64 = 0.75;
const DEFAULT_MIN_RADIUS: f64 = 1.0;
const DEFAULT_MAX_RADIUS: f64 = 3.0;
const DEFAULT_PARTICLE_ALPHA: f64 = 0.7;
const DEFAULT_FRICTION: f64 = 0.96;
const DEFAULT_RELAX: f64 = 0.02;
const DEFAULT_MAGNET_RADIUS: f64 = 200.0;
const DEFAULT_INNER_RADIUS: f64 = 60.0;
const DEFAULT_ATTRACT_GAIN: f64 = 0.5;
const DEFAULT_REPEL_GAIN: f64 = 1.2;
const DEFAULT_FORCE_EPSILON: f64 = 1e-6;
const DEFAULT_LINK_DISTANCE: f64 = 120.0;
const DEFAULT_LINK_ALPHA: f64 = 0.1;
const DEFAULT_LINK_WIDTH: f64 = 0.5;
const DEFAULT_GLOW_RADIUS: f64 = 150.0;
const DEFAULT_GLOW_BLUR: f64 = 12.0;
const DEFAULT_POINTER_LINK_DISTANCE: f64 = 100.0;
const DEFAULT_POINTER_LINK_ALPHA: f64 = 0.2;

/// Simulation and render parameters for a [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Viewport pixels per particle (K in `min(floor(W / K), MAX)`).
    pub px_per_particle: f64,
    /// Particle count ceiling (MAX). Bounds the O(n²) link pass.
    pub max_particles: usize,
    /// Base drift is sampled per axis from `[-max_drift, max_drift)`.
    pub max_drift: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Alpha applied to theme colors when drawing particles.
    pub particle_alpha: f64,
    /// Per-frame multiplier on the pointer-induced excursion
    /// `velocity - drift`; the base drift itself is not damped.
    pub friction: f64,
    /// Fraction of the gap to base drift closed each frame.
    pub relax: f64,
    /// Pointer influence radius.
    pub magnet_radius: f64,
    /// Below this distance the pointer repels instead of attracting.
    pub inner_radius: f64,
    pub attract_gain: f64,
    pub repel_gain: f64,
    /// Pointer distances below this produce no force.
    pub force_epsilon: f64,
    pub link_distance: f64,
    /// Alpha of a link between coincident particles.
    pub link_alpha: f64,
    pub link_width: f64,
    pub link_color: Rgb,
    /// Tint links with the palette's primary color instead of `link_color`.
    pub theme_links: bool,
    pub glow_radius: f64,
    pub glow_blur: f64,
    pub pointer_links: bool,
    pub pointer_link_distance: f64,
    pub pointer_link_alpha: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            px_per_particle: DEFAULT_PX_PER_PARTICLE,
            max_particles: DEFAULT_MAX_PARTICLES,
            max_drift: DEFAULT_MAX_DRIFT,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            particle_alpha: DEFAULT_PARTICLE_ALPHA,
            friction: DEFAULT_FRICTION,
            relax: DEFAULT_RELAX,
            magnet_radius: DEFAULT_MAGNET_RADIUS,
            inner_radius: DEFAULT_INNER_RADIUS,
            attract_gain: DEFAULT_ATTRACT_GAIN,
            repel_gain: DEFAULT_REPEL_GAIN,
            force_epsilon: DEFAULT_FORCE_EPSILON,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            link_color: Rgb::WHITE,
            theme_links: false,
            glow_radius: DEFAULT_GLOW_RADIUS,
            glow_blur: DEFAULT_GLOW_BLUR,
            pointer_links: true,
            pointer_link_distance: DEFAULT_POINTER_LINK_DISTANCE,
            pointer_link_alpha: DEFAULT_POINTER_LINK_ALPHA,
        }
    }
}

impl FieldConfig {
    /// Builds a config from a JSON object. Missing or mistyped keys keep
    /// their defaults. The result is not validated.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            px_per_particle: param_f64(params, "px_per_particle", d.px_per_particle),
            max_particles: param_usize(params, "max_particles", d.max_particles),
            max_drift: param_f64(params, "max_drift", d.max_drift),
            min_radius: param_f64(params, "min_radius", d.min_radius),
            max_radius: param_f64(params, "max_radius", d.max_radius),
            particle_alpha: param_f64(params, "particle_alpha", d.particle_alpha),
            friction: param_f64(params, "friction", d.friction),
            relax: param_f64(params, "relax", d.relax),
            magnet_radius: param_f64(params, "magnet_radius", d.magnet_radius),
            inner_radius: param_f64(params, "inner_radius", d.inner_radius),
            attract_gain: param_f64(params, "attract_gain", d.attract_gain),
            repel_gain: param_f64(params, "repel_gain", d.repel_gain),
            force_epsilon: param_f64(params, "force_epsilon", d.force_epsilon),
            link_distance: param_f64(params, "link_distance", d.link_distance),
            link_alpha: param_f64(params, "link_alpha", d.link_alpha),
            link_width: param_f64(params, "link_width", d.link_width),
            link_color: param_rgb(params, "link_color", d.link_color),
            theme_links: param_bool(params, "theme_links", d.theme_links),
            glow_radius: param_f64(params, "glow_radius", d.glow_radius),
            glow_blur: param_f64(params, "glow_blur", d.glow_blur),
            pointer_links: param_bool(params, "pointer_links", d.pointer_links),
            pointer_link_distance: param_f64(
                params,
                "pointer_link_distance",
                d.pointer_link_distance,
            ),
            pointer_link_alpha: param_f64(params, "pointer_link_alpha", d.pointer_link_alpha),
        }
    }

    /// Rejects values that would break the field's invariants.
    pub fn validate(&self) -> Result<(), ConstellationError> {
        let finite = [
            ("px_per_particle", self.px_per_particle),
            ("max_drift", self.max_drift),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("particle_alpha", self.particle_alpha),
            ("friction", self.friction),
            ("relax", self.relax),
            ("magnet_radius", self.magnet_radius),
            ("inner_radius", self.inner_radius),
            ("attract_gain", self.attract_gain),
            ("repel_gain", self.repel_gain),
            ("force_epsilon", self.force_epsilon),
            ("link_distance", self.link_distance),
            ("link_alpha", self.link_alpha),
            ("link_width", self.link_width),
            ("glow_radius", self.glow_radius),
            ("glow_blur", self.glow_blur),
            ("pointer_link_distance", self.pointer_link_distance),
            ("pointer_link_alpha", self.pointer_link_alpha),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(invalid(format!(
                "{name} must be finite and non-negative, got {value}"
            )));
        }
        if self.px_per_particle == 0.0 {
            return Err(invalid("px_per_particle must be positive".into()));
        }
        if self.min_radius == 0.0 || self.min_radius > self.max_radius {
            return Err(invalid(format!(
                "radius range [{}, {}] must be positive and ordered",
                self.min_radius, self.max_radius
            )));
        }
        if self.friction > 1.0 || self.relax > 1.0 {
            return Err(invalid("friction and relax must lie in [0, 1]".into()));
        }
        if self.inner_radius > self.magnet_radius {
            return Err(invalid(format!(
                "inner_radius {} exceeds magnet_radius {}",
                self.inner_radius, self.magnet_radius
            )));
        }
        Ok(())
    }

    /// Current values as a JSON object, keyed like [`from_json`](Self::from_json).
    pub fn params(&self) -> Value {
        json!({
            "px_per_particle": self.px_per_particle,
            "max_particles": self.max_particles,
            "max_drift": self.max_drift,
            "min_radius": self.min_radius,
            "max_radius": self.max_radius,
            "particle_alpha": self.particle_alpha,
            "friction": self.friction,
            "relax": self.relax,
            "magnet_radius": self.magnet_radius,
            "inner_radius": self.inner_radius,
            "attract_gain": self.attract_gain,
            "repel_gain": self.repel_gain,
            "force_epsilon": self.force_epsilon,
            "link_distance": self.link_distance,
            "link_alpha": self.link_alpha,
            "link_width": self.link_width,
            "link_color": self.link_color.to_triplet(),
            "theme_links": self.theme_links,
            "glow_radius": self.glow_radius,
            "glow_blur": self.glow_blur,
            "pointer_links": self.pointer_links,
            "pointer_link_distance": self.pointer_link_distance,
            "pointer_link_alpha": self.pointer_link_alpha,
        })
    }

    /// Type, default and description of every key.
    pub fn param_schema() -> Value {
        let num = |default: f64, description: &str| {
            json!({"type": "number", "default": default, "description": description})
        };
        let flag = |default: bool, description: &str| {
            json!({"type": "boolean", "default": default, "description": description})
        };
        json!({
            "px_per_particle": num(DEFAULT_PX_PER_PARTICLE, "Viewport pixels per particle"),
            "max_particles": {
                "type": "integer",
                "default": DEFAULT_MAX_PARTICLES,
                "description": "Particle count ceiling"
            },
            "max_drift": num(DEFAULT_MAX_DRIFT, "Largest base drift speed per axis"),
            "min_radius": num(DEFAULT_MIN_RADIUS, "Smallest particle radius"),
            "max_radius": num(DEFAULT_MAX_RADIUS, "Largest particle radius (exclusive)"),
            "particle_alpha": num(DEFAULT_PARTICLE_ALPHA, "Particle fill alpha"),
            "friction": num(DEFAULT_FRICTION, "Per-frame velocity multiplier"),
            "relax": num(DEFAULT_RELAX, "Per-frame pull back toward base drift"),
            "magnet_radius": num(DEFAULT_MAGNET_RADIUS, "Pointer influence radius"),
            "inner_radius": num(DEFAULT_INNER_RADIUS, "Pointer repulsion radius"),
            "attract_gain": num(DEFAULT_ATTRACT_GAIN, "Attraction impulse gain"),
            "repel_gain": num(DEFAULT_REPEL_GAIN, "Repulsion impulse gain"),
            "force_epsilon": num(DEFAULT_FORCE_EPSILON, "Distance below which no force applies"),
            "link_distance": num(DEFAULT_LINK_DISTANCE, "Max distance for particle links"),
            "link_alpha": num(DEFAULT_LINK_ALPHA, "Alpha of the shortest links"),
            "link_width": num(DEFAULT_LINK_WIDTH, "Link stroke width"),
            "link_color": {
                "type": "color",
                "default": Rgb::WHITE.to_triplet(),
                "description": "Neutral link color as an \"R G B\" triplet"
            },
            "theme_links": flag(false, "Tint links with the theme's primary color"),
            "glow_radius": num(DEFAULT_GLOW_RADIUS, "Pointer distance under which particles glow"),
            "glow_blur": num(DEFAULT_GLOW_BLUR, "Glow blur radius"),
            "pointer_links": flag(true, "Draw links from nearby particles to the pointer"),
            "pointer_link_distance": num(DEFAULT_POINTER_LINK_DISTANCE, "Max pointer link distance"),
            "pointer_link_alpha": num(DEFAULT_POINTER_LINK_ALPHA, "Alpha of the shortest pointer links"),
        })
    }
}

fn invalid(msg: String) -> ConstellationError {
    ConstellationError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        FieldConfig::default().validate().unwrap();
    }

    #[test]
    fn from_empty_json_is_default() {
        assert_eq!(FieldConfig::from_json(&json!({})), FieldConfig::default());
    }

    #[test]
    fn from_json_overrides_given_keys() {
        let cfg = FieldConfig::from_json(&json!({
            "friction": 0.95,
            "max_particles": 140,
            "link_color": "100 116 139",
            "pointer_links": false,
        }));
        assert_eq!(cfg.friction, 0.95);
        assert_eq!(cfg.max_particles, 140);
        assert_eq!(cfg.link_color, Rgb::new(100, 116, 139));
        assert!(!cfg.pointer_links);
        assert_eq!(cfg.relax, DEFAULT_RELAX);
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let mut cfg = FieldConfig::default();
        cfg.magnet_radius = 180.0;
        cfg.theme_links = true;
        assert_eq!(FieldConfig::from_json(&cfg.params()), cfg);
    }

    #[test]
    fn schema_covers_every_param() {
        let schema = FieldConfig::param_schema();
        let params = FieldConfig::default().params();
        for key in params.as_object().unwrap().keys() {
            let entry = schema.get(key).unwrap_or_else(|| panic!("schema missing {key}"));
            assert!(entry.get("type").is_some(), "{key} missing type");
            assert!(entry.get("default").is_some(), "{key} missing default");
            assert!(entry.get("description").is_some(), "{key} missing description");
        }
    }

    // -- Validation --

    #[test]
    fn rejects_non_finite_values() {
        let cfg = FieldConfig {
            friction: f64::NAN,
            ..FieldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_px_per_particle() {
        let cfg = FieldConfig {
            px_per_particle: 0.0,
            ..FieldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let cfg = FieldConfig {
            min_radius: 4.0,
            max_radius: 2.0,
            ..FieldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_friction_above_one() {
        let cfg = FieldConfig {
            friction: 1.5,
            ..FieldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inner_radius_beyond_magnet() {
        let cfg = FieldConfig {
            inner_radius: 250.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConstellationError::InvalidConfig(_))
        ));
    }
}
