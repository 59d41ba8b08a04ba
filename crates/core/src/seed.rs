//! Reproducible description of a rendered scene.
//!
//! A [`Seed`] captures everything needed to regenerate a still frame of the
//! particle field: theme, viewport, config overrides, PRNG seed, number of
//! simulated frames and where the pointer sat. Identical seeds render
//! bit-identical images.

use crate::error::ConstellationError;
use crate::palette::Palette;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub theme: String,
    pub width: u32,
    pub height: u32,
    /// Config overrides; missing keys use the field defaults.
    #[serde(default = "empty_object")]
    pub config: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
    /// Surface-local pointer position held for every frame, if any.
    #[serde(default)]
    pub pointer: Option<[f64; 2]>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Seed {
    /// A seed with no config overrides, no pointer and zero frames.
    pub fn new(theme: &str, width: u32, height: u32, seed: u64) -> Self {
        Self {
            theme: theme.to_string(),
            width,
            height,
            config: empty_object(),
            seed,
            frames: 0,
            pointer: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Checks that the seed can be rendered: non-zero dimensions, a known
    /// theme, and an object (or absent) config.
    pub fn validate(&self) -> Result<(), ConstellationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConstellationError::InvalidDimensions);
        }
        Palette::from_name(&self.theme)?;
        if !self.config.is_object() && !self.config.is_null() {
            return Err(ConstellationError::InvalidConfig(
                "config must be a JSON object".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConstellationError> {
        serde_json::to_string_pretty(self).map_err(|e| ConstellationError::Io(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ConstellationError> {
        serde_json::from_str(json)
            .map_err(|e| ConstellationError::InvalidConfig(format!("bad seed file: {e}")))
    }
}
