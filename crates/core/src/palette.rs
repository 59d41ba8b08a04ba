//! Theme palettes: an ordered set of (normally three) colors.
//!
//! A palette has a fixed number of slots ([`PALETTE_SLOTS`]: primary,
//! secondary, accent). Palettes with fewer colors are tolerated: any missing
//! slot resolves to the first color, so consumers never index out of range.

use crate::color::Rgb;
use crate::error::ConstellationError;
use crate::prng::RandomSource;
use log::warn;

/// Number of color slots a theme provides.
pub const PALETTE_SLOTS: usize = 3;

/// Built-in themes, in picker order. The first is the default.
const THEMES: &[(&str, [Rgb; PALETTE_SLOTS])] = &[
    (
        "Nebula",
        [Rgb::new(139, 92, 246), Rgb::new(217, 70, 239), Rgb::new(6, 182, 212)],
    ),
    (
        "Emerald",
        [Rgb::new(16, 185, 129), Rgb::new(20, 184, 166), Rgb::new(132, 204, 22)],
    ),
    (
        "Supernova",
        [Rgb::new(244, 63, 94), Rgb::new(249, 115, 22), Rgb::new(245, 158, 11)],
    ),
    (
        "Deep Space",
        [Rgb::new(59, 130, 246), Rgb::new(99, 102, 241), Rgb::new(14, 165, 233)],
    ),
    (
        "Aurora",
        [Rgb::new(79, 70, 229), Rgb::new(147, 51, 234), Rgb::new(244, 63, 94)],
    ),
    (
        "Solar",
        [Rgb::new(245, 158, 11), Rgb::new(234, 88, 12), Rgb::new(251, 191, 36)],
    ),
];

/// An immutable, non-empty ordered list of theme colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Creates a palette from a list of colors. Requires at least one color.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, ConstellationError> {
        if colors.is_empty() {
            return Err(ConstellationError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Parses `"R G B"` triplets strictly. Any malformed entry is an error.
    pub fn from_triplets(triplets: &[&str]) -> Result<Self, ConstellationError> {
        let colors = triplets
            .iter()
            .map(|t| Rgb::from_triplet(t))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Parses `"R G B"` triplets, replacing every missing or malformed slot
    /// with the same slot of `last_known`.
    ///
    /// Never fails: a theme change carrying garbage must not break the page.
    pub fn from_triplets_or(triplets: &[&str], last_known: &Palette) -> Self {
        let colors = (0..PALETTE_SLOTS)
            .map(|slot| match triplets.get(slot).map(|t| Rgb::from_triplet(t)) {
                Some(Ok(color)) => color,
                Some(Err(e)) => {
                    warn!("theme slot {slot} unparsable ({e}), keeping previous color");
                    last_known.slot(slot)
                }
                None => {
                    warn!("theme slot {slot} missing, keeping previous color");
                    last_known.slot(slot)
                }
            })
            .collect();
        Self { colors }
    }

    /// Looks up a built-in theme by name.
    ///
    /// Matching ignores case, spaces, dashes and underscores, so
    /// `"deep-space"`, `"DeepSpace"` and `"Deep Space"` are the same theme.
    pub fn from_name(name: &str) -> Result<Self, ConstellationError> {
        let wanted = normalize_name(name);
        THEMES
            .iter()
            .find(|(theme, _)| normalize_name(theme) == wanted)
            .map(|(_, colors)| Self {
                colors: colors.to_vec(),
            })
            .ok_or_else(|| ConstellationError::UnknownTheme(name.to_string()))
    }

    /// Names of all built-in themes, in picker order.
    pub fn list_names() -> Vec<&'static str> {
        THEMES.iter().map(|(name, _)| *name).collect()
    }

    /// Number of colors actually provided.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Color for `slot`; slots beyond the provided colors fall back to the first.
    pub fn slot(&self, slot: usize) -> Rgb {
        self.colors.get(slot).copied().unwrap_or(self.colors[0])
    }

    pub fn primary(&self) -> Rgb {
        self.slot(0)
    }

    /// Picks one of the [`PALETTE_SLOTS`] slots uniformly at random.
    pub fn choose(&self, rng: &mut dyn RandomSource) -> Rgb {
        self.slot(rng.next_index(PALETTE_SLOTS))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: THEMES[0].1.to_vec(),
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
