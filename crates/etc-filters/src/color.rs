//! V-band to Pan-STARRS1 color transformations for asteroids.
//!
//! Offsets are V − passband colors from Veres et al. (2015), with solar colors
//! for reference. "Mean" averages the S- and C-types; "NEO" weights the
//! complexes by their occurrence among near-Earth objects.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

use etc_types::{EtcError, Result};
use serde::Deserialize;

/// The color-term JSON embedded at compile time.
const COLOR_TERMS_JSON: &str = include_str!("../data/color_terms.json");

/// Global color-transform table.
static COLORS: OnceLock<ColorTransforms> = OnceLock::new();

/// Pan-STARRS1 passbands with tabulated color terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ps1Band {
    /// gP1.
    G,
    /// rP1.
    R,
    /// iP1.
    I,
    /// zP1.
    Z,
    /// yP1.
    Y,
    /// Wide wP1.
    W,
}

impl Ps1Band {
    /// Number of tabulated passbands.
    pub const COUNT: usize = 6;

    /// Returns all passbands in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::G, Self::R, Self::I, Self::Z, Self::Y, Self::W]
    }

    /// Returns the passband name as used in the published table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::G => "g",
            Self::R => "r",
            Self::I => "i",
            Self::Z => "z",
            Self::Y => "Y",
            Self::W => "w",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::G => 0,
            Self::R => 1,
            Self::I => 2,
            Self::Z => 3,
            Self::Y => 4,
            Self::W => 5,
        }
    }
}

impl std::fmt::Display for Ps1Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ps1Band {
    type Err = EtcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" => Ok(Self::G),
            "r" => Ok(Self::R),
            "i" => Ok(Self::I),
            "z" => Ok(Self::Z),
            "y" => Ok(Self::Y),
            "w" => Ok(Self::W),
            _ => Err(EtcError::UnsupportedFilterBand(s.to_string())),
        }
    }
}

/// Asteroid taxonomic class used to pick color terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Taxonomy {
    /// Solar colors.
    Solar,
    /// Average of the S- and C-types.
    #[default]
    Mean,
    /// S-type.
    S,
    /// C-type.
    C,
    /// Q-type.
    Q,
    /// X-type.
    X,
    /// D-type.
    D,
    /// Occurrence-weighted NEO average.
    Neo,
}

impl Taxonomy {
    /// Number of tabulated taxonomies.
    pub const COUNT: usize = 8;

    /// Returns all taxonomies in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Solar,
            Self::Mean,
            Self::S,
            Self::C,
            Self::Q,
            Self::X,
            Self::D,
            Self::Neo,
        ]
    }

    const fn index(self) -> usize {
        match self {
            Self::Solar => 0,
            Self::Mean => 1,
            Self::S => 2,
            Self::C => 3,
            Self::Q => 4,
            Self::X => 5,
            Self::D => 6,
            Self::Neo => 7,
        }
    }

    /// Returns the taxonomy key used in the table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Mean => "mean",
            Self::S => "s",
            Self::C => "c",
            Self::Q => "q",
            Self::X => "x",
            Self::D => "d",
            Self::Neo => "neo",
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = EtcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solar" | "sun" => Ok(Self::Solar),
            "mean" => Ok(Self::Mean),
            "s" => Ok(Self::S),
            "c" => Ok(Self::C),
            "q" => Ok(Self::Q),
            "x" => Ok(Self::X),
            "d" => Ok(Self::D),
            "neo" => Ok(Self::Neo),
            _ => Err(EtcError::UnsupportedTaxonomy(s.to_string())),
        }
    }
}

/// Raw JSON structure for deserialization.
#[derive(Debug, Deserialize)]
struct RawColorTerms {
    passbands: Vec<String>,
    taxonomies: HashMap<String, Vec<f64>>,
}

/// V − passband color offsets per taxonomy.
#[derive(Debug, Clone)]
pub struct ColorTransforms {
    /// Offsets indexed by taxonomy, then by passband.
    offsets: [[f64; Ps1Band::COUNT]; Taxonomy::COUNT],
}

impl ColorTransforms {
    /// Returns the global color-transform table.
    #[must_use]
    pub fn global() -> &'static Self {
        COLORS.get_or_init(|| Self::from_json(COLOR_TERMS_JSON).expect("Invalid color_terms.json"))
    }

    /// Creates a color-transform table from a JSON string.
    ///
    /// Every taxonomy needs one offset per listed passband, and every passband
    /// must be listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, a name is unknown, or the
    /// table is incomplete.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawColorTerms = serde_json::from_str(json)?;
        let bands = raw
            .passbands
            .iter()
            .map(|b| b.parse::<Ps1Band>())
            .collect::<Result<Vec<_>>>()?;

        let mut offsets = [[f64::NAN; Ps1Band::COUNT]; Taxonomy::COUNT];
        for (name, row) in raw.taxonomies {
            let taxonomy: Taxonomy = name.parse()?;
            if row.len() != bands.len() {
                return Err(EtcError::LengthMismatch {
                    filters: bands.len(),
                    exptimes: row.len(),
                });
            }
            for (band, offset) in bands.iter().zip(row) {
                offsets[taxonomy.index()][band.index()] = offset;
            }
        }

        for taxonomy in Taxonomy::all() {
            for band in Ps1Band::all() {
                if offsets[taxonomy.index()][band.index()].is_nan() {
                    return Err(EtcError::Json(<serde_json::Error as serde::de::Error>::custom(
                        format!("no {band} offset for taxonomy '{taxonomy}'"),
                    )));
                }
            }
        }

        Ok(Self { offsets })
    }

    /// Returns the V − passband offset for a taxonomy.
    #[must_use]
    pub const fn offset(&self, band: Ps1Band, taxonomy: Taxonomy) -> f64 {
        self.offsets[taxonomy.index()][band.index()]
    }

    /// Transforms a V magnitude into `band` for the given taxonomy.
    #[must_use]
    pub const fn transform(&self, mag_v: f64, band: Ps1Band, taxonomy: Taxonomy) -> f64 {
        mag_v - self.offset(band, taxonomy)
    }

    /// Transforms a V magnitude using string names for passband and taxonomy.
    ///
    /// Returns `None` when either name is not tabulated.
    #[must_use]
    pub fn transform_v_mag(&self, mag_v: f64, passband: &str, taxonomy: &str) -> Option<f64> {
        let band = passband.parse().ok()?;
        let taxonomy = taxonomy.parse().ok()?;
        Some(self.transform(mag_v, band, taxonomy))
    }
}
