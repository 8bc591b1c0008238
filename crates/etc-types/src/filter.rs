//! Survey filter bands and their photometric constants.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::EtcError;

/// One of the six optical survey bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Ultraviolet band.
    U,
    /// Green band.
    G,
    /// Red band.
    R,
    /// Near-infrared band.
    I,
    /// Infrared band.
    Z,
    /// Far-red y band.
    Y,
}

impl Filter {
    /// Number of survey bands.
    pub const COUNT: usize = 6;

    /// Returns the band letter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::U => "u",
            Self::G => "g",
            Self::R => "r",
            Self::I => "i",
            Self::Z => "z",
            Self::Y => "y",
        }
    }

    /// Returns the position of the band in `ugrizy` order.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::U => 0,
            Self::G => 1,
            Self::R => 2,
            Self::I => 3,
            Self::Z => 4,
            Self::Y => 5,
        }
    }

    /// Returns all bands in `ugrizy` order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::U, Self::G, Self::R, Self::I, Self::Z, Self::Y]
    }

    /// Expands a string of band letters (e.g. `"griz"`) into filters.
    ///
    /// Whitespace and commas between letters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::UnsupportedFilterBand`] for any other character.
    pub fn parse_sequence(bands: &str) -> Result<Vec<Self>, EtcError> {
        bands
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Self::from_char(c).ok_or_else(|| EtcError::UnsupportedFilterBand(c.into())))
            .collect()
    }

    const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'u' => Some(Self::U),
            'g' => Some(Self::G),
            'r' => Some(Self::R),
            'i' => Some(Self::I),
            'z' => Some(Self::Z),
            'y' => Some(Self::Y),
            _ => None,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = EtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| EtcError::UnsupportedFilterBand(s.to_string()))
            }
            _ => Err(EtcError::UnsupportedFilterBand(s.to_string())),
        }
    }
}

/// Sky brightness and seeing used for bright-twilight observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwilightConditions {
    /// Twilight seeing FWHM in arcseconds.
    pub fwhm: f64,
    /// Median twilight sky brightness in mag/arcsec².
    pub m_sky: f64,
}

/// Photometric constants for a single band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConstants {
    /// The band these constants describe.
    filter: Filter,
    /// System throughput constant `Cm`.
    cm: f64,
    /// Asymptotic readnoise correction `dCm_inf`.
    dcm_inf: f64,
    /// Photometric zeropoint.
    zeropoint: f64,
    /// Dark-sky seeing FWHM in arcseconds.
    fwhm_dark: f64,
    /// Dark-sky brightness in mag/arcsec².
    m_darksky: f64,
    /// Atmospheric extinction in mag/airmass.
    k_atm: f64,
    /// Twilight overrides, absent for bands without a twilight survey.
    #[serde(default)]
    twilight: Option<TwilightConditions>,
}

impl FilterConstants {
    /// Creates a new set of band constants.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        filter: Filter,
        cm: f64,
        dcm_inf: f64,
        zeropoint: f64,
        fwhm_dark: f64,
        m_darksky: f64,
        k_atm: f64,
        twilight: Option<TwilightConditions>,
    ) -> Self {
        Self {
            filter,
            cm,
            dcm_inf,
            zeropoint,
            fwhm_dark,
            m_darksky,
            k_atm,
            twilight,
        }
    }

    /// Returns the band.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Returns the system throughput constant `Cm`.
    #[must_use]
    pub const fn cm(&self) -> f64 {
        self.cm
    }

    /// Returns the asymptotic readnoise correction `dCm_inf`.
    #[must_use]
    pub const fn dcm_inf(&self) -> f64 {
        self.dcm_inf
    }

    /// Returns the photometric zeropoint.
    #[must_use]
    pub const fn zeropoint(&self) -> f64 {
        self.zeropoint
    }

    /// Returns the dark-sky seeing FWHM in arcseconds.
    #[must_use]
    pub const fn fwhm_dark(&self) -> f64 {
        self.fwhm_dark
    }

    /// Returns the dark-sky brightness in mag/arcsec².
    #[must_use]
    pub const fn m_darksky(&self) -> f64 {
        self.m_darksky
    }

    /// Returns the extinction coefficient in mag/airmass.
    #[must_use]
    pub const fn k_atm(&self) -> f64 {
        self.k_atm
    }

    /// Returns the twilight overrides, if this band has any.
    #[must_use]
    pub const fn twilight(&self) -> Option<&TwilightConditions> {
        self.twilight.as_ref()
    }

    /// Returns true if twilight sky brightness and seeing are tabulated.
    #[must_use]
    pub const fn supports_twilight(&self) -> bool {
        self.twilight.is_some()
    }
}
