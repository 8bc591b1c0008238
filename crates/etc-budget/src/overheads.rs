//! Telescope overhead configuration.

use std::path::Path;
use std::sync::OnceLock;

use etc_types::{EtcError, Result};
use serde::{Deserialize, Serialize};

/// Embedded JSON with the default overheads.
const OVERHEADS_JSON: &str = include_str!("../data/overheads.json");

/// Static default overheads.
static OVERHEADS: OnceLock<Overheads> = OnceLock::new();

/// Per-visit overheads in seconds, plus the u/y filter rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overheads {
    /// Readout between consecutive exposures.
    pub between_exposures_s: f64,
    /// Slew to the first field of a visit.
    pub first_slew_s: f64,
    /// Settle time after a slew. Tabulated but not charged.
    pub slew_settle_s: f64,
    /// Filter change.
    pub filter_change_s: f64,
    /// Nights per lunation with the u filter mounted instead of y.
    pub u_band_nights: u32,
    /// Nights per lunation.
    pub lunation_nights: u32,
}

impl Overheads {
    /// Returns the default overheads.
    ///
    /// This lazily parses the embedded JSON on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        OVERHEADS.get_or_init(|| Self::from_json(OVERHEADS_JSON).expect("Invalid overheads.json"))
    }

    /// Parses overheads from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, or
    /// [`EtcError::InvalidOverheads`] if the values fail [`Overheads::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let overheads: Self = serde_json::from_str(json)?;
        overheads.validate()?;
        Ok(overheads)
    }

    /// Checks that every overhead is finite and non-negative and that the
    /// u-band nights fit in a non-empty lunation.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::InvalidOverheads`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("between_exposures_s", self.between_exposures_s),
            ("first_slew_s", self.first_slew_s),
            ("slew_settle_s", self.slew_settle_s),
            ("filter_change_s", self.filter_change_s),
        ];
        if let Some((name, value)) = durations
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(EtcError::InvalidOverheads(format!(
                "{name} must be a finite, non-negative number of seconds, got {value}"
            )));
        }
        if self.lunation_nights == 0 {
            return Err(EtcError::InvalidOverheads(
                "lunation_nights must be at least 1".to_string(),
            ));
        }
        if self.u_band_nights > self.lunation_nights {
            return Err(EtcError::InvalidOverheads(format!(
                "u_band_nights ({}) exceeds lunation_nights ({})",
                self.u_band_nights, self.lunation_nights
            )));
        }
        Ok(())
    }

    /// Reads overheads from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fraction of nights the u filter is mounted.
    #[must_use]
    pub fn u_band_fraction(&self) -> f64 {
        f64::from(self.u_band_nights) / f64::from(self.lunation_nights)
    }

    /// Fraction of nights the y filter is mounted.
    #[must_use]
    pub fn y_band_fraction(&self) -> f64 {
        1.0 - self.u_band_fraction()
    }
}

impl Default for Overheads {
    fn default() -> Self {
        *Self::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_default_overheads() {
        let overheads = Overheads::default();
        assert_eq!(overheads.between_exposures_s, 7.0);
        assert_eq!(overheads.first_slew_s, 30.0);
        assert_eq!(overheads.slew_settle_s, 10.0);
        assert_eq!(overheads.filter_change_s, 120.0);
        assert_relative_eq!(overheads.u_band_fraction(), 14.0 / 30.0);
        assert_relative_eq!(overheads.y_band_fraction(), 16.0 / 30.0);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"between_exposures_s": 2.0, "first_slew_s": 15.0, "slew_settle_s": 5.0,
                "filter_change_s": 90.0, "u_band_nights": 10, "lunation_nights": 30}}"#
        )
        .unwrap();

        let overheads = Overheads::from_path(file.path()).unwrap();
        assert_eq!(overheads.filter_change_s, 90.0);
        assert_relative_eq!(overheads.u_band_fraction(), 1.0 / 3.0);
    }

    #[test]
    fn test_from_path_rejects_invalid_values() {
        let cases = [
            ("between_exposures_s", -1.0, 14, 30),
            ("u_band_nights", 7.0, 31, 30),
            ("lunation_nights", 7.0, 0, 0),
        ];
        for (name, between, u_nights, nights) in cases {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"{{"between_exposures_s": {between}, "first_slew_s": 30.0, "slew_settle_s": 10.0,
                    "filter_change_s": 120.0, "u_band_nights": {u_nights}, "lunation_nights": {nights}}}"#
            )
            .unwrap();

            match Overheads::from_path(file.path()) {
                Err(EtcError::InvalidOverheads(msg)) => assert!(msg.contains(name), "{msg}"),
                other => panic!("expected InvalidOverheads for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_zero_lunation() {
        let overheads = Overheads {
            lunation_nights: 0,
            ..Overheads::default()
        };
        assert!(matches!(
            overheads.validate(),
            Err(EtcError::InvalidOverheads(_))
        ));
        assert!(Overheads::default().validate().is_ok());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Overheads::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(EtcError::Io(_))));
    }
}
