//! Filter parameter and color-transform tables for rubin-etc.
//!
//! This crate provides the per-band photometric constants consumed by every
//! calculation in the workspace, plus the asteroid color-term table used to
//! move V-band magnitudes into survey passbands.
//!
//! # Example
//!
//! ```
//! use etc_filters::FilterTable;
//! use etc_types::Filter;
//!
//! let table = FilterTable::global();
//! let r = table.get(Filter::R);
//! println!("r: Cm = {}, k_atm = {}", r.cm(), r.k_atm());
//! assert!(r.supports_twilight());
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod color;

pub use color::{ColorTransforms, Ps1Band, Taxonomy};

use std::sync::OnceLock;

use etc_types::{EtcError, Filter, FilterConstants, Result};
use serde::Deserialize;

/// The filter constants JSON embedded at compile time.
const FILTERS_JSON: &str = include_str!("../data/filters.json");

/// Global filter table instance.
static TABLE: OnceLock<FilterTable> = OnceLock::new();

/// Raw JSON structure for deserialization.
#[derive(Debug, Deserialize)]
struct RawFilterTable {
    filters: Vec<FilterConstants>,
}

/// Photometric constants for all six survey bands.
#[derive(Debug, Clone)]
pub struct FilterTable {
    /// Constants indexed by [`Filter::index`].
    constants: Vec<FilterConstants>,
}

impl FilterTable {
    /// Returns the global filter table.
    ///
    /// The table is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        TABLE.get_or_init(|| Self::from_json(FILTERS_JSON).expect("Invalid filters.json"))
    }

    /// Creates a filter table from a JSON document.
    ///
    /// Every band must appear exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a band is missing or repeated.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawFilterTable = serde_json::from_str(json)?;
        let mut slots: Vec<Option<FilterConstants>> = vec![None; Filter::COUNT];

        for constants in raw.filters {
            let slot = &mut slots[constants.filter().index()];
            if slot.is_some() {
                return Err(invalid_table(format!(
                    "band '{}' listed more than once",
                    constants.filter()
                )));
            }
            *slot = Some(constants);
        }

        let constants = slots
            .into_iter()
            .zip(Filter::all())
            .map(|(slot, filter)| {
                slot.ok_or_else(|| invalid_table(format!("band '{filter}' is missing")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { constants })
    }

    /// Returns the constants for a band.
    #[must_use]
    pub fn get(&self, filter: Filter) -> &FilterConstants {
        &self.constants[filter.index()]
    }

    /// Looks up a band by its letter (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::UnsupportedFilterBand`] for letters outside `ugrizy`.
    pub fn lookup(&self, band: &str) -> Result<&FilterConstants> {
        let filter: Filter = band.parse()?;
        Ok(self.get(filter))
    }

    /// Returns all band constants in `ugrizy` order.
    pub fn all(&self) -> impl Iterator<Item = &FilterConstants> {
        self.constants.iter()
    }

    /// Returns the bands that carry twilight overrides.
    pub fn twilight_bands(&self) -> impl Iterator<Item = Filter> + '_ {
        self.constants
            .iter()
            .filter(|c| c.supports_twilight())
            .map(FilterConstants::filter)
    }

    /// Returns the number of bands in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

fn invalid_table(msg: String) -> EtcError {
    EtcError::Json(<serde_json::Error as serde::de::Error>::custom(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        let table = FilterTable::global();
        assert_eq!(table.len(), 6);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_get_r_band() {
        let r = FilterTable::global().get(Filter::R);
        assert_eq!(r.filter(), Filter::R);
        assert_eq!(r.cm(), 24.6);
        assert_eq!(r.dcm_inf(), 0.04);
        assert_eq!(r.zeropoint(), 28.36);
        assert_eq!(r.fwhm_dark(), 0.83);
        assert_eq!(r.m_darksky(), 21.2);
        assert_eq!(r.k_atm(), 0.13);
        let twilight = r.twilight().expect("r has twilight data");
        assert_eq!(twilight.fwhm, 1.43);
        assert_eq!(twilight.m_sky, 19.47);
    }

    #[test]
    fn test_table_order() {
        let table = FilterTable::global();
        for (constants, filter) in table.all().zip(Filter::all()) {
            assert_eq!(constants.filter(), *filter);
        }
    }

    #[test]
    fn test_twilight_bands() {
        let bands: Vec<Filter> = FilterTable::global().twilight_bands().collect();
        assert_eq!(bands, vec![Filter::R, Filter::I, Filter::Z]);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let table = FilterTable::global();
        assert_eq!(table.lookup("Z").unwrap().filter(), Filter::Z);
        assert!(matches!(
            table.lookup("w"),
            Err(EtcError::UnsupportedFilterBand(_))
        ));
    }

    #[test]
    fn test_missing_band_rejected() {
        let json = r#"{"filters": [
            {"filter": "u", "cm": 1.0, "dcm_inf": 0.0, "zeropoint": 0.0,
             "fwhm_dark": 1.0, "m_darksky": 20.0, "k_atm": 0.1}
        ]}"#;
        let err = FilterTable::from_json(json).unwrap_err();
        assert!(err.to_string().contains("band 'g' is missing"));
    }

    #[test]
    fn test_duplicate_band_rejected() {
        let entry = r#"{"filter": "u", "cm": 1.0, "dcm_inf": 0.0, "zeropoint": 0.0,
             "fwhm_dark": 1.0, "m_darksky": 20.0, "k_atm": 0.1}"#;
        let json = format!(r#"{{"filters": [{entry}, {entry}]}}"#);
        assert!(FilterTable::from_json(&json).is_err());
    }
}
