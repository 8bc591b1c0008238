//! Visit description for time-budget accounting.

use serde::{Deserialize, Serialize};

use crate::{EtcError, Filter};

/// Ordered filters and their exposure times (seconds) for one visit of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSpec {
    filters: Vec<Filter>,
    exptimes: Vec<f64>,
}

impl VisitSpec {
    /// Creates a new visit, validating that every filter has an exposure time.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::LengthMismatch`] if the lengths differ and
    /// [`EtcError::InvalidExposureTime`] for a negative or non-finite exposure.
    pub fn new(filters: Vec<Filter>, exptimes: Vec<f64>) -> Result<Self, EtcError> {
        if filters.len() != exptimes.len() {
            return Err(EtcError::LengthMismatch {
                filters: filters.len(),
                exptimes: exptimes.len(),
            });
        }
        if let Some(&bad) = exptimes.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(EtcError::InvalidExposureTime(bad));
        }
        Ok(Self { filters, exptimes })
    }

    /// Creates a visit from band strings, expanding each into its letters.
    ///
    /// `["griz"]` and `["g", "r", "i", "z"]` describe the same four-filter visit.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::UnsupportedFilterBand`] for unknown letters and
    /// [`EtcError::LengthMismatch`] if the expanded filter count differs from
    /// the number of exposure times.
    pub fn parse<S: AsRef<str>>(bands: &[S], exptimes: &[f64]) -> Result<Self, EtcError> {
        let mut filters = Vec::with_capacity(exptimes.len());
        for band in bands {
            filters.extend(Filter::parse_sequence(band.as_ref())?);
        }
        Self::new(filters, exptimes.to_vec())
    }

    /// Returns the filters in observing order.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the exposure times in seconds.
    #[must_use]
    pub fn exptimes(&self) -> &[f64] {
        &self.exptimes
    }

    /// Returns the number of exposures in the visit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the visit has no exposures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates over `(filter, exptime)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Filter, f64)> + '_ {
        self.filters.iter().copied().zip(self.exptimes.iter().copied())
    }

    /// Returns the unweighted sum of exposure times in seconds.
    #[must_use]
    pub fn total_exptime(&self) -> f64 {
        self.exptimes.iter().sum()
    }
}

impl std::fmt::Display for VisitSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(filter, exptime)| format!("{filter}:{exptime}s"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
