//! Conversion between exposure time and 5σ limiting magnitude.
//!
//! The model follows the closed-form survey throughput relations: depth grows
//! with `1.25 log10(t/30)`, is offset by sky brightness, seeing and
//! extinction, and carries a readnoise correction `dCm` that vanishes for
//! long exposures.

use etc_filters::FilterTable;
use etc_types::{Filter, FilterConstants};
use serde::{Deserialize, Serialize};

/// Reference exposure time in seconds the band constants are quoted for.
pub const REFERENCE_EXPTIME: f64 = 30.0;

/// Seeing FWHM (arcsec) the band constants are normalized to.
const REFERENCE_FWHM: f64 = 0.7;

/// Sky brightness (mag/arcsec²) the band constants are normalized to.
const REFERENCE_SKY: f64 = 21.0;

/// Sky background regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyBackground {
    /// Dark sky.
    #[default]
    Dark,
    /// Bright twilight sky; only tabulated for some bands.
    Twilight,
}

impl SkyBackground {
    /// Returns the regime name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Twilight => "twilight",
        }
    }
}

impl std::fmt::Display for SkyBackground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Airmass and sky regime for a single exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservingConditions {
    /// Airmass, 1.0 at zenith.
    pub airmass: f64,
    /// Sky background regime.
    pub sky: SkyBackground,
}

impl Default for ObservingConditions {
    fn default() -> Self {
        Self::dark()
    }
}

impl ObservingConditions {
    /// Dark sky at zenith.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            airmass: 1.0,
            sky: SkyBackground::Dark,
        }
    }

    /// Twilight sky at zenith.
    #[must_use]
    pub const fn twilight() -> Self {
        Self {
            airmass: 1.0,
            sky: SkyBackground::Twilight,
        }
    }

    /// Returns these conditions at a different airmass.
    #[must_use]
    pub const fn with_airmass(self, airmass: f64) -> Self {
        Self { airmass, ..self }
    }

    /// Returns true for twilight conditions.
    #[must_use]
    pub const fn is_twilight(&self) -> bool {
        matches!(self.sky, SkyBackground::Twilight)
    }
}

/// Sky brightness and seeing chosen for a band under given conditions.
#[derive(Debug, Clone, Copy)]
struct SkyModel {
    m_sky: f64,
    fwhm: f64,
}

impl SkyModel {
    /// Returns `None` for twilight in bands without twilight constants.
    fn select(constants: &FilterConstants, sky: SkyBackground) -> Option<Self> {
        match sky {
            SkyBackground::Dark => Some(Self {
                m_sky: constants.m_darksky(),
                fwhm: constants.fwhm_dark(),
            }),
            SkyBackground::Twilight => constants.twilight().map(|t| Self {
                m_sky: t.m_sky,
                fwhm: t.fwhm,
            }),
        }
    }

    /// Terms shared by both directions of the conversion.
    fn offset(self, constants: &FilterConstants, airmass: f64) -> f64 {
        0.5 * (self.m_sky - REFERENCE_SKY) + 2.5 * (REFERENCE_FWHM / self.fwhm).log10()
            - constants.k_atm() * (airmass - 1.0)
    }
}

/// Converts between exposure time and limiting magnitude using a filter table.
#[derive(Debug, Clone, Copy)]
pub struct DepthCalculator<'a> {
    table: &'a FilterTable,
}

impl DepthCalculator<'static> {
    /// Returns a calculator backed by the embedded filter table.
    #[must_use]
    pub fn global() -> Self {
        Self::new(FilterTable::global())
    }
}

impl<'a> DepthCalculator<'a> {
    /// Creates a calculator over the given table.
    #[must_use]
    pub const fn new(table: &'a FilterTable) -> Self {
        Self { table }
    }

    /// Returns the underlying filter table.
    #[must_use]
    pub const fn table(&self) -> &'a FilterTable {
        self.table
    }

    /// Returns true if `filter` can be evaluated under twilight conditions.
    #[must_use]
    pub fn supports_twilight(&self, filter: Filter) -> bool {
        self.table.get(filter).supports_twilight()
    }

    /// Exposure time in seconds needed to reach the 5σ depth `m5`.
    ///
    /// The readnoise correction is taken as zero, which is accurate for
    /// exposures near 30 s. Returns NaN for twilight in bands without
    /// twilight constants.
    #[must_use]
    pub fn exposure_time_for_depth(
        &self,
        m5: f64,
        filter: Filter,
        conditions: &ObservingConditions,
    ) -> f64 {
        let constants = self.table.get(filter);
        let Some(sky) = SkyModel::select(constants, conditions.sky) else {
            tracing::trace!(%filter, "no twilight constants, exposure time undefined");
            return f64::NAN;
        };

        let excess = m5 - constants.cm() - sky.offset(constants, conditions.airmass);
        REFERENCE_EXPTIME * 10f64.powf(excess / 1.25)
    }

    /// 5σ limiting magnitude reached in `exptime` seconds.
    ///
    /// Includes the readnoise correction. The background scale is always
    /// relative to the dark sky. Non-positive exposure times and twilight in
    /// bands without twilight constants yield NaN.
    #[must_use]
    pub fn depth_for_exposure_time(
        &self,
        exptime: f64,
        filter: Filter,
        conditions: &ObservingConditions,
    ) -> f64 {
        let constants = self.table.get(filter);
        let Some(sky) = SkyModel::select(constants, conditions.sky) else {
            tracing::trace!(%filter, "no twilight constants, depth undefined");
            return f64::NAN;
        };

        let dcm = readnoise_correction(constants, sky.m_sky, exptime);
        constants.cm()
            + dcm
            + sky.offset(constants, conditions.airmass)
            + 1.25 * (exptime / REFERENCE_EXPTIME).log10()
    }

    /// Depths for a series of exposure times as `(exptime, m5)` rows.
    #[must_use]
    pub fn depth_table(
        &self,
        filter: Filter,
        conditions: &ObservingConditions,
        exptimes: &[f64],
    ) -> Vec<(f64, f64)> {
        exptimes
            .iter()
            .map(|&t| (t, self.depth_for_exposure_time(t, filter, conditions)))
            .collect()
    }
}

/// `dCm` for an exposure of `exptime` seconds against a sky of `m_sky`.
fn readnoise_correction(constants: &FilterConstants, m_sky: f64, exptime: f64) -> f64 {
    let dcm_inf = constants.dcm_inf();
    let tscale =
        exptime / REFERENCE_EXPTIME * 10f64.powf(-0.4 * (m_sky - constants.m_darksky()));
    dcm_inf - 1.25 * (1.0 + (10f64.powf(0.8 * dcm_inf) - 1.0) / tscale).log10()
}

/// Exposure time needed to reach `m5`, using the embedded filter table.
#[must_use]
pub fn exposure_time_for_depth(m5: f64, filter: Filter, conditions: &ObservingConditions) -> f64 {
    DepthCalculator::global().exposure_time_for_depth(m5, filter, conditions)
}

/// Depth reached in `exptime` seconds, using the embedded filter table.
#[must_use]
pub fn depth_for_exposure_time(
    exptime: f64,
    filter: Filter,
    conditions: &ObservingConditions,
) -> f64 {
    DepthCalculator::global().depth_for_exposure_time(exptime, filter, conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REFERENCE_M5: [f64; 6] = [23.70, 24.97, 24.52, 24.13, 23.56, 22.55];

    #[test]
    fn test_reference_exposure_times() {
        let expected = [30.0954, 30.0582, 30.2748, 30.2765, 30.1380, 29.9607];
        let conditions = ObservingConditions::default();
        for ((filter, m5), t) in Filter::all().iter().zip(REFERENCE_M5).zip(expected) {
            let exptime = exposure_time_for_depth(m5, *filter, &conditions);
            assert_relative_eq!(exptime, t, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_higher_airmass_needs_longer_exposure() {
        let expected = [35.7850, 32.4761, 31.7601, 31.4127, 30.9253, 31.8972];
        let conditions = ObservingConditions::dark().with_airmass(1.2);
        for ((filter, m5), t) in Filter::all().iter().zip(REFERENCE_M5).zip(expected) {
            let exptime = exposure_time_for_depth(m5, *filter, &conditions);
            assert_relative_eq!(exptime, t, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_twilight_reference_exposure_times() {
        let conditions = ObservingConditions::twilight();
        let cases = [(Filter::R, 442.178), (Filter::I, 541.125), (Filter::Z, 473.698)];
        for (filter, t) in cases {
            let m5 = REFERENCE_M5[filter.index()];
            let exptime = exposure_time_for_depth(m5, filter, &conditions);
            assert_relative_eq!(exptime, t, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_twilight_unsupported_is_nan() {
        for airmass in [1.0, 1.2, 2.0] {
            let conditions = ObservingConditions::twilight().with_airmass(airmass);
            for filter in [Filter::U, Filter::Y] {
                assert!(exposure_time_for_depth(23.0, filter, &conditions).is_nan());
                assert!(depth_for_exposure_time(30.0, filter, &conditions).is_nan());
            }
        }
        let calc = DepthCalculator::global();
        assert!(!calc.supports_twilight(Filter::U));
        assert!(calc.supports_twilight(Filter::I));
    }

    #[test]
    fn test_reference_depths() {
        let expected = [23.69828, 24.96895, 24.51505, 24.12502, 23.55751, 22.55071];
        let conditions = ObservingConditions::default();
        for (filter, m5) in Filter::all().iter().zip(expected) {
            let depth = depth_for_exposure_time(30.0, *filter, &conditions);
            assert_relative_eq!(depth, m5, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_twilight_depths() {
        let conditions = ObservingConditions::twilight();
        let cases = [(Filter::R, 23.0910), (Filter::I, 22.5838), (Filter::Z, 22.0777)];
        for (filter, m5) in cases {
            let depth = depth_for_exposure_time(30.0, filter, &conditions);
            assert_relative_eq!(depth, m5, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_depth_exposure_round_trip() {
        let calc = DepthCalculator::global();
        for airmass in [1.0, 1.2] {
            let conditions = ObservingConditions::dark().with_airmass(airmass);
            for filter in Filter::all() {
                let m5 = calc.depth_for_exposure_time(30.0, *filter, &conditions);
                let exptime = calc.exposure_time_for_depth(m5, *filter, &conditions);
                assert_relative_eq!(exptime, 30.0, max_relative = 1e-3);
            }
        }
    }

    #[test]
    fn test_round_trip_drifts_away_from_reference_exposure() {
        let calc = DepthCalculator::global();
        let conditions = ObservingConditions::default();
        let m5 = calc.depth_for_exposure_time(60.0, Filter::U, &conditions);
        let exptime = calc.exposure_time_for_depth(m5, Filter::U, &conditions);
        // dCm is positive beyond 30 s and ignored by the forward direction
        assert!(exptime > 60.0);
        assert!(exptime < 100.0);
    }

    #[test]
    fn test_non_positive_exposure_is_nan() {
        let conditions = ObservingConditions::default();
        assert!(depth_for_exposure_time(-5.0, Filter::G, &conditions).is_nan());
    }

    #[test]
    fn test_depth_table_monotonic() {
        let rows = DepthCalculator::global().depth_table(
            Filter::R,
            &ObservingConditions::default(),
            &[15.0, 30.0, 60.0, 120.0],
        );
        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|w| w[1].1 > w[0].1));
        assert_eq!(rows[1].0, 30.0);
    }
}
