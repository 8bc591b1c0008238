//! Time-budget accounting for multi-field visits.

use std::sync::OnceLock;
use std::time::Duration;

use etc_types::{EtcError, Filter, Result, VisitSpec};
use serde::{Deserialize, Serialize};

use crate::overheads::Overheads;

/// Bands a six-filter visit can mount at once.
const MOUNTED_FILTERS: u32 = 5;

/// Static estimator instance.
static ESTIMATOR: OnceLock<TimeBudgetEstimator> = OnceLock::new();

/// Breakdown of the time needed to observe a visit over several fields.
///
/// Exposure and readout sums are per field; slew and filter-change sums are
/// per visit and get shared across all fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBudget {
    /// Exposure time per field in seconds.
    pub exposure_s: f64,
    /// Readout overhead per field in seconds.
    pub between_exposure_overhead_s: f64,
    /// Filter-change overhead for the visit in seconds.
    pub filter_change_overhead_s: f64,
    /// Initial slew overhead for the visit in seconds.
    pub first_slew_overhead_s: f64,
    /// Number of fields tiled.
    pub n_fields: u32,
    /// Total wall-clock time in hours.
    pub total_hours: f64,
}

impl TimeBudget {
    /// Returns the total time as a duration, or `None` if it does not fit one.
    #[must_use]
    pub fn total_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.total_hours * 3600.0).ok()
    }

    /// Returns the average time per field in hours.
    #[must_use]
    pub fn hours_per_field(&self) -> f64 {
        self.total_hours / f64::from(self.n_fields)
    }

    /// Returns the share of the total spent on overheads.
    #[must_use]
    pub fn overhead_fraction(&self) -> f64 {
        let exposure_hours = self.exposure_s * f64::from(self.n_fields) / 3600.0;
        1.0 - exposure_hours / self.total_hours
    }
}

/// Per-visit sums before amortization over fields.
#[derive(Debug, Clone, Copy)]
struct VisitSums {
    exposure_s: f64,
    between_exposures_s: f64,
    filter_change_s: f64,
}

/// Computes time budgets from a set of overheads.
#[derive(Debug, Clone)]
pub struct TimeBudgetEstimator {
    overheads: Overheads,
}

impl TimeBudgetEstimator {
    /// Creates an estimator with custom overheads.
    #[must_use]
    pub const fn new(overheads: Overheads) -> Self {
        Self { overheads }
    }

    /// Returns the global estimator using the default overheads.
    #[must_use]
    pub fn global() -> &'static Self {
        ESTIMATOR.get_or_init(|| Self::new(*Overheads::global()))
    }

    /// Returns the overheads in use.
    #[must_use]
    pub const fn overheads(&self) -> &Overheads {
        &self.overheads
    }

    /// Estimates the time to observe `visit` on each of `n_fields` fields.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::InvalidFieldCount`] if `n_fields` is zero and
    /// [`EtcError::InvalidOverheads`] if the overheads fail validation.
    pub fn estimate(&self, n_fields: u32, visit: &VisitSpec) -> Result<TimeBudget> {
        if n_fields == 0 {
            return Err(EtcError::InvalidFieldCount(n_fields));
        }
        self.overheads.validate()?;

        let sums = if visit.len() == Filter::COUNT {
            self.six_filter_sums(visit)
        } else {
            self.visit_sums(visit)
        };

        let fields = f64::from(n_fields);
        let first_slew_s = self.overheads.first_slew_s;
        let total_s = sums.exposure_s * fields
            + sums.between_exposures_s * fields
            + first_slew_s / fields
            + sums.filter_change_s / fields;

        let budget = TimeBudget {
            exposure_s: sums.exposure_s,
            between_exposure_overhead_s: sums.between_exposures_s,
            filter_change_overhead_s: sums.filter_change_s,
            first_slew_overhead_s: first_slew_s,
            n_fields,
            total_hours: total_s / 3600.0,
        };
        tracing::debug!(n_fields, %visit, total_hours = budget.total_hours, "time budget");
        Ok(budget)
    }

    /// Only five filters fit in the changer, so u and y share a slot.
    fn six_filter_sums(&self, visit: &VisitSpec) -> VisitSums {
        let u_fraction = self.overheads.u_band_fraction();
        let exposure_s = visit
            .iter()
            .map(|(filter, exptime)| match filter {
                Filter::U => exptime * u_fraction,
                Filter::Y => exptime * (1.0 - u_fraction),
                _ => exptime,
            })
            .sum();

        VisitSums {
            exposure_s,
            between_exposures_s: self.overheads.between_exposures_s
                * f64::from(MOUNTED_FILTERS - 1),
            filter_change_s: self.overheads.filter_change_s * f64::from(MOUNTED_FILTERS),
        }
    }

    /// Charges one readout and one filter change per exposure, the first included.
    fn visit_sums(&self, visit: &VisitSpec) -> VisitSums {
        let count = visit.len() as f64;
        let sums = VisitSums {
            exposure_s: visit.total_exptime(),
            between_exposures_s: self.overheads.between_exposures_s * count,
            filter_change_s: self.overheads.filter_change_s * count,
        };

        tracing::info!(
            exposure_s = format_args!("{:.0}", sums.exposure_s),
            filter_change_s = sums.filter_change_s,
            between_exposures_s = sums.between_exposures_s,
            "visit overheads"
        );
        sums
    }

    /// Formats a budget as a human-readable summary.
    #[must_use]
    pub fn format_budget(budget: &TimeBudget) -> String {
        format!(
            "Fields: {}\n\
             Exposure per field: {:.0}s\n\
             Readouts per field: {:.0}s\n\
             Filter changes: {:.0}s\n\
             First slew: {:.0}s\n\
             Total: {:.3} hr ({})",
            budget.n_fields,
            budget.exposure_s,
            budget.between_exposure_overhead_s,
            budget.filter_change_overhead_s,
            budget.first_slew_overhead_s,
            budget.total_hours,
            budget
                .total_duration()
                .map_or_else(|| "n/a".to_string(), Self::format_duration),
        )
    }

    /// Formats duration in human-readable form (e.g., "2h 30m", "45m").
    #[must_use]
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            if minutes > 0 {
                format!("{hours}h {minutes}m")
            } else {
                format!("{hours}h")
            }
        } else if minutes > 0 {
            if seconds > 0 && minutes < 10 {
                format!("{minutes}m {seconds}s")
            } else {
                format!("{minutes}m")
            }
        } else {
            format!("{seconds}s")
        }
    }
}

impl Default for TimeBudgetEstimator {
    fn default() -> Self {
        Self::new(Overheads::default())
    }
}

/// Hours needed to observe a visit on `n_fields` fields with default overheads.
///
/// Each entry of `filters` may hold several band letters: `["griz"]` is a
/// four-filter visit.
///
/// # Errors
///
/// Returns an error for unknown bands, mismatched lengths or zero fields.
pub fn time_budget<S: AsRef<str>>(n_fields: u32, filters: &[S], exptimes: &[f64]) -> Result<f64> {
    let visit = VisitSpec::parse(filters, exptimes)?;
    let budget = TimeBudgetEstimator::global().estimate(n_fields, &visit)?;
    Ok(budget.total_hours)
}
