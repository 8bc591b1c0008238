//! Benchmark workloads for rubin-etc.

use etc_lib::prelude::*;

/// Close-approach response used by the parsing benchmarks.
pub const CAD_RESPONSE: &str = include_str!("../../crates/etc-fetch/tests/fixtures/cad.json");

/// Horizons response used by the parsing benchmarks.
pub const HORIZONS_RESPONSE: &str =
    include_str!("../../crates/etc-fetch/tests/fixtures/horizons.txt");

/// A visit sequence observed on a number of fields.
#[derive(Debug, Clone)]
pub struct BudgetWorkload {
    /// Label used in benchmark ids.
    pub name: &'static str,
    /// Band letters of the visit.
    pub filters: &'static str,
    /// Exposure time per band in seconds.
    pub exptime: f64,
    /// Number of fields.
    pub n_fields: u32,
}

impl BudgetWorkload {
    /// Builds the visit for this workload.
    ///
    /// # Errors
    ///
    /// Returns an error if `filters` holds an unknown band.
    pub fn visit(&self) -> Result<VisitSpec> {
        let n = Filter::parse_sequence(self.filters)?.len();
        VisitSpec::parse(&[self.filters], &vec![self.exptime; n])
    }
}

/// Typical follow-up visits, from a single field to a wide tiling.
#[must_use]
pub fn budget_workloads() -> Vec<BudgetWorkload> {
    vec![
        BudgetWorkload {
            name: "griz-1",
            filters: "griz",
            exptime: 30.0,
            n_fields: 1,
        },
        BudgetWorkload {
            name: "gri-10",
            filters: "gri",
            exptime: 60.0,
            n_fields: 10,
        },
        BudgetWorkload {
            name: "ugrizy-50",
            filters: "ugrizy",
            exptime: 30.0,
            n_fields: 50,
        },
    ]
}

/// Exposure times in seconds spanning snaps to long integrations.
#[must_use]
pub fn exptime_grid(n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| 10f64.powf(1.0 + 2.0 * i as f64 / (n - 1) as f64))
        .collect()
}

/// Rates of motion in deg/day from slow main-belt to fast close approachers.
#[must_use]
pub fn velocity_grid(n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n).map(|i| 50.0 * i as f64 / (n - 1) as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workloads_build() {
        for workload in budget_workloads() {
            let visit = workload.visit().unwrap();
            assert_eq!(visit.len(), workload.filters.len());
        }
    }

    #[test]
    fn test_exptime_grid_bounds() {
        let grid = exptime_grid(5);
        assert_eq!(grid.len(), 5);
        assert!((grid[0] - 10.0).abs() < 1e-9);
        assert!((grid[4] - 1000.0).abs() < 1e-9);
    }
}
