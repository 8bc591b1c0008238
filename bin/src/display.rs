//! Display utilities and argument parsing for the rubin-etc CLI.

use anyhow::{Context, Result};
use etc_lib::prelude::*;
#[cfg(feature = "fetch")]
use chrono::NaiveDate;
#[cfg(feature = "fetch")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "fetch")]
use std::time::Duration;

/// Parse a filter band argument.
pub(crate) fn parse_filter(band: &str) -> Result<Filter> {
    band.parse::<Filter>()
        .with_context(|| format!("Invalid filter: {band}. Valid options: u, g, r, i, z, y"))
}

/// Build observing conditions from the common CLI flags.
pub(crate) const fn conditions(airmass: f64, twilight: bool) -> ObservingConditions {
    let base = if twilight {
        ObservingConditions::twilight()
    } else {
        ObservingConditions::dark()
    };
    base.with_airmass(airmass)
}

/// Parse a date string in YYYY-MM-DD format.
#[cfg(feature = "fetch")]
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {s}. Expected YYYY-MM-DD"))
}

/// Format a magnitude or time value, showing `n/a` for undefined results.
pub(crate) fn format_value(value: f64, precision: usize) -> String {
    if value.is_finite() {
        format!("{value:.precision$}")
    } else {
        "n/a".to_string()
    }
}

/// Format an optional value, showing `-` when absent.
pub(crate) fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

/// Create a spinner for a remote query, hidden in quiet mode.
#[cfg(feature = "fetch")]
pub(crate) fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
