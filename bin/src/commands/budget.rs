//! Time budget command implementation.

use anyhow::{Context, Result};
use etc_lib::prelude::*;
use std::path::Path;

/// Print the time needed to observe a visit on `n_fields` fields.
pub(crate) fn budget(
    n_fields: u32,
    filters: &[String],
    exptimes: &[f64],
    overheads: Option<&Path>,
) -> Result<()> {
    let overheads = match overheads {
        Some(path) => Overheads::from_path(path)
            .with_context(|| format!("Failed to read overheads from {}", path.display()))?,
        None => *Overheads::global(),
    };
    let visit = VisitSpec::parse(filters, exptimes)?;
    let estimator = TimeBudgetEstimator::new(overheads);
    let budget = estimator.estimate(n_fields, &visit)?;

    println!("Visit: {visit}");
    println!();
    println!("{}", TimeBudgetEstimator::format_budget(&budget));
    println!(
        "Per field: {:.3} hr, overheads {:.0}%",
        budget.hours_per_field(),
        budget.overhead_fraction() * 100.0
    );

    Ok(())
}
