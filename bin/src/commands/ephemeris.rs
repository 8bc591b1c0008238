//! Ephemeris query command implementation.

use anyhow::{Context, Result};
use etc_lib::prelude::*;

use crate::display::spinner;

const DATE_COLUMN: &str = "Date__(UT)__HR:MN";
const SUMMARY_COLUMNS: [&str; 4] = ["R.A.___(ICRF)", "DEC____(ICRF)", "APmag", "delta"];

/// Query a Horizons ephemeris around a close approach and summarize it.
pub(crate) async fn ephemeris(
    target: &str,
    jd: f64,
    days: i64,
    step: &str,
    quiet: bool,
) -> Result<()> {
    let request = EphemerisRequest {
        delta_days: days,
        step: step.to_string(),
        ..EphemerisRequest::new(target, jd)
    };
    let (start, stop) = request.window()?;

    let client = QueryClient::with_defaults().context("Failed to create HTTP client")?;
    let pb = spinner(format!("Querying Horizons for {target}"), quiet);
    let table = client
        .ephemeris(&request)
        .await
        .with_context(|| format!("Ephemeris query for {target} failed"))?;
    pb.finish_and_clear();

    let Some(table) = table else {
        println!("Horizons returned no ephemeris for {target}.");
        return Ok(());
    };

    println!("Target:         {}", table.target);
    println!("Close approach: {} UTC", table.close_approach.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Window:         {} to {}",
        start.format("%Y-%m-%d %H:%M"),
        stop.format("%Y-%m-%d %H:%M")
    );
    println!("Lines:          {}", table.len());
    println!("Columns:        {}", table.columns.len());

    let Some(nearest) = table.nearest_to_close_approach() else {
        return Ok(());
    };

    println!("\nNearest line to close approach ({:+.3} d):", nearest.time_to_ca);
    for column in std::iter::once(DATE_COLUMN).chain(SUMMARY_COLUMNS) {
        if let Some(value) = table.value(nearest, column) {
            println!("  {column:<20} {value}");
        }
    }

    Ok(())
}
