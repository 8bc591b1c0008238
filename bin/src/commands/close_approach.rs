//! Close-approach query command implementation.

use anyhow::{Context, Result};
use etc_lib::prelude::*;

use crate::display::{format_optional, parse_date, spinner};

/// Lunar distance in au.
const LUNAR_DISTANCE_AU: f64 = 0.002_569_55;

/// Query and list close approaches matching the given limits.
pub(crate) async fn close_approach(
    max_distance: &str,
    max_h: f64,
    start: Option<&str>,
    end: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let mut query = CloseApproachQuery {
        max_distance: max_distance.to_string(),
        max_h,
        ..CloseApproachQuery::default()
    };
    if let Some(s) = start {
        query.date_min = parse_date(s)?;
    }
    if let Some(e) = end {
        query.date_max = parse_date(e)?;
    }
    if query.date_min > query.date_max {
        anyhow::bail!(
            "Start date {} is after end date {}",
            query.date_min,
            query.date_max
        );
    }

    let client = QueryClient::with_defaults().context("Failed to create HTTP client")?;
    let pb = spinner(
        format!("Querying close approaches {} to {}", query.date_min, query.date_max),
        quiet,
    );
    let approaches = client
        .close_approaches(&query)
        .await
        .context("Close-approach query failed")?;
    pb.finish_and_clear();

    if approaches.is_empty() {
        println!("No close approaches found.");
        return Ok(());
    }

    println!(
        "{:<14} {:<18} {:>15} {:>8} {:>8} {:>6} {:>9}",
        "DESIGNATION", "DATE (TDB)", "JD", "DIST_LD", "V_REL", "H", "DIAM_KM"
    );
    println!("{}", "-".repeat(84));

    for approach in &approaches {
        println!(
            "{:<14} {:<18} {:>15.6} {:>8.3} {:>8.2} {:>6} {:>9}",
            approach.des,
            approach.cd,
            approach.jd,
            approach.dist / LUNAR_DISTANCE_AU,
            approach.v_rel,
            format_optional(approach.h, 1),
            format_optional(approach.diameter, 3),
        );
    }

    println!("\nTotal: {} close approaches", approaches.len());

    Ok(())
}
