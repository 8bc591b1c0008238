//! Limiting depth command implementation.

use anyhow::{Result, bail};
use etc_lib::prelude::*;

use crate::display::{conditions, parse_filter};

/// Print the 5-sigma depth reached in `exptime` seconds in `band`.
pub(crate) fn depth(exptime: f64, band: &str, airmass: f64, twilight: bool) -> Result<()> {
    if exptime <= 0.0 {
        bail!("Exposure time must be positive, got {exptime}");
    }
    let filter = parse_filter(band)?;
    let conditions = conditions(airmass, twilight);
    let calc = DepthCalculator::global();

    if twilight && !calc.supports_twilight(filter) {
        bail!("No twilight sky model for {filter}-band. Twilight is available in r, i, z");
    }

    let m5 = calc.depth_for_exposure_time(exptime, filter, &conditions);
    println!("Filter:   {filter}");
    println!("Sky:      {}", conditions.sky);
    println!("Airmass:  {airmass:.2}");
    println!("Exptime:  {exptime:.1} s");
    println!("Depth:    {m5:.2} mag");

    Ok(())
}
