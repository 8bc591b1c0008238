//! Exposure time command implementation.

use anyhow::{Result, bail};
use etc_lib::prelude::*;

use crate::display::{conditions, parse_filter};

/// Print the exposure time needed to reach `m5` in `band`.
pub(crate) fn exposure_time(m5: f64, band: &str, airmass: f64, twilight: bool) -> Result<()> {
    let filter = parse_filter(band)?;
    let conditions = conditions(airmass, twilight);
    let calc = DepthCalculator::global();

    if twilight && !calc.supports_twilight(filter) {
        bail!("No twilight sky model for {filter}-band. Twilight is available in r, i, z");
    }

    let exptime = calc.exposure_time_for_depth(m5, filter, &conditions);
    println!("Filter:   {filter}");
    println!("Sky:      {}", conditions.sky);
    println!("Airmass:  {airmass:.2}");
    println!("Depth:    {m5:.2} mag");
    println!("Exptime:  {exptime:.1} s");

    Ok(())
}
