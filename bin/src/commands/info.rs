//! Info command implementation.
//!
//! This module handles displaying the constants of a single band together
//! with the depth reached at typical exposure times.

use anyhow::Result;
use etc_lib::prelude::*;

use crate::display::{format_value, parse_filter};

const EXPTIMES: [f64; 5] = [15.0, 30.0, 60.0, 120.0, 300.0];

/// Show constants and a depth table for one band.
pub(crate) fn show_info(band: &str) -> Result<()> {
    let filter = parse_filter(band)?;
    let calc = DepthCalculator::global();
    let constants = calc.table().get(filter);

    // Basic info
    println!("Filter:           {filter}");
    println!("Cm:               {:.2}", constants.cm());
    println!("dCm (infinite):   {:.2}", constants.dcm_inf());
    println!("Zeropoint:        {:.2}", constants.zeropoint());
    println!("Dark-sky FWHM:    {:.2} arcsec", constants.fwhm_dark());
    println!("Dark sky:         {:.2} mag/arcsec2", constants.m_darksky());
    println!("Extinction:       {:.3} mag/airmass", constants.k_atm());
    match constants.twilight() {
        Some(twilight) => {
            println!("Twilight FWHM:    {:.2} arcsec", twilight.fwhm);
            println!("Twilight sky:     {:.2} mag/arcsec2", twilight.m_sky);
        }
        None => println!("Twilight:         not modelled"),
    }

    let dark = calc.depth_table(filter, &ObservingConditions::dark(), &EXPTIMES);
    let twilight = calc.depth_table(filter, &ObservingConditions::twilight(), &EXPTIMES);

    println!("\n5-sigma depth at airmass 1.0:");
    println!("{:<12} {:>10} {:>10}", "EXPTIME", "DARK", "TWILIGHT");
    println!("{}", "-".repeat(34));
    for ((exptime, m5_dark), (_, m5_twilight)) in dark.iter().zip(&twilight) {
        println!(
            "{:<12} {:>10} {:>10}",
            format!("{exptime:.0} s"),
            format_value(*m5_dark, 2),
            format_value(*m5_twilight, 2),
        );
    }

    Ok(())
}
