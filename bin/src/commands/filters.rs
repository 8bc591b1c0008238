//! Filters command implementation.

use anyhow::Result;
use etc_lib::prelude::*;

use crate::display::format_optional;

/// List the survey bands with their photometric constants.
pub(crate) fn list_filters() -> Result<()> {
    let table = FilterTable::global();

    println!(
        "{:<6} {:>7} {:>7} {:>7} {:>7} {:>8} {:>7} {:>9} {:>9}",
        "BAND", "CM", "DCM_INF", "ZP", "FWHM", "SKY", "K_ATM", "TWI_FWHM", "TWI_SKY"
    );
    println!("{}", "-".repeat(80));

    for constants in table.all() {
        let twilight = constants.twilight();
        println!(
            "{:<6} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>8.2} {:>7.3} {:>9} {:>9}",
            constants.filter(),
            constants.cm(),
            constants.dcm_inf(),
            constants.zeropoint(),
            constants.fwhm_dark(),
            constants.m_darksky(),
            constants.k_atm(),
            format_optional(twilight.map(|t| t.fwhm), 2),
            format_optional(twilight.map(|t| t.m_sky), 2),
        );
    }

    println!("\nTotal: {} filters", table.len());

    Ok(())
}
