//! Trailing loss command implementation.

use anyhow::{Context, Result};
use etc_lib::prelude::*;

fn parse_quantity(name: &str, value: &str) -> Result<Quantity> {
    value
        .parse::<Quantity>()
        .with_context(|| format!("Invalid {name}: {value}"))
}

/// Print the trailing losses for a moving target.
pub(crate) fn trailing(velocity: &str, seeing: &str, exptime: &str) -> Result<()> {
    let velocity = parse_quantity("velocity", velocity)?;
    let seeing = parse_quantity("seeing", seeing)?;
    let exptime = parse_quantity("exposure time", exptime)?;

    let loss = trailing_losses_checked(&velocity, &seeing, &exptime)?;

    println!("Velocity: {velocity}");
    println!("Seeing:   {seeing}");
    println!("Exptime:  {exptime}");
    println!();
    println!("{:<22} {:>8}", "LOSS", "MAG");
    println!("{}", "-".repeat(31));
    println!("{:<22} {:>8.3}", "Trailed photometry", loss.dmag_trail);
    println!("{:<22} {:>8.3}", "Detection", loss.dmag_detect);

    Ok(())
}
