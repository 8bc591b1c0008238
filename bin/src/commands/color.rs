//! Color transform command implementation.

use anyhow::{Context, Result};
use etc_lib::prelude::*;

/// Print the PS1 magnitude of an asteroid with V magnitude `mag_v`.
pub(crate) fn color(mag_v: f64, passband: &str, taxonomy: &str) -> Result<()> {
    let band: Ps1Band = passband.parse().with_context(|| {
        format!("Invalid passband: {passband}. Valid options: g, r, i, z, y, w")
    })?;
    let taxonomy: Taxonomy = taxonomy.parse().with_context(|| {
        format!("Invalid taxonomy: {taxonomy}. Valid options: solar, mean, s, c, q, x, d, neo")
    })?;

    let colors = ColorTransforms::global();
    let mag = colors.transform(mag_v, band, taxonomy);

    println!("Taxonomy: {taxonomy}");
    println!("V:        {mag_v:.2}");
    println!("{band}:        {mag:.2} (V{:+.2})", colors.offset(band, taxonomy));

    Ok(())
}
