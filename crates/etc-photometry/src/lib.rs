//! Photometric models for rubin-etc.
//!
//! - [`DepthCalculator`] converts between exposure time and 5σ limiting
//!   magnitude for dark and twilight skies.
//! - [`trailing_losses`] estimates magnitude losses for moving targets.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod depth;
mod trailing;

pub use depth::{
    DepthCalculator, ObservingConditions, REFERENCE_EXPTIME, SkyBackground,
    depth_for_exposure_time, exposure_time_for_depth,
};
pub use trailing::{
    DEFAULT_EXPTIME_S, DEFAULT_SEEING_ARCSEC, DEFAULT_VELOCITY_DEG_PER_DAY, TrailingLoss,
    trail_parameter, trailing_losses, trailing_losses_checked,
};
