//! Sensitivity losses for targets moving during an exposure.

use etc_types::units::{
    Angle, AngleExt, AngularVelocity, AngularVelocityExt, Time, TimeExt,
};
use etc_types::{Quantity, Result};
use serde::{Deserialize, Serialize};

/// Rate (deg/day) used by [`TrailingLoss::default_inputs`].
pub const DEFAULT_VELOCITY_DEG_PER_DAY: f64 = 2.0;

/// Seeing (arcsec) used by [`TrailingLoss::default_inputs`].
pub const DEFAULT_SEEING_ARCSEC: f64 = 0.8;

/// Exposure time (s) used by [`TrailingLoss::default_inputs`].
pub const DEFAULT_EXPTIME_S: f64 = 30.0;

/// Magnitude losses from image trailing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingLoss {
    /// Loss in measured brightness for a trailed source.
    pub dmag_trail: f64,
    /// Loss in detection efficiency for a point-source detection pipeline.
    pub dmag_detect: f64,
}

impl TrailingLoss {
    /// Computes the losses for trail length expressed in seeing disks.
    ///
    /// `x` is the distance moved during the exposure divided by the seeing FWHM.
    #[must_use]
    pub fn from_trail_parameter(x: f64) -> Self {
        let x2 = x * x;
        Self {
            dmag_trail: 1.25 * (1.0 + 0.761 * x2 / (1.0 + 1.162 * x)).log10(),
            dmag_detect: 1.25 * (1.0 + 0.420 * x2 / (1.0 + 0.003 * x)).log10(),
        }
    }

    /// Losses for 2 deg/day, 0.8 arcsec seeing and a 30 s exposure.
    #[must_use]
    pub fn default_inputs() -> Self {
        trailing_losses(
            AngularVelocity::from_degrees_per_day(DEFAULT_VELOCITY_DEG_PER_DAY),
            Angle::from_arcseconds(DEFAULT_SEEING_ARCSEC),
            Time::from_seconds(DEFAULT_EXPTIME_S),
        )
    }

    /// Returns the pair as `(dmag_trail, dmag_detect)`.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64) {
        (self.dmag_trail, self.dmag_detect)
    }
}

/// Trail length in units of the seeing FWHM.
#[must_use]
pub fn trail_parameter(velocity: AngularVelocity, seeing: Angle, exptime: Time) -> f64 {
    // deg/day * s / arcsec / 24 is arcsec moved per arcsec of seeing
    velocity.as_degrees_per_day() * exptime.as_seconds() / seeing.as_arcseconds() / 24.0
}

/// Trailing losses for a target moving at `velocity`.
#[must_use]
pub fn trailing_losses(velocity: AngularVelocity, seeing: Angle, exptime: Time) -> TrailingLoss {
    TrailingLoss::from_trail_parameter(trail_parameter(velocity, seeing, exptime))
}

/// Trailing losses for runtime quantities.
///
/// `velocity` must be an angle per time, `seeing` an angle and `exptime` a
/// time. Bare numbers are rejected.
///
/// # Errors
///
/// Returns [`etc_types::EtcError::DimensionMismatch`] naming the first input
/// with the wrong dimension.
pub fn trailing_losses_checked(
    velocity: &Quantity,
    seeing: &Quantity,
    exptime: &Quantity,
) -> Result<TrailingLoss> {
    let velocity = velocity.to_angular_velocity("velocity")?;
    let seeing = seeing.to_angle("seeing")?;
    let exptime = exptime.to_time("exptime")?;
    Ok(trailing_losses(velocity, seeing, exptime))
}
