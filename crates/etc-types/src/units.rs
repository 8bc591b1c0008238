//! Physical quantities with checked units.
//!
//! Computations take strongly-typed `uom` quantities ([`Angle`], [`Time`],
//! [`AngularVelocity`]) so that unit confusion is a compile error. Values that
//! arrive at runtime (command-line arguments, configuration files) are parsed
//! into a [`Quantity`], whose [`Dimension`] is checked when it is converted
//! into one of the typed quantities.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use uom::si::angle::{degree, minute as arcminute, radian, second as arcsecond};
use uom::si::angular_velocity::radian_per_second;
use uom::si::time::{day, hour, minute, second};

use crate::EtcError;

pub use uom::si::f64::{Angle, AngularVelocity, Time};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Extension trait for angle conversions used in astronomy.
pub trait AngleExt {
    /// Create an angle from degrees
    fn from_degrees(deg: f64) -> Self;

    /// Get angle in degrees
    fn as_degrees(&self) -> f64;

    /// Create an angle from arcseconds
    fn from_arcseconds(arcsec: f64) -> Self;

    /// Get angle in arcseconds
    fn as_arcseconds(&self) -> f64;
}

/// Extension trait for time conversions.
pub trait TimeExt {
    /// Create a time from seconds
    fn from_seconds(s: f64) -> Self;

    /// Get time in seconds
    fn as_seconds(&self) -> f64;
}

/// Extension trait for sky-motion rates.
pub trait AngularVelocityExt {
    /// Create a rate from degrees per day
    fn from_degrees_per_day(deg_per_day: f64) -> Self;

    /// Get rate in degrees per day
    fn as_degrees_per_day(&self) -> f64;
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Self::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_arcseconds(arcsec: f64) -> Self {
        Self::new::<arcsecond>(arcsec)
    }

    fn as_arcseconds(&self) -> f64 {
        self.get::<arcsecond>()
    }
}

impl TimeExt for Time {
    fn from_seconds(s: f64) -> Self {
        Self::new::<second>(s)
    }

    fn as_seconds(&self) -> f64 {
        self.get::<second>()
    }
}

impl AngularVelocityExt for AngularVelocity {
    fn from_degrees_per_day(deg_per_day: f64) -> Self {
        Self::new::<radian_per_second>(deg_per_day.to_radians() / SECONDS_PER_DAY)
    }

    fn as_degrees_per_day(&self) -> f64 {
        self.get::<radian_per_second>() * 180.0 / PI * SECONDS_PER_DAY
    }
}

/// Physical dimension of a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// A bare number.
    Dimensionless,
    /// Plane angle.
    Angle,
    /// Duration.
    Time,
    /// Angle per unit time.
    AngularVelocity,
}

impl Dimension {
    /// Returns the dimension as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dimensionless => "dimensionless",
            Self::Angle => "angle",
            Self::Time => "time",
            Self::AngularVelocity => "angle/time",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported angle units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Radians.
    Radian,
    /// Degrees.
    Degree,
    /// Minutes of arc.
    Arcminute,
    /// Seconds of arc.
    Arcsecond,
}

impl AngleUnit {
    /// Returns the canonical symbol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Radian => "rad",
            Self::Degree => "deg",
            Self::Arcminute => "arcmin",
            Self::Arcsecond => "arcsec",
        }
    }

    fn angle(self, value: f64) -> Angle {
        match self {
            Self::Radian => Angle::new::<radian>(value),
            Self::Degree => Angle::new::<degree>(value),
            Self::Arcminute => Angle::new::<arcminute>(value),
            Self::Arcsecond => Angle::new::<arcsecond>(value),
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "rad" | "radian" | "radians" => Some(Self::Radian),
            "deg" | "degree" | "degrees" | "°" => Some(Self::Degree),
            "arcmin" | "amin" | "'" => Some(Self::Arcminute),
            "arcsec" | "asec" | "\"" => Some(Self::Arcsecond),
            _ => None,
        }
    }
}

/// Supported time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days of 86400 s.
    Day,
}

impl TimeUnit {
    /// Returns the canonical symbol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "day",
        }
    }

    fn time(self, value: f64) -> Time {
        match self {
            Self::Second => Time::new::<second>(value),
            Self::Minute => Time::new::<minute>(value),
            Self::Hour => Time::new::<hour>(value),
            Self::Day => Time::new::<day>(value),
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Second),
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hour),
            "d" | "day" | "days" => Some(Self::Day),
            _ => None,
        }
    }
}

/// Unit attached to a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// No unit at all.
    Dimensionless,
    /// An angle unit.
    Angle(AngleUnit),
    /// A time unit.
    Time(TimeUnit),
    /// An angle unit divided by a time unit.
    AngularVelocity(AngleUnit, TimeUnit),
}

impl Unit {
    /// Returns the physical dimension of this unit.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Dimensionless => Dimension::Dimensionless,
            Self::Angle(_) => Dimension::Angle,
            Self::Time(_) => Dimension::Time,
            Self::AngularVelocity(_, _) => Dimension::AngularVelocity,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dimensionless => Ok(()),
            Self::Angle(a) => write!(f, "{}", a.as_str()),
            Self::Time(t) => write!(f, "{}", t.as_str()),
            Self::AngularVelocity(a, t) => write!(f, "{}/{}", a.as_str(), t.as_str()),
        }
    }
}

impl FromStr for Unit {
    type Err = EtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::Dimensionless);
        }

        let lower = s.to_lowercase();
        if let Some((num, den)) = lower.split_once('/') {
            let angle = AngleUnit::parse(num.trim());
            let time = TimeUnit::parse(den.trim());
            return match (angle, time) {
                (Some(a), Some(t)) => Ok(Self::AngularVelocity(a, t)),
                _ => Err(EtcError::UnitParse(format!("unknown rate unit '{s}'"))),
            };
        }

        AngleUnit::parse(&lower)
            .map(Self::Angle)
            .or_else(|| TimeUnit::parse(&lower).map(Self::Time))
            .ok_or_else(|| EtcError::UnitParse(format!("unknown unit '{s}'")))
    }
}

/// A value tagged with a unit whose dimension is checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
}

impl Quantity {
    /// Creates a new quantity.
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Creates a bare number without a unit.
    #[must_use]
    pub const fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::Dimensionless)
    }

    /// Returns the physical dimension of this quantity.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Converts to a typed angle.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::DimensionMismatch`] unless the unit is an angle.
    pub fn to_angle(&self, quantity: &'static str) -> Result<Angle, EtcError> {
        match self.unit {
            Unit::Angle(a) => Ok(a.angle(self.value)),
            _ => Err(self.mismatch(quantity, Dimension::Angle)),
        }
    }

    /// Converts to a typed duration.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::DimensionMismatch`] unless the unit is a time.
    pub fn to_time(&self, quantity: &'static str) -> Result<Time, EtcError> {
        match self.unit {
            Unit::Time(t) => Ok(t.time(self.value)),
            _ => Err(self.mismatch(quantity, Dimension::Time)),
        }
    }

    /// Converts to a typed angular velocity.
    ///
    /// # Errors
    ///
    /// Returns [`EtcError::DimensionMismatch`] unless the unit is an angle per time.
    pub fn to_angular_velocity(&self, quantity: &'static str) -> Result<AngularVelocity, EtcError> {
        match self.unit {
            Unit::AngularVelocity(a, t) => {
                let per_second = a.angle(self.value).get::<radian>() / t.time(1.0).get::<second>();
                Ok(AngularVelocity::new::<radian_per_second>(per_second))
            }
            _ => Err(self.mismatch(quantity, Dimension::AngularVelocity)),
        }
    }

    const fn mismatch(&self, quantity: &'static str, expected: Dimension) -> EtcError {
        EtcError::DimensionMismatch {
            quantity,
            expected,
            found: self.dimension(),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            unit => write!(f, "{} {}", self.value, unit),
        }
    }
}

impl FromStr for Quantity {
    type Err = EtcError;

    /// Parses strings such as `"2 deg/day"`, `"0.8arcsec"` or `"30 s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // No supported unit starts with 'e', so exponents stay with the number.
        let split = s
            .char_indices()
            .find(|&(_, c)| {
                (c.is_alphabetic() && c != 'e' && c != 'E') || matches!(c, '°' | '\'' | '"')
            })
            .map_or(s.len(), |(i, _)| i);

        let (number, unit) = s.split_at(split);
        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|e| EtcError::UnitParse(format!("invalid number in '{s}': {e}")))?;
        Ok(Self::new(value, unit.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        let seeing = Angle::from_arcseconds(0.8);
        assert_relative_eq!(seeing.as_arcseconds(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(seeing.as_degrees(), 0.8 / 3600.0, epsilon = 1e-15);

        let one_degree = Angle::from_degrees(1.0);
        assert_relative_eq!(one_degree.as_arcseconds(), 3600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rate_conversions() {
        let rate = AngularVelocity::from_degrees_per_day(2.0);
        assert_relative_eq!(rate.as_degrees_per_day(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_quantities() {
        let v: Quantity = "2 deg/day".parse().unwrap();
        assert_eq!(
            v.unit,
            Unit::AngularVelocity(AngleUnit::Degree, TimeUnit::Day)
        );
        assert_eq!(v.dimension(), Dimension::AngularVelocity);

        let seeing: Quantity = "0.8arcsec".parse().unwrap();
        assert_eq!(seeing.unit, Unit::Angle(AngleUnit::Arcsecond));

        let exptime: Quantity = "30 s".parse().unwrap();
        assert_eq!(exptime.unit, Unit::Time(TimeUnit::Second));

        let bare: Quantity = "1.5e1".parse().unwrap();
        assert_eq!(bare, Quantity::dimensionless(15.0));

        assert!(matches!(
            "3 furlongs".parse::<Quantity>(),
            Err(EtcError::UnitParse(_))
        ));
        assert!("deg".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_checked_conversions() {
        let rate: Quantity = "1 arcsec/min".parse().unwrap();
        let typed = rate.to_angular_velocity("velocity").unwrap();
        // 1"/min = 1440"/day = 0.4 deg/day
        assert_relative_eq!(typed.as_degrees_per_day(), 0.4, epsilon = 1e-12);

        let hours: Quantity = "0.5 h".parse().unwrap();
        assert_relative_eq!(hours.to_time("exptime").unwrap().as_seconds(), 1800.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let bare = Quantity::dimensionless(0.8);
        let err = bare.to_angle("seeing").unwrap_err();
        assert!(matches!(
            err,
            EtcError::DimensionMismatch {
                quantity: "seeing",
                expected: Dimension::Angle,
                found: Dimension::Dimensionless,
            }
        ));

        let time: Quantity = "30 s".parse().unwrap();
        assert!(time.to_angular_velocity("velocity").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let q: Quantity = "2 deg/day".parse().unwrap();
        assert_eq!(q.to_string(), "2 deg/day");
        assert_eq!(q.to_string().parse::<Quantity>().unwrap(), q);
    }
}
