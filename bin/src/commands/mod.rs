//! CLI command implementations.

pub(crate) mod budget;
#[cfg(feature = "fetch")]
pub(crate) mod close_approach;
pub(crate) mod color;
pub(crate) mod depth;
#[cfg(feature = "fetch")]
pub(crate) mod ephemeris;
pub(crate) mod exptime;
pub(crate) mod filters;
pub(crate) mod info;
pub(crate) mod trailing;
