//! Remote small-body queries for rubin-etc.
//!
//! This crate provides the two external data sources used when planning
//! follow-up of close-approaching asteroids:
//!
//! - [`CloseApproachQuery`] / [`CloseApproachSource`] - JPL SBDB close-approach data
//! - [`EphemerisRequest`] / [`EphemerisSource`] - JPL Horizons observer ephemerides
//! - [`QueryClient`] - HTTP client implementing both sources
//!
//! Queries are single shot. A non-success status yields an empty result.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod close_approach;
pub mod horizons;

pub use client::{ClientConfig, FetchError, QueryClient};
pub use close_approach::{
    CAD_URL, CloseApproach, CloseApproachQuery, CloseApproachSource, parse_close_approaches,
};
pub use horizons::{
    EphemerisRequest, EphemerisRow, EphemerisSource, EphemerisTable, jd_tdb_to_utc,
    parse_ephemeris,
};
