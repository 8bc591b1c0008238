//! Core types for the rubin-etc exposure time calculator.
//!
//! This crate provides the fundamental data structures used throughout rubin-etc:
//!
//! - [`Filter`] - One of the six survey bands (u, g, r, i, z, y)
//! - [`FilterConstants`] - Per-band photometric constants
//! - [`VisitSpec`] - Ordered filters and exposure times for one visit
//! - [`Quantity`] - A value tagged with a runtime-checked physical unit
//! - [`EtcError`] - Errors shared across the workspace

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod filter;
pub mod units;
mod visit;

pub use error::{EtcError, Result};
pub use filter::{Filter, FilterConstants, TwilightConditions};
pub use units::{Dimension, Quantity, Unit};
pub use visit::VisitSpec;
