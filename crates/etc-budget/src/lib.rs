//! Observing time budgets for rubin-etc.
//!
//! - [`Overheads`] - Readout, slew and filter-change overheads
//! - [`TimeBudgetEstimator`] - Totals exposure and overhead time over several fields
//! - [`TimeBudget`] - Breakdown of an estimate
//! - [`time_budget`] - Total hours for a visit with the default overheads

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;
mod overheads;

pub use estimator::{TimeBudget, TimeBudgetEstimator, time_budget};
pub use overheads::Overheads;
