//! Exposure time calculator for Rubin Observatory target-of-opportunity planning.
//!
//! This is a facade crate that re-exports functionality from the rubin-etc
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use etc_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueryClient::with_defaults()?;
//!     let approaches = client.close_approaches(&CloseApproachQuery::default()).await?;
//!
//!     for approach in approaches.iter().take(3) {
//!         let request = EphemerisRequest::for_close_approach(approach);
//!         if let Some(ephemeris) = client.ephemeris(&request).await? {
//!             println!("{}: {} ephemeris lines", approach.des, ephemeris.len());
//!         }
//!     }
//!
//!     let m5 = depth_for_exposure_time(30.0, Filter::R, &ObservingConditions::twilight());
//!     println!("r-band twilight depth in 30 s: {m5:.2}");
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/rubin-too/rubin-etc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use etc_types::*;

// Re-export static tables
pub use etc_filters::{ColorTransforms, FilterTable, Ps1Band, Taxonomy};

// Re-export photometric models
pub use etc_photometry::{
    DepthCalculator, ObservingConditions, SkyBackground, TrailingLoss, depth_for_exposure_time,
    exposure_time_for_depth, trailing_losses, trailing_losses_checked,
};

// Re-export time budgets
pub use etc_budget::{Overheads, TimeBudget, TimeBudgetEstimator, time_budget};

// Re-export remote queries
#[cfg(feature = "fetch")]
pub use etc_fetch::{
    ClientConfig, CloseApproach, CloseApproachQuery, CloseApproachSource, EphemerisRequest,
    EphemerisRow, EphemerisSource, EphemerisTable, FetchError, QueryClient, jd_tdb_to_utc,
};

/// Prelude module for convenient imports.
///
/// ```
/// use etc_lib::prelude::*;
/// ```
pub mod prelude {
    pub use etc_types::units::{
        Angle, AngleExt, AngularVelocity, AngularVelocityExt, Time, TimeExt,
    };
    pub use etc_types::{EtcError, Filter, Quantity, Result, VisitSpec};

    pub use etc_filters::{ColorTransforms, FilterTable, Ps1Band, Taxonomy};

    pub use etc_photometry::{
        DepthCalculator, ObservingConditions, SkyBackground, TrailingLoss,
        depth_for_exposure_time, exposure_time_for_depth, trailing_losses,
        trailing_losses_checked,
    };

    pub use etc_budget::{Overheads, TimeBudget, TimeBudgetEstimator, time_budget};

    #[cfg(feature = "fetch")]
    pub use etc_fetch::{
        CloseApproach, CloseApproachQuery, CloseApproachSource, EphemerisRequest,
        EphemerisSource, EphemerisTable, QueryClient,
    };
}
