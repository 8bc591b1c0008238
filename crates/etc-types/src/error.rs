//! Error types for rubin-etc.

use thiserror::Error;

use crate::Dimension;

/// Result type alias for rubin-etc operations.
pub type Result<T> = std::result::Result<T, EtcError>;

/// Errors that can occur while computing observability metrics.
#[derive(Error, Debug)]
pub enum EtcError {
    /// A physical input cannot be converted to the dimension an operation needs.
    #[error("Dimension mismatch for {quantity}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Name of the offending input (e.g. "velocity").
        quantity: &'static str,
        /// The dimension the operation requires.
        expected: Dimension,
        /// The dimension that was supplied.
        found: Dimension,
    },

    /// Filter letter outside {u, g, r, i, z, y}.
    #[error("Unsupported filter band: {0}")]
    UnsupportedFilterBand(String),

    /// Filters and exposure times of a visit differ in length.
    #[error("Length mismatch: {filters} filters but {exptimes} exposure times")]
    LengthMismatch {
        /// Number of filters supplied.
        filters: usize,
        /// Number of exposure times supplied.
        exptimes: usize,
    },

    /// Exposure time that is negative, infinite or NaN.
    #[error("Invalid exposure time: {0} s")]
    InvalidExposureTime(f64),

    /// Asteroid taxonomic class outside the color table.
    #[error("Unsupported taxonomy: {0}")]
    UnsupportedTaxonomy(String),

    /// Overhead configuration that cannot produce a finite budget.
    #[error("Invalid overheads: {0}")]
    InvalidOverheads(String),

    /// A time budget was requested for zero fields.
    #[error("Invalid field count: {0} (at least one field is required)")]
    InvalidFieldCount(u32),

    /// A quantity string could not be parsed.
    #[error("Unit parse error: {0}")]
    UnitParse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = EtcError::DimensionMismatch {
            quantity: "seeing",
            expected: Dimension::Angle,
            found: Dimension::Dimensionless,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch for seeing: expected angle, found dimensionless"
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = EtcError::LengthMismatch {
            filters: 4,
            exptimes: 3,
        };
        assert!(err.to_string().contains("4 filters but 3 exposure times"));
    }
}
