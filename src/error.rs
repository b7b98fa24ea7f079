//! Error types for correlation and hypothesis-test computations.
//!
//! Degenerate inputs (zero variance, a single category, an undersized
//! group) fail with a named variant rather than silently producing
//! `NaN`, so callers can distinguish "no correlation could be computed"
//! from "correlation computed as exactly 0".

use thiserror::Error;

/// Error type for all engine computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The dataset does not contain the two variables the kind requires.
    #[error("at least two variables are required")]
    MissingVariable,

    /// Variable sequences differ in length.
    #[error("all variables must have the same number of values")]
    LengthMismatch,

    /// Fewer than three observations.
    #[error("at least 3 data points are required (got {n})")]
    SampleTooSmall {
        /// Observed sample size.
        n: usize,
    },

    /// A value outside {0, 1} in a binary variable.
    #[error("binary variable must contain only 0s and 1s (found {value})")]
    NotBinary {
        /// The offending value.
        value: f64,
    },

    /// A variable's column type does not match the correlation kind.
    #[error("{kind} requires {expected} data")]
    TypeMismatch {
        /// Display name of the correlation kind.
        kind: &'static str,
        /// "numeric" or "categorical".
        expected: &'static str,
    },

    /// A NaN or infinite value in numeric input.
    #[error("input contains non-finite values")]
    NonFinite,

    /// A denominator standard deviation is zero.
    #[error("{variable} has zero variance")]
    ZeroVariance {
        /// Which variable (or derived quantity) degenerated.
        variable: String,
    },

    /// A contingency dimension with a single category (k = 1).
    #[error("both variables must have at least two categories")]
    SingleCategory,

    /// A point-biserial group with fewer than two members.
    #[error("group {group} has {len} members; at least 2 are required")]
    GroupTooSmall {
        /// Binary label of the undersized group (0 or 1).
        group: u8,
        /// Number of members observed.
        len: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
