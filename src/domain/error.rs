//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and other methods
//! that validate domain rules.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Similarity weights must sum to exactly 1.0.
    #[error("similarity weights must sum to 1.0, got {sum}")]
    WeightSumInvalid {
        /// The actual sum of the supplied weights.
        sum: f64,
    },

    /// A similarity weight was negative.
    #[error("similarity weight for {factor} must be non-negative, got {value}")]
    NegativeWeight {
        /// Name of the offending factor.
        factor: &'static str,
        /// The invalid weight that was provided.
        value: f64,
    },

    /// Clusters must have at least two members; singletons are never built.
    #[error("cluster requires at least two members, got {count}")]
    TooFewMembers {
        /// The member count that was provided.
        count: usize,
    },
}
