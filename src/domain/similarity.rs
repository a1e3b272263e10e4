//! Pairwise similarity types: factors, weights, scores, and stored edges.
//!
//! Properties are scored on four factors (price, size, location, shared
//! amenities), each normalized to 0.0-1.0 where 1.0 means identical. Factors
//! are combined into a composite score using configurable weights that must
//! sum to exactly 1.0.
//!
//! # Examples
//!
//! Combining factors into a composite score:
//!
//! ```
//! use comps::domain::{SimilarityFactors, SimilarityWeights};
//!
//! let factors = SimilarityFactors::new(0.95, 0.90, 0.80, 0.60);
//! let weights = SimilarityWeights::default();
//!
//! let total = factors.composite(&weights);
//! assert!(total > 0.8 && total < 0.9);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::PropertyId;

/// Fixed acceptance threshold: only pairs scoring strictly above this are
/// persisted by a similarity pass.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Individual similarity factors for a pair of properties.
///
/// Each factor is normalized to the 0.0-1.0 range where 1.0 means the two
/// properties are identical on that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityFactors {
    /// Relative price closeness (0.0 to 1.0).
    pub price: f64,
    /// Relative square-footage closeness (0.0 to 1.0).
    pub size: f64,
    /// Geographic proximity within the configured radius cap (0.0 to 1.0).
    pub location: f64,
    /// Overlap of nearby amenity types (0.0 to 1.0).
    pub amenity: f64,
}

impl SimilarityFactors {
    /// Creates new similarity factors with the given values.
    ///
    /// All values should be normalized to the 0.0-1.0 range.
    #[must_use]
    pub const fn new(price: f64, size: f64, location: f64, amenity: f64) -> Self {
        Self {
            price,
            size,
            location,
            amenity,
        }
    }

    /// Computes the weighted composite score from these factors.
    #[must_use]
    pub fn composite(&self, weights: &SimilarityWeights) -> f64 {
        self.price * weights.price
            + self.size * weights.size
            + self.location * weights.location
            + self.amenity * weights.amenity
    }
}

/// Weights for combining similarity factors into a composite score.
///
/// Weights must be non-negative and sum to exactly 1.0 so the composite
/// stays in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    /// Weight applied to the price factor.
    pub price: f64,
    /// Weight applied to the size factor.
    pub size: f64,
    /// Weight applied to the location factor.
    pub location: f64,
    /// Weight applied to the amenity factor.
    pub amenity: f64,
}

impl SimilarityWeights {
    /// Creates weights after validating the domain invariants.
    ///
    /// The sum check is exact, matching the engine's contract: weight sets
    /// that only approximately sum to 1.0 are rejected. The shipped defaults
    /// (0.3/0.2/0.3/0.2) are exactly representable sums in f64.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeWeight`] for any negative weight and
    /// [`DomainError::WeightSumInvalid`] when the sum differs from 1.0.
    pub fn try_new(price: f64, size: f64, location: f64, amenity: f64) -> Result<Self, DomainError> {
        for (factor, value) in [
            ("price", price),
            ("size", size),
            ("location", location),
            ("amenity", amenity),
        ] {
            if value < 0.0 {
                return Err(DomainError::NegativeWeight { factor, value });
            }
        }

        let sum = price + size + location + amenity;
        if sum != 1.0 {
            return Err(DomainError::WeightSumInvalid { sum });
        }

        Ok(Self {
            price,
            size,
            location,
            amenity,
        })
    }

    /// Validates an already-constructed weight set (e.g. one deserialized
    /// from configuration).
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::try_new(self.price, self.size, self.location, self.amenity).map(|_| ())
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            price: 0.3,
            size: 0.2,
            location: 0.3,
            amenity: 0.2,
        }
    }
}

/// The scored result for one ordered pair of properties.
///
/// Keyed by the pair as given to the scoring call; the persisted form
/// ([`SimilarityEdge`]) normalizes the key to the unordered convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// First property of the scored pair, as given.
    pub property_id: PropertyId,
    /// Second property of the scored pair, as given.
    pub similar_property_id: PropertyId,
    /// Weighted composite score (0.0 to 1.0).
    pub score: f64,
    /// Individual factor scores.
    pub factors: SimilarityFactors,
}

impl PairScore {
    /// True if this score clears the fixed acceptance threshold.
    #[must_use]
    pub fn is_retained(&self) -> bool {
        self.score > SIMILARITY_THRESHOLD
    }

    /// Converts this score into a persistable edge, normalizing the pair key
    /// so the lower id always comes first.
    #[must_use]
    pub fn into_edge(self, computed_at: DateTime<Utc>) -> SimilarityEdge {
        let (a, b) = if self.property_id <= self.similar_property_id {
            (self.property_id, self.similar_property_id)
        } else {
            (self.similar_property_id, self.property_id)
        };
        SimilarityEdge {
            property_id: a,
            similar_property_id: b,
            score: self.score,
            factors: self.factors,
            computed_at,
        }
    }
}

/// A stored, directionless similarity edge between two properties.
///
/// Invariant: at most one edge per unordered pair, stored with the lower id
/// first. The full edge set is a derived, fully-recomputable cache that is
/// replaced wholesale on each similarity pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    /// Lower id of the pair.
    pub property_id: PropertyId,
    /// Higher id of the pair.
    pub similar_property_id: PropertyId,
    /// Weighted composite score (0.0 to 1.0).
    pub score: f64,
    /// Individual factor scores.
    pub factors: SimilarityFactors,
    /// When the pass that produced this edge ran.
    pub computed_at: DateTime<Utc>,
}

impl SimilarityEdge {
    /// True if this edge touches the given property.
    #[must_use]
    pub fn touches(&self, id: &PropertyId) -> bool {
        &self.property_id == id || &self.similar_property_id == id
    }
}
