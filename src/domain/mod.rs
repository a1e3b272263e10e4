//! Storage-agnostic domain types for the similarity and clustering engine.

pub mod error;

mod cluster;
mod id;
mod property;
mod similarity;

pub use cluster::{ClusterGeography, ClusterMetrics, ClusterSimilarity, PropertyCluster};
pub use error::DomainError;
pub use id::{AmenityId, ClusterId, PropertyId};
pub use property::{Amenity, GeoPoint, Property};
pub use similarity::{
    PairScore, SimilarityEdge, SimilarityFactors, SimilarityWeights, SIMILARITY_THRESHOLD,
};
