//! The computational core: similarity scoring, cluster building, spatial
//! queries, and walk scores.

mod cluster;
mod similarity;
mod spatial;
mod walkscore;

pub use cluster::ClusterBuilder;
pub use similarity::{
    score_pair, tally_amenities, AmenityTally, SimilarityConfig, SimilarityEngine,
};
pub use spatial::{
    NearbyProperty, NeighborhoodDemographics, SpatialEngine, DEMOGRAPHICS_RADIUS_M,
    NEARBY_AMENITY_RADIUS_M,
};
pub use walkscore::{AmenityWeight, WalkScoreConfig, WalkScoreEngine};
