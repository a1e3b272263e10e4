//! Store port for property, amenity, and similarity-edge access.
//!
//! The data-access layer is an external collaborator: this trait consumes it
//! as a provider of property and amenity records and a sink for similarity
//! edges. The engines never touch a database type directly.

use std::future::Future;

use crate::domain::{Amenity, GeoPoint, Property, PropertyId, SimilarityEdge};
use crate::error::Result;

/// Read access to listings and amenities, plus the derived edge cache.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `replace_similarity_edges` must be atomic: a concurrent reader never
///   observes a half-replaced edge set
pub trait PropertyStore: Send + Sync {
    /// List all properties.
    fn list_properties(&self) -> impl Future<Output = Result<Vec<Property>>> + Send;

    /// List amenities within `radius_m` meters of a point.
    fn list_amenities_near(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> impl Future<Output = Result<Vec<Amenity>>> + Send;

    /// Atomically replace the entire stored edge set: delete all existing
    /// edges, then insert the given set, in one transaction.
    fn replace_similarity_edges(
        &self,
        edges: &[SimilarityEdge],
    ) -> impl Future<Output = Result<()>> + Send;

    /// List stored edges with composite score >= `min_score`.
    fn list_similarity_edges(
        &self,
        min_score: f64,
    ) -> impl Future<Output = Result<Vec<SimilarityEdge>>> + Send;

    /// Fetch full property records for the given ids. Ids with no matching
    /// record are simply absent from the result; callers decide whether
    /// that is an error.
    fn get_properties_by_ids(
        &self,
        ids: &[PropertyId],
    ) -> impl Future<Output = Result<Vec<Property>>> + Send;
}
