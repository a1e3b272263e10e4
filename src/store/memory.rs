//! In-memory store implementation for testing and embedded use.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Amenity, AmenityId, GeoPoint, Property, PropertyId, SimilarityEdge};
use crate::error::Result;
use crate::geo::{FlatProjection, Geometry};
use crate::port::PropertyStore;

/// In-memory [`PropertyStore`].
///
/// Edge replacement holds the write lock for the whole swap, so readers see
/// either the old set or the new set, never a mix.
#[derive(Debug, Default)]
pub struct MemoryStore {
    properties: RwLock<HashMap<PropertyId, Property>>,
    amenities: RwLock<HashMap<AmenityId, Amenity>>,
    edges: RwLock<Vec<SimilarityEdge>>,
    geometry: FlatProjection,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property record.
    pub fn insert_property(&self, property: Property) {
        self.properties
            .write()
            .insert(property.id.clone(), property);
    }

    /// Insert or replace an amenity record.
    pub fn insert_amenity(&self, amenity: Amenity) {
        self.amenities.write().insert(amenity.id.clone(), amenity);
    }

    /// Number of stored similarity edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }
}

impl PropertyStore for MemoryStore {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.read().values().cloned().collect())
    }

    async fn list_amenities_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<Amenity>> {
        let amenities = self.amenities.read();
        let mut nearby = Vec::new();
        for amenity in amenities.values() {
            if self.geometry.distance_m(point, amenity.location)? <= radius_m {
                nearby.push(amenity.clone());
            }
        }
        Ok(nearby)
    }

    async fn replace_similarity_edges(&self, edges: &[SimilarityEdge]) -> Result<()> {
        *self.edges.write() = edges.to_vec();
        Ok(())
    }

    async fn list_similarity_edges(&self, min_score: f64) -> Result<Vec<SimilarityEdge>> {
        Ok(self
            .edges
            .read()
            .iter()
            .filter(|e| e.score >= min_score)
            .cloned()
            .collect())
    }

    async fn get_properties_by_ids(&self, ids: &[PropertyId]) -> Result<Vec<Property>> {
        let properties = self.properties.read();
        Ok(ids
            .iter()
            .filter_map(|id| properties.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::SimilarityFactors;

    fn property(id: &str, lon: f64, lat: f64) -> Property {
        Property {
            id: PropertyId::new(id),
            address: format!("{id} Main St"),
            price: dec!(500000),
            sqft: 1200,
            bedrooms: 3,
            bathrooms: 2,
            location: GeoPoint::new(lon, lat),
        }
    }

    fn amenity(id: &str, kind: &str, lon: f64, lat: f64) -> Amenity {
        Amenity {
            id: AmenityId::new(id),
            name: format!("{kind} {id}"),
            kind: kind.to_string(),
            location: GeoPoint::new(lon, lat),
        }
    }

    fn edge(a: &str, b: &str, score: f64) -> SimilarityEdge {
        SimilarityEdge {
            property_id: PropertyId::new(a),
            similar_property_id: PropertyId::new(b),
            score,
            factors: SimilarityFactors::new(score, score, score, score),
            computed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn amenities_near_filters_by_radius() {
        let store = MemoryStore::new();
        // ~0.001 deg latitude is ~111 m
        store.insert_amenity(amenity("close", "grocery", 0.0, 0.001));
        store.insert_amenity(amenity("far", "grocery", 0.0, 0.1));

        let nearby = store
            .list_amenities_near(GeoPoint::new(0.0, 0.0), 500.0)
            .await
            .unwrap();

        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].id.as_str(), "close");
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_edge_set() {
        let store = MemoryStore::new();
        store
            .replace_similarity_edges(&[edge("a", "b", 0.8), edge("a", "c", 0.9)])
            .await
            .unwrap();
        assert_eq!(store.edge_count(), 2);

        store
            .replace_similarity_edges(&[edge("a", "b", 0.75)])
            .await
            .unwrap();

        let remaining = store.list_similarity_edges(0.0).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].score, 0.75);
    }

    #[tokio::test]
    async fn list_edges_filters_by_min_score_inclusive() {
        let store = MemoryStore::new();
        store
            .replace_similarity_edges(&[edge("a", "b", 0.7), edge("a", "c", 0.69)])
            .await
            .unwrap();

        let qualifying = store.list_similarity_edges(0.7).await.unwrap();
        assert_eq!(qualifying.len(), 1);
        assert_eq!(qualifying[0].similar_property_id.as_str(), "b");
    }

    #[tokio::test]
    async fn get_by_ids_skips_missing_records() {
        let store = MemoryStore::new();
        store.insert_property(property("a", 0.0, 0.0));

        let found = store
            .get_properties_by_ids(&[PropertyId::new("a"), PropertyId::new("ghost")])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "a");
    }
}
