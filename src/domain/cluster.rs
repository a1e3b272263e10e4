//! Cluster types for groups of transitively-similar properties.
//!
//! A [`PropertyCluster`] is a maximal set of properties connected by
//! qualifying similarity edges, enriched with member details, a geographic
//! summary (centroid and radius), and aggregate metrics. Final clusters
//! partition their members: no property belongs to more than one cluster,
//! and singletons are never emitted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ClusterId, PropertyId};
use super::property::{GeoPoint, Property};
use super::similarity::SimilarityEdge;

/// Geographic summary of a cluster's members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterGeography {
    /// Mean geographic position of the members.
    pub centroid: GeoPoint,
    /// Maximum distance from the centroid to any member, in kilometers.
    pub radius_km: f64,
}

/// Aggregate statistics over a cluster's members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    /// Arithmetic mean of member prices.
    pub average_price: Decimal,
    /// Arithmetic mean of member square footage.
    pub average_sqft: f64,
    /// Number of member properties.
    pub property_count: usize,
}

impl ClusterMetrics {
    /// Computes metrics over a non-empty member set.
    #[must_use]
    pub fn from_properties(properties: &[Property]) -> Self {
        let count = properties.len();
        let price_sum: Decimal = properties.iter().map(|p| p.price).sum();
        let sqft_sum: u64 = properties.iter().map(|p| u64::from(p.sqft)).sum();

        let average_price = if count == 0 {
            Decimal::ZERO
        } else {
            price_sum / Decimal::from(count as u64)
        };
        let average_sqft = if count == 0 {
            0.0
        } else {
            sqft_sum as f64 / count as f64
        };

        Self {
            average_price,
            average_sqft,
            property_count: count,
        }
    }
}

/// Per-factor similarity averages over the qualifying edges inside a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSimilarity {
    /// Mean price factor across in-cluster edges.
    pub average_price_score: f64,
    /// Mean size factor across in-cluster edges.
    pub average_size_score: f64,
    /// Mean location factor across in-cluster edges.
    pub average_location_score: f64,
    /// Mean amenity factor across in-cluster edges.
    pub average_amenity_score: f64,
}

impl ClusterSimilarity {
    /// Averages factor scores over the given edges. Returns `None` for an
    /// empty edge list rather than dividing by zero.
    #[must_use]
    pub fn from_edges(edges: &[SimilarityEdge]) -> Option<Self> {
        if edges.is_empty() {
            return None;
        }
        let n = edges.len() as f64;
        Some(Self {
            average_price_score: edges.iter().map(|e| e.factors.price).sum::<f64>() / n,
            average_size_score: edges.iter().map(|e| e.factors.size).sum::<f64>() / n,
            average_location_score: edges.iter().map(|e| e.factors.location).sum::<f64>() / n,
            average_amenity_score: edges.iter().map(|e| e.factors.amenity).sum::<f64>() / n,
        })
    }
}

/// A group of transitively-similar properties with geographic and
/// statistical summaries.
///
/// Derived data: clusters are rebuilt from the current edge set on every
/// request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCluster {
    /// Identifier assigned when the cluster was built.
    pub id: ClusterId,
    /// Member property ids, sorted and unique.
    pub property_ids: Vec<PropertyId>,
    /// Full member records.
    pub properties: Vec<Property>,
    /// Mean composite score of the qualifying edges inside this cluster.
    pub avg_similarity: f64,
    /// Centroid and radius of the member set.
    pub geography: ClusterGeography,
    /// Aggregate member statistics.
    pub metrics: ClusterMetrics,
    /// Averaged factor scores over in-cluster edges, when any exist.
    pub similarity: Option<ClusterSimilarity>,
    /// When this cluster was assembled.
    pub built_at: DateTime<Utc>,
}

impl PropertyCluster {
    /// Assembles a cluster from its members, in-cluster edges, and the
    /// pre-computed geographic summary.
    ///
    /// Member ids are sorted and deduplicated; metrics and factor averages
    /// are derived here so they always agree with the member set.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TooFewMembers`] for fewer than two members;
    /// singleton clusters are never built.
    pub fn try_new(
        mut properties: Vec<Property>,
        edges: &[SimilarityEdge],
        geography: ClusterGeography,
    ) -> Result<Self, DomainError> {
        properties.sort_by(|a, b| a.id.cmp(&b.id));
        properties.dedup_by(|a, b| a.id == b.id);

        if properties.len() < 2 {
            return Err(DomainError::TooFewMembers {
                count: properties.len(),
            });
        }

        let property_ids: Vec<PropertyId> = properties.iter().map(|p| p.id.clone()).collect();
        let metrics = ClusterMetrics::from_properties(&properties);
        let similarity = ClusterSimilarity::from_edges(edges);
        let avg_similarity = if edges.is_empty() {
            0.0
        } else {
            edges.iter().map(|e| e.score).sum::<f64>() / edges.len() as f64
        };

        Ok(Self {
            id: ClusterId::new(),
            property_ids,
            properties,
            avg_similarity,
            geography,
            metrics,
            similarity,
            built_at: Utc::now(),
        })
    }

    /// True if this cluster contains the given property.
    #[must_use]
    pub fn contains_property(&self, id: &PropertyId) -> bool {
        self.property_ids.binary_search(id).is_ok()
    }

    /// Number of member properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.property_ids.len()
    }
}
