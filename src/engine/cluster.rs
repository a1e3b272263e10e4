//! Cluster discovery over the stored similarity edge set.
//!
//! Edges at or above the caller's minimum score form an undirected graph
//! over property ids. Connected components are found with a union-find
//! keyed by property id, which yields a disjoint partition by construction:
//! no property can land in two clusters, so no corrective merge pass exists.
//! Each component is then enriched with member records, a geographic
//! summary, and aggregate metrics.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use petgraph::unionfind::UnionFind;
use tracing::{debug, info};

use crate::domain::{
    ClusterGeography, GeoPoint, Property, PropertyCluster, PropertyId, SimilarityEdge,
};
use crate::error::{Error, Result};
use crate::geo::Geometry;
use crate::port::PropertyStore;

/// Builds enriched, disjoint property clusters from stored similarity edges.
///
/// A pure, stateless computation over the current edge set and property
/// table: re-running with identical inputs yields an identical result.
pub struct ClusterBuilder<S, G> {
    store: Arc<S>,
    geometry: G,
}

impl<S: PropertyStore, G: Geometry> ClusterBuilder<S, G> {
    /// Create a builder over the given store and geometry.
    pub fn new(store: Arc<S>, geometry: G) -> Self {
        Self { store, geometry }
    }

    /// Group properties transitively connected by edges scoring at least
    /// `min_similarity` into enriched clusters.
    ///
    /// Properties with no qualifying edge belong to no cluster; singletons
    /// are never emitted. Output is sorted by each cluster's smallest
    /// member id for deterministic ordering.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when `min_similarity` is outside (0, 1]
    /// - [`Error::NotFound`] when an edge references a property id with no
    ///   stored record
    pub async fn find_clusters(&self, min_similarity: f64) -> Result<Vec<PropertyCluster>> {
        if !(min_similarity > 0.0 && min_similarity <= 1.0) {
            return Err(Error::validation(
                "min_similarity",
                format!("must be in (0, 1], got {min_similarity}"),
            ));
        }

        let edges = self.store.list_similarity_edges(min_similarity).await?;
        if edges.is_empty() {
            info!(min_similarity, "no qualifying edges, no clusters");
            return Ok(Vec::new());
        }

        // Stable node numbering: sorted unique ids from the edge endpoints.
        let ids: Vec<PropertyId> = edges
            .iter()
            .flat_map(|e| [e.property_id.clone(), e.similar_property_id.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<&PropertyId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

        let mut components: UnionFind<usize> = UnionFind::new(ids.len());
        for edge in &edges {
            components.union(index[&edge.property_id], index[&edge.similar_property_id]);
        }

        // Every qualifying edge lies inside exactly one component.
        let mut member_ids: HashMap<usize, Vec<PropertyId>> = HashMap::new();
        for (i, id) in ids.iter().enumerate() {
            member_ids
                .entry(components.find(i))
                .or_default()
                .push(id.clone());
        }
        let mut component_edges: HashMap<usize, Vec<SimilarityEdge>> = HashMap::new();
        for edge in edges {
            let root = components.find(index[&edge.property_id]);
            component_edges.entry(root).or_default().push(edge);
        }

        debug!(
            components = member_ids.len(),
            properties = ids.len(),
            "connected components discovered"
        );

        let records = self.store.get_properties_by_ids(&ids).await?;
        let mut by_id: HashMap<PropertyId, Property> =
            records.into_iter().map(|p| (p.id.clone(), p)).collect();

        let mut clusters = Vec::with_capacity(member_ids.len());
        for (root, ids) in member_ids {
            let members: Vec<Property> = ids
                .iter()
                .map(|id| {
                    by_id
                        .remove(id)
                        .ok_or_else(|| Error::not_found(id.as_str()))
                })
                .collect::<Result<_>>()?;

            let in_edges = component_edges.remove(&root).unwrap_or_default();
            let geography = self.summarize_geography(&members)?;
            clusters.push(PropertyCluster::try_new(members, &in_edges, geography)?);
        }

        clusters.sort_by(|a, b| a.property_ids[0].cmp(&b.property_ids[0]));

        info!(
            clusters = clusters.len(),
            min_similarity, "property clusters built"
        );
        Ok(clusters)
    }

    fn summarize_geography(&self, members: &[Property]) -> Result<ClusterGeography> {
        let points: Vec<GeoPoint> = members.iter().map(|p| p.location).collect();
        let centroid = self.geometry.centroid(&points)?;

        let mut max_m: f64 = 0.0;
        for &point in &points {
            max_m = max_m.max(self.geometry.distance_m(centroid, point)?);
        }

        Ok(ClusterGeography {
            centroid,
            radius_km: max_m / 1000.0,
        })
    }
}
