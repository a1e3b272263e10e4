//! Amenity-weighted walkability scoring for a single property.
//!
//! Each recognized amenity type within the lookup radius contributes a
//! score that falls off linearly with the distance to the nearest instance,
//! weighted by the type's importance. The sum is normalized against the
//! maximum achievable for the types actually present, giving an integer
//! percentage in 0-100.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::PropertyId;
use crate::error::{Error, Result};
use crate::geo::Geometry;
use crate::port::PropertyStore;

/// Weighting for one amenity type in the walk-score calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityWeight {
    /// Amenity category tag this weighting applies to.
    pub kind: String,
    /// Relative importance of the type.
    pub weight: f64,
    /// Distance in meters at which the type's contribution reaches zero.
    pub max_distance_m: f64,
}

impl AmenityWeight {
    fn new(kind: &str, weight: f64, max_distance_m: f64) -> Self {
        Self {
            kind: kind.to_string(),
            weight,
            max_distance_m,
        }
    }
}

/// Walk-score configuration: lookup radius and the per-type weight table.
///
/// An explicit value passed into the computation, never module state, so the
/// calculation stays pure and independently testable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkScoreConfig {
    /// How far around the property to look for amenities, in meters.
    pub lookup_radius_m: f64,
    /// Per-type weights; types absent from this table are ignored.
    pub weights: Vec<AmenityWeight>,
}

impl Default for WalkScoreConfig {
    fn default() -> Self {
        Self {
            lookup_radius_m: 1500.0,
            weights: vec![
                AmenityWeight::new("grocery", 3.0, 1000.0),
                AmenityWeight::new("transit_station", 2.0, 800.0),
                AmenityWeight::new("school", 2.0, 1200.0),
                AmenityWeight::new("restaurant", 1.5, 1000.0),
                AmenityWeight::new("park", 1.5, 1000.0),
                AmenityWeight::new("retail", 1.0, 800.0),
            ],
        }
    }
}

impl WalkScoreConfig {
    fn weight_for(&self, kind: &str) -> Option<&AmenityWeight> {
        self.weights.iter().find(|w| w.kind == kind)
    }
}

/// Count and nearest distance for one amenity type around a property.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TypeProximity {
    count: usize,
    min_distance_m: f64,
}

/// Score the given per-type proximities against a weight table.
///
/// Returns an integer percentage in 0-100; a property with no recognized
/// amenity type nearby scores 0 rather than dividing by zero.
fn normalize(proximities: &HashMap<String, TypeProximity>, config: &WalkScoreConfig) -> u8 {
    let mut total = 0.0;
    let mut max_possible = 0.0;

    for (kind, proximity) in proximities {
        let Some(weight) = config.weight_for(kind) else {
            continue;
        };

        max_possible += weight.weight * 100.0;
        let distance_score =
            (1.0 - proximity.min_distance_m / weight.max_distance_m).max(0.0) * 100.0;
        total += distance_score * weight.weight;
    }

    if max_possible == 0.0 {
        return 0;
    }
    (total / max_possible * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Computes walk scores through the store and geometry ports.
pub struct WalkScoreEngine<S, G> {
    store: Arc<S>,
    geometry: G,
    config: WalkScoreConfig,
}

impl<S: PropertyStore, G: Geometry> WalkScoreEngine<S, G> {
    /// Create an engine over the given store and geometry.
    pub fn new(store: Arc<S>, geometry: G, config: WalkScoreConfig) -> Self {
        Self {
            store,
            geometry,
            config,
        }
    }

    /// Compute the walk score for a property, 0-100.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the property id has no stored record.
    pub async fn calculate(&self, id: &PropertyId) -> Result<u8> {
        let properties = self
            .store
            .get_properties_by_ids(std::slice::from_ref(id))
            .await?;
        let property = properties
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(id.as_str()))?;

        let amenities = self
            .store
            .list_amenities_near(property.location, self.config.lookup_radius_m)
            .await?;

        let mut proximities: HashMap<String, TypeProximity> = HashMap::new();
        for amenity in &amenities {
            let distance_m = self
                .geometry
                .distance_m(property.location, amenity.location)?;
            proximities
                .entry(amenity.kind.clone())
                .and_modify(|p| {
                    p.count += 1;
                    p.min_distance_m = p.min_distance_m.min(distance_m);
                })
                .or_insert(TypeProximity {
                    count: 1,
                    min_distance_m: distance_m,
                });
        }

        let score = normalize(&proximities, &self.config);
        debug!(
            property = %id,
            amenities = amenities.len(),
            types = proximities.len(),
            score,
            "walk score computed"
        );
        Ok(score)
    }
}
