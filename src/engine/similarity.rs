//! Pairwise similarity scoring and the bulk similarity pass.
//!
//! Scoring combines four normalized factors:
//!
//! - **price** - relative price difference
//! - **size** - relative square-footage difference
//! - **location** - planar distance against the configured radius cap
//! - **amenity** - overlap of nearby amenity types, counted with multiplicity
//!
//! The bulk pass ([`SimilarityEngine::update_similarities`]) scores every
//! unordered pair within the caller's radius, keeps pairs scoring above the
//! fixed acceptance threshold, and atomically replaces the stored edge set.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{PairScore, Property, SimilarityEdge, SimilarityFactors, SimilarityWeights};
use crate::error::{Error, Result};
use crate::geo::Geometry;
use crate::port::PropertyStore;

/// Per-pass scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityConfig {
    /// Geographic radius cap in kilometers. Pairs farther apart than this
    /// are not scored, and the location factor is normalized against the
    /// whole-kilometer truncation of this value.
    pub max_radius_km: f64,
    /// Factor weights; must sum to exactly 1.0.
    pub weights: SimilarityWeights,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_radius_km: 2.0,
            weights: SimilarityWeights::default(),
        }
    }
}

impl SimilarityConfig {
    /// The location normalization cap in meters: the radius truncated to
    /// whole kilometers.
    #[must_use]
    pub fn location_cap_m(&self) -> f64 {
        self.max_radius_km.trunc() * 1000.0
    }
}

/// Per-type counts of amenities near one property.
pub type AmenityTally = HashMap<String, usize>;

/// Count amenity kinds with multiplicity.
pub fn tally_amenities<'a>(kinds: impl IntoIterator<Item = &'a str>) -> AmenityTally {
    let mut tally = AmenityTally::new();
    for kind in kinds {
        *tally.entry(kind.to_string()).or_insert(0) += 1;
    }
    tally
}

fn ratio_score(diff: f64, max: f64) -> f64 {
    if max <= 0.0 {
        // Both values are zero: identical on this dimension.
        1.0
    } else {
        1.0 - (diff / max).min(1.0)
    }
}

fn decimal_ratio_score(a: Decimal, b: Decimal) -> f64 {
    let max = a.max(b);
    if max.is_zero() {
        return 1.0;
    }
    let ratio = ((a - b).abs() / max).to_f64().unwrap_or(1.0);
    1.0 - ratio.min(1.0)
}

fn location_score(distance_m: f64, cap_m: f64) -> f64 {
    if cap_m <= 0.0 {
        // Radius below one kilometer truncates to a zero cap.
        0.0
    } else {
        (1.0 - distance_m / cap_m).max(0.0)
    }
}

fn amenity_score(a: &AmenityTally, b: &AmenityTally) -> f64 {
    let total_a: usize = a.values().sum();
    let total_b: usize = b.values().sum();
    let denom = total_a.max(total_b);
    if denom == 0 {
        return 0.0;
    }

    let shared: usize = a
        .iter()
        .filter_map(|(kind, &count_a)| b.get(kind).map(|&count_b| count_a.min(count_b)))
        .sum();

    shared as f64 / denom as f64
}

/// Score one ordered pair of properties.
///
/// Pure given the pre-computed planar distance and per-property amenity
/// tallies; the result is keyed by the pair as given.
///
/// # Errors
///
/// Returns a weight-validation error when `config.weights` does not sum to
/// exactly 1.0, before anything is computed.
pub fn score_pair(
    a: &Property,
    b: &Property,
    tally_a: &AmenityTally,
    tally_b: &AmenityTally,
    distance_m: f64,
    config: &SimilarityConfig,
) -> Result<PairScore> {
    config.weights.validate()?;

    let factors = SimilarityFactors {
        price: decimal_ratio_score(a.price, b.price),
        size: ratio_score(
            (f64::from(a.sqft) - f64::from(b.sqft)).abs(),
            f64::from(a.sqft.max(b.sqft)),
        ),
        location: location_score(distance_m, config.location_cap_m()),
        amenity: amenity_score(tally_a, tally_b),
    };

    Ok(PairScore {
        property_id: a.id.clone(),
        similar_property_id: b.id.clone(),
        score: factors.composite(&config.weights),
        factors,
    })
}

/// Computes pairwise similarity and maintains the derived edge set.
pub struct SimilarityEngine<S, G> {
    store: Arc<S>,
    geometry: G,
    config: SimilarityConfig,
}

impl<S: PropertyStore, G: Geometry> SimilarityEngine<S, G> {
    /// Create an engine over the given store and geometry.
    pub fn new(store: Arc<S>, geometry: G, config: SimilarityConfig) -> Self {
        Self {
            store,
            geometry,
            config,
        }
    }

    /// The engine's scoring configuration.
    #[must_use]
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    async fn amenity_tally(&self, property: &Property, radius_m: f64) -> Result<AmenityTally> {
        let amenities = self
            .store
            .list_amenities_near(property.location, radius_m)
            .await?;
        Ok(tally_amenities(amenities.iter().map(|a| a.kind.as_str())))
    }

    /// Score a single pair using the engine's configuration, fetching amenity
    /// tallies through the store.
    pub async fn pair_score(&self, a: &Property, b: &Property) -> Result<PairScore> {
        let cap_m = self.config.location_cap_m();
        let tally_a = self.amenity_tally(a, cap_m).await?;
        let tally_b = self.amenity_tally(b, cap_m).await?;
        let distance_m = self.geometry.distance_m(a.location, b.location)?;
        score_pair(a, b, &tally_a, &tally_b, distance_m, &self.config)
    }

    /// Recompute and persist the full similarity edge set.
    ///
    /// Every unordered pair of distinct properties within `max_radius_km` is
    /// scored with the engine's default weights; pairs with composite score
    /// above the acceptance threshold are kept. The stored edge set is
    /// replaced wholesale in one transaction, so an error from any single
    /// pair aborts the pass with nothing persisted.
    ///
    /// Returns the retained edges for immediate use by the caller.
    pub async fn update_similarities(&self, max_radius_km: f64) -> Result<Vec<SimilarityEdge>> {
        if !(max_radius_km > 0.0) {
            return Err(Error::validation(
                "max_radius",
                format!("must be > 0 km, got {max_radius_km}"),
            ));
        }

        let config = SimilarityConfig {
            max_radius_km,
            weights: self.config.weights,
        };

        let mut properties = self.store.list_properties().await?;
        properties.sort_by(|a, b| a.id.cmp(&b.id));

        // One amenity lookup per property, shared across all of its pairs.
        let amenity_radius_m = config.location_cap_m();
        let mut tallies: Vec<AmenityTally> = Vec::with_capacity(properties.len());
        for property in &properties {
            tallies.push(self.amenity_tally(property, amenity_radius_m).await?);
        }

        let prefilter_m = max_radius_km * 1000.0;
        let computed_at = Utc::now();
        let mut retained = Vec::new();
        let mut scored = 0usize;

        for i in 0..properties.len() {
            for j in (i + 1)..properties.len() {
                let (a, b) = (&properties[i], &properties[j]);
                let distance_m = self.geometry.distance_m(a.location, b.location)?;
                if distance_m > prefilter_m {
                    continue;
                }

                scored += 1;
                let pair = score_pair(a, b, &tallies[i], &tallies[j], distance_m, &config)?;
                if pair.is_retained() {
                    retained.push(pair.into_edge(computed_at));
                }
            }
        }

        debug!(
            properties = properties.len(),
            scored, "similarity pass scored in-radius pairs"
        );

        self.store.replace_similarity_edges(&retained).await?;
        info!(
            retained = retained.len(),
            max_radius_km, "similarity edge set replaced"
        );

        Ok(retained)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{GeoPoint, PropertyId};

    fn property(id: &str, price: Decimal, sqft: u32) -> Property {
        Property {
            id: PropertyId::new(id),
            address: format!("{id} Main St"),
            price,
            sqft,
            bedrooms: 3,
            bathrooms: 2,
            location: GeoPoint::new(-122.4, 37.7),
        }
    }

    #[test]
    fn identical_pair_scores_one_on_every_factor() {
        let p = property("a", dec!(500000), 1200);
        let q = property("b", dec!(500000), 1200);
        let tally = tally_amenities(["grocery", "park"]);

        let score = score_pair(&p, &q, &tally, &tally, 0.0, &SimilarityConfig::default()).unwrap();

        assert_eq!(score.factors.price, 1.0);
        assert_eq!(score.factors.size, 1.0);
        assert_eq!(score.factors.location, 1.0);
        assert_eq!(score.factors.amenity, 1.0);
        assert_eq!(score.score, 1.0);
    }

    #[test]
    fn invalid_weights_fail_before_scoring() {
        let p = property("a", dec!(500000), 1200);
        let q = property("b", dec!(500000), 1200);
        let config = SimilarityConfig {
            max_radius_km: 2.0,
            weights: SimilarityWeights {
                price: 0.5,
                size: 0.5,
                location: 0.5,
                amenity: 0.5,
            },
        };

        let result = score_pair(
            &p,
            &q,
            &AmenityTally::new(),
            &AmenityTally::new(),
            0.0,
            &config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn price_score_is_relative_difference() {
        let p = property("a", dec!(400000), 1000);
        let q = property("b", dec!(500000), 1000);

        let score = score_pair(
            &p,
            &q,
            &AmenityTally::new(),
            &AmenityTally::new(),
            0.0,
            &SimilarityConfig::default(),
        )
        .unwrap();

        // |400k - 500k| / 500k = 0.2
        assert!((score.factors.price - 0.8).abs() < 1e-12);
    }

    #[test]
    fn wildly_different_prices_floor_at_zero() {
        let p = property("a", dec!(1), 1000);
        let q = property("b", dec!(100000000), 1000);

        let score = score_pair(
            &p,
            &q,
            &AmenityTally::new(),
            &AmenityTally::new(),
            0.0,
            &SimilarityConfig::default(),
        )
        .unwrap();

        assert!(score.factors.price >= 0.0 && score.factors.price < 0.001);
    }

    #[test]
    fn location_score_decreases_with_distance_and_clamps() {
        let config = SimilarityConfig::default(); // cap 2 km
        let near = location_score(500.0, config.location_cap_m());
        let far = location_score(1500.0, config.location_cap_m());
        let beyond = location_score(20_000.0, config.location_cap_m());

        assert!(near > far);
        assert_eq!(beyond, 0.0);
    }

    #[test]
    fn sub_kilometer_radius_truncates_to_zero_cap() {
        let config = SimilarityConfig {
            max_radius_km: 0.9,
            weights: SimilarityWeights::default(),
        };
        assert_eq!(config.location_cap_m(), 0.0);
        assert_eq!(location_score(10.0, config.location_cap_m()), 0.0);
    }

    #[test]
    fn amenity_score_counts_shared_types_with_multiplicity() {
        let a = tally_amenities(["grocery", "grocery", "park", "transit_station"]);
        let b = tally_amenities(["grocery", "park", "park"]);

        // shared = min(2,1) + min(1,2) = 2; denom = max(4, 3) = 4
        assert!((amenity_score(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn amenity_score_zero_when_nothing_nearby() {
        let empty = AmenityTally::new();
        let busy = tally_amenities(["grocery", "park"]);

        assert_eq!(amenity_score(&empty, &busy), 0.0);
        assert_eq!(amenity_score(&empty, &empty), 0.0);
    }

    #[test]
    fn amenity_score_zero_without_shared_types() {
        let a = tally_amenities(["grocery"]);
        let b = tally_amenities(["park"]);
        assert_eq!(amenity_score(&a, &b), 0.0);
    }

    #[test]
    fn zero_priced_pair_counts_as_identical() {
        assert_eq!(decimal_ratio_score(Decimal::ZERO, Decimal::ZERO), 1.0);
    }
}
