//! Point-radius property search and neighborhood demographics.
//!
//! Two read-only lookups over the store port: properties within a radius of
//! a point (each carrying its distance and the amenities around it), and
//! aggregate price/size statistics for the 1 km neighborhood of a single
//! property.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Amenity, GeoPoint, Property, PropertyId};
use crate::error::{Error, Result};
use crate::geo::Geometry;
use crate::port::PropertyStore;

/// Radius around each matched property searched for amenities, in meters.
pub const NEARBY_AMENITY_RADIUS_M: f64 = 1000.0;

/// Neighborhood buffer radius for demographics, in meters.
pub const DEMOGRAPHICS_RADIUS_M: f64 = 1000.0;

/// One property matched by a radius search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyProperty {
    /// The matched listing.
    pub property: Property,
    /// Distance from the search point to the listing, in meters.
    pub distance_m: f64,
    /// Amenities within [`NEARBY_AMENITY_RADIUS_M`] of the listing.
    pub nearby_amenities: Vec<Amenity>,
}

/// Aggregate statistics over the properties in a neighborhood buffer.
///
/// The subject property always lies inside its own buffer, so the
/// aggregates cover at least one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodDemographics {
    /// Number of properties inside the buffer, subject included.
    pub total_properties: usize,
    /// Arithmetic mean price.
    pub average_price: Decimal,
    /// Median price; the mean of the two middle values for even counts.
    pub median_price: Decimal,
    /// Arithmetic mean square footage.
    pub average_sqft: f64,
}

fn median_price(prices: &mut [Decimal]) -> Decimal {
    prices.sort();
    let n = prices.len();
    if n % 2 == 1 {
        prices[n / 2]
    } else {
        (prices[n / 2 - 1] + prices[n / 2]) / Decimal::from(2)
    }
}

/// Answers point-radius and neighborhood-statistics queries.
pub struct SpatialEngine<S, G> {
    store: Arc<S>,
    geometry: G,
}

impl<S: PropertyStore, G: Geometry> SpatialEngine<S, G> {
    /// Create an engine over the given store and geometry.
    pub fn new(store: Arc<S>, geometry: G) -> Self {
        Self { store, geometry }
    }

    /// Find properties within `radius_km` of a point, nearest first.
    ///
    /// Each match carries its distance from the search point and the
    /// amenities within one kilometer of the listing itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `radius_km` is not positive, and
    /// [`Error::Computation`] when the search point is malformed.
    pub async fn find_properties_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbyProperty>> {
        if !(radius_km > 0.0) {
            return Err(Error::validation(
                "radius",
                format!("must be > 0 km, got {radius_km}"),
            ));
        }

        let radius_m = radius_km * 1000.0;
        let properties = self.store.list_properties().await?;

        let mut matches = Vec::new();
        for property in properties {
            let distance_m = self.geometry.distance_m(center, property.location)?;
            if distance_m > radius_m {
                continue;
            }
            let nearby_amenities = self
                .store
                .list_amenities_near(property.location, NEARBY_AMENITY_RADIUS_M)
                .await?;
            matches.push(NearbyProperty {
                property,
                distance_m,
                nearby_amenities,
            });
        }

        matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        debug!(
            matches = matches.len(),
            radius_km, "radius search completed"
        );
        Ok(matches)
    }

    /// Aggregate price and size statistics over the properties within one
    /// kilometer of the given property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the property id has no stored record.
    pub async fn demographics(&self, id: &PropertyId) -> Result<NeighborhoodDemographics> {
        let subject = self
            .store
            .get_properties_by_ids(std::slice::from_ref(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(id.as_str()))?;

        let mut neighbors: Vec<Property> = Vec::new();
        for property in self.store.list_properties().await? {
            let distance_m = self
                .geometry
                .distance_m(subject.location, property.location)?;
            if distance_m <= DEMOGRAPHICS_RADIUS_M {
                neighbors.push(property);
            }
        }

        // The subject is 0 m from itself, so the buffer is never empty.
        let count = neighbors.len();
        let price_sum: Decimal = neighbors.iter().map(|p| p.price).sum();
        let sqft_sum: u64 = neighbors.iter().map(|p| u64::from(p.sqft)).sum();
        let mut prices: Vec<Decimal> = neighbors.iter().map(|p| p.price).collect();

        Ok(NeighborhoodDemographics {
            total_properties: count,
            average_price: price_sum / Decimal::from(count as u64),
            median_price: median_price(&mut prices),
            average_sqft: sqft_sum as f64 / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn median_of_odd_count_is_middle_value() {
        let mut prices = vec![dec!(300000), dec!(100000), dec!(200000)];
        assert_eq!(median_price(&mut prices), dec!(200000));
    }

    #[test]
    fn median_of_even_count_averages_the_middle_pair() {
        let mut prices = vec![dec!(400000), dec!(100000), dec!(200000), dec!(300000)];
        assert_eq!(median_price(&mut prices), dec!(250000));
    }

    #[test]
    fn median_of_single_value_is_that_value() {
        let mut prices = vec![dec!(725000)];
        assert_eq!(median_price(&mut prices), dec!(725000));
    }
}
