//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests). Provides concise factories for domain primitives so
//! tests focus on assertions rather than construction boilerplate.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    Amenity, AmenityId, GeoPoint, Property, PropertyId, SimilarityEdge, SimilarityFactors,
};

/// A property at the given location with otherwise typical fields.
pub fn property_at(id: &str, lon: f64, lat: f64) -> Property {
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

/// A property with explicit price and size at the given location.
pub fn property_with(id: &str, price: Decimal, sqft: u32, lon: f64, lat: f64) -> Property {
    Property {
        price,
        sqft,
        ..property_at(id, lon, lat)
    }
}

/// An amenity of the given kind at a location.
pub fn amenity_at(id: &str, kind: &str, lon: f64, lat: f64) -> Amenity {
    Amenity {
        id: AmenityId::new(id),
        name: format!("{kind} {id}"),
        kind: kind.to_string(),
        location: GeoPoint::new(lon, lat),
    }
}

/// A similarity edge with uniform factor scores.
pub fn edge(a: &str, b: &str, score: f64) -> SimilarityEdge {
    SimilarityEdge {
        property_id: PropertyId::new(a),
        similar_property_id: PropertyId::new(b),
        score,
        factors: SimilarityFactors::new(score, score, score, score),
        computed_at: Utc::now(),
    }
}

/// Offset in degrees of latitude that is approximately `meters` on the
/// ground, for laying out test fixtures by distance.
#[must_use]
pub fn meters_as_lat_degrees(meters: f64) -> f64 {
    meters / 111_320.0
}
