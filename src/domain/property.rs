//! Property and amenity records consumed by the similarity engine.
//!
//! These records are owned by the external listing-management subsystem and
//! are immutable for the duration of a similarity computation pass. The
//! engine only ever reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AmenityId, PropertyId};

/// A geographic point in WGS-84 degrees (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new point from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns true if both coordinates are finite and within WGS-84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// A geolocated real-estate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique listing identifier.
    pub id: PropertyId,
    /// Street address.
    pub address: String,
    /// Asking price in the listing currency.
    pub price: Decimal,
    /// Interior size in square feet.
    pub sqft: u32,
    /// Bedroom count.
    pub bedrooms: u32,
    /// Bathroom count.
    pub bathrooms: u32,
    /// Geographic location.
    pub location: GeoPoint,
}

/// A point of interest near properties (grocery, park, transit stop, ...).
///
/// Read-only input to amenity similarity and walk-score computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    /// Unique amenity identifier.
    pub id: AmenityId,
    /// Display name.
    pub name: String,
    /// Category tag, e.g. `"grocery"`, `"park"`, `"transit_station"`.
    pub kind: String,
    /// Geographic location.
    pub location: GeoPoint,
}
