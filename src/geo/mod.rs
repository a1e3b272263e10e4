//! Injected geometry capability for distance and centroid computation.
//!
//! The similarity and clustering engines never hard-wire a spatial backend;
//! they go through the [`Geometry`] trait so the core logic is testable
//! without a live spatial data store. The default implementation is a flat
//! (equirectangular) projection, which keeps distance linear in meters over
//! the few-kilometer radii this engine works at.

use crate::domain::GeoPoint;
use crate::error::{Error, Result};

/// Kilometers per degree of latitude; the fixed factor used to convert
/// degree deltas to metric distance.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Metric geometry over WGS-84 points.
///
/// Implementations must report distances in meters and compute centroids as
/// mean positions. Malformed coordinates surface as
/// [`Error::Computation`] so a bulk pass can abort cleanly.
pub trait Geometry: Send + Sync {
    /// Planar distance between two points, in meters.
    fn distance_m(&self, a: GeoPoint, b: GeoPoint) -> Result<f64>;

    /// Mean position of a non-empty point set.
    fn centroid(&self, points: &[GeoPoint]) -> Result<GeoPoint>;
}

/// Equirectangular projection: degree deltas scaled to meters with the
/// longitude axis corrected by the cosine of the mean latitude.
///
/// Accurate to well under a percent at the sub-10 km scales the engine
/// operates on, and cheap enough to run over every candidate pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatProjection;

impl FlatProjection {
    /// Create a new flat projection.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check(point: GeoPoint) -> Result<GeoPoint> {
        if point.is_valid() {
            Ok(point)
        } else {
            Err(Error::Computation(format!(
                "malformed coordinates: lon={}, lat={}",
                point.lon, point.lat
            )))
        }
    }
}

impl Geometry for FlatProjection {
    fn distance_m(&self, a: GeoPoint, b: GeoPoint) -> Result<f64> {
        let a = Self::check(a)?;
        let b = Self::check(b)?;

        let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();
        let dx_km = (a.lon - b.lon) * mean_lat.cos() * KM_PER_DEGREE;
        let dy_km = (a.lat - b.lat) * KM_PER_DEGREE;

        Ok((dx_km * dx_km + dy_km * dy_km).sqrt() * 1000.0)
    }

    fn centroid(&self, points: &[GeoPoint]) -> Result<GeoPoint> {
        if points.is_empty() {
            return Err(Error::Computation(
                "centroid of empty point set".to_string(),
            ));
        }
        let mut lon = 0.0;
        let mut lat = 0.0;
        for &p in points {
            let p = Self::check(p)?;
            lon += p.lon;
            lat += p.lat;
        }
        let n = points.len() as f64;
        Ok(GeoPoint::new(lon / n, lat / n))
    }
}
