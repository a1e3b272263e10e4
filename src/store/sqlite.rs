//! SQLite store implementation using Diesel.

use diesel::prelude::*;

use crate::db::model::{AmenityRow, PropertyRow, SimilarityRow};
use crate::db::schema::{amenities, properties, property_similarities};
use crate::db::DbPool;
use crate::domain::{Amenity, GeoPoint, Property, PropertyId, SimilarityEdge};
use crate::error::{Error, Result};
use crate::geo::{FlatProjection, Geometry};
use crate::port::PropertyStore;

/// SQLite-backed [`PropertyStore`].
///
/// Spatial filtering happens in process with the flat projection; plain
/// SQLite has no spatial index and the data sets this engine targets do not
/// need one.
pub struct SqliteStore {
    pool: DbPool,
    geometry: FlatProjection,
}

impl SqliteStore {
    /// Create a new SQLite store over a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            geometry: FlatProjection::new(),
        }
    }

    /// Insert or replace a property record. Listings are owned by the
    /// external management subsystem; this exists for seeding and tests.
    pub fn upsert_property(&self, property: &Property) -> Result<()> {
        let row = PropertyRow::from_domain(property)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(properties::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    /// Insert or replace an amenity record.
    pub fn upsert_amenity(&self, amenity: &Amenity) -> Result<()> {
        let row = AmenityRow::from_domain(amenity);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(amenities::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}

impl PropertyStore for SqliteStore {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<PropertyRow> = properties::table
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(PropertyRow::into_domain).collect()
    }

    async fn list_amenities_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<Amenity>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<AmenityRow> = amenities::table
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut nearby = Vec::new();
        for amenity in rows.into_iter().map(AmenityRow::into_domain) {
            if self.geometry.distance_m(point, amenity.location)? <= radius_m {
                nearby.push(amenity);
            }
        }
        Ok(nearby)
    }

    async fn replace_similarity_edges(&self, edges: &[SimilarityEdge]) -> Result<()> {
        let rows: Vec<SimilarityRow> = edges.iter().map(SimilarityRow::from_domain).collect();
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        // Delete-then-insert in one transaction: readers never observe a
        // half-replaced edge set, and a failed insert rolls the delete back.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(property_similarities::table).execute(conn)?;
            diesel::insert_into(property_similarities::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_similarity_edges(&self, min_score: f64) -> Result<Vec<SimilarityEdge>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<SimilarityRow> = property_similarities::table
            .filter(property_similarities::score.ge(min_score))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(SimilarityRow::into_domain).collect()
    }

    async fn get_properties_by_ids(&self, ids: &[PropertyId]) -> Result<Vec<Property>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let id_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let rows: Vec<PropertyRow> = properties::table
            .filter(properties::id.eq_any(&id_strings))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(PropertyRow::into_domain).collect()
    }
}
