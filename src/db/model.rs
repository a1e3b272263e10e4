//! Row models mapping Diesel tables to domain types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{amenities, properties, property_similarities};
use crate::domain::{
    Amenity, AmenityId, GeoPoint, Property, PropertyId, SimilarityEdge, SimilarityFactors,
};
use crate::error::{Error, Result};

/// A row in the `properties` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = properties)]
pub struct PropertyRow {
    pub id: String,
    pub address: String,
    pub price: String,
    pub sqft: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub lon: f64,
    pub lat: f64,
}

impl PropertyRow {
    pub fn from_domain(property: &Property) -> Result<Self> {
        Ok(Self {
            id: property.id.to_string(),
            address: property.address.clone(),
            price: property.price.to_string(),
            sqft: i32::try_from(property.sqft).map_err(|e| Error::Parse(e.to_string()))?,
            bedrooms: i32::try_from(property.bedrooms).map_err(|e| Error::Parse(e.to_string()))?,
            bathrooms: i32::try_from(property.bathrooms)
                .map_err(|e| Error::Parse(e.to_string()))?,
            lon: property.location.lon,
            lat: property.location.lat,
        })
    }

    pub fn into_domain(self) -> Result<Property> {
        Ok(Property {
            id: PropertyId::from(self.id),
            address: self.address,
            price: Decimal::from_str(&self.price).map_err(|e| Error::Parse(e.to_string()))?,
            sqft: u32::try_from(self.sqft).map_err(|e| Error::Parse(e.to_string()))?,
            bedrooms: u32::try_from(self.bedrooms).map_err(|e| Error::Parse(e.to_string()))?,
            bathrooms: u32::try_from(self.bathrooms).map_err(|e| Error::Parse(e.to_string()))?,
            location: GeoPoint::new(self.lon, self.lat),
        })
    }
}

/// A row in the `amenities` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = amenities)]
pub struct AmenityRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub lon: f64,
    pub lat: f64,
}

impl AmenityRow {
    pub fn from_domain(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id.to_string(),
            name: amenity.name.clone(),
            kind: amenity.kind.clone(),
            lon: amenity.location.lon,
            lat: amenity.location.lat,
        }
    }

    pub fn into_domain(self) -> Amenity {
        Amenity {
            id: AmenityId::from(self.id),
            name: self.name,
            kind: self.kind,
            location: GeoPoint::new(self.lon, self.lat),
        }
    }
}

/// A row in the `property_similarities` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = property_similarities)]
pub struct SimilarityRow {
    pub property_id: String,
    pub similar_property_id: String,
    pub score: f64,
    pub price_score: f64,
    pub size_score: f64,
    pub location_score: f64,
    pub amenity_score: f64,
    pub computed_at: String,
}

impl SimilarityRow {
    pub fn from_domain(edge: &SimilarityEdge) -> Self {
        Self {
            property_id: edge.property_id.to_string(),
            similar_property_id: edge.similar_property_id.to_string(),
            score: edge.score,
            price_score: edge.factors.price,
            size_score: edge.factors.size,
            location_score: edge.factors.location,
            amenity_score: edge.factors.amenity,
            computed_at: edge.computed_at.to_rfc3339(),
        }
    }

    pub fn into_domain(self) -> Result<SimilarityEdge> {
        let computed_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.computed_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        Ok(SimilarityEdge {
            property_id: PropertyId::from(self.property_id),
            similar_property_id: PropertyId::from(self.similar_property_id),
            score: self.score,
            factors: SimilarityFactors {
                price: self.price_score,
                size: self.size_score,
                location: self.location_score,
                amenity: self.amenity_score,
            },
            computed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn property_row_round_trips() {
        let property = Property {
            id: PropertyId::new("prop-1"),
            address: "12 Oak Ave".to_string(),
            price: dec!(725000.50),
            sqft: 1450,
            bedrooms: 3,
            bathrooms: 2,
            location: GeoPoint::new(-122.41, 37.76),
        };

        let row = PropertyRow::from_domain(&property).unwrap();
        assert_eq!(row.price, "725000.50");

        let back = row.into_domain().unwrap();
        assert_eq!(back, property);
    }

    #[test]
    fn similarity_row_round_trips() {
        let edge = SimilarityEdge {
            property_id: PropertyId::new("a"),
            similar_property_id: PropertyId::new("b"),
            score: 0.82,
            factors: SimilarityFactors::new(0.9, 0.8, 0.85, 0.6),
            computed_at: Utc::now(),
        };

        let back = SimilarityRow::from_domain(&edge).into_domain().unwrap();
        assert_eq!(back.property_id, edge.property_id);
        assert_eq!(back.score, edge.score);
        assert_eq!(back.factors, edge.factors);
    }

    #[test]
    fn bad_price_text_fails_parse() {
        let row = PropertyRow {
            id: "p".into(),
            address: "x".into(),
            price: "not-a-number".into(),
            sqft: 1,
            bedrooms: 1,
            bathrooms: 1,
            lon: 0.0,
            lat: 0.0,
        };
        assert!(matches!(row.into_domain(), Err(Error::Parse(_))));
    }
}
