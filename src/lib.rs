//! Comps - Property similarity scoring and spatial clustering.
//!
//! This crate scores pairs of geolocated real-estate listings for
//! similarity, persists the strong pairs as a derived edge set, and groups
//! transitively-connected listings into deduplicated clusters with
//! geographic and statistical summaries.
//!
//! # Architecture
//!
//! A small hexagonal core:
//!
//! - **`domain`** - storage-agnostic types: properties, amenities,
//!   similarity factors/weights/edges, clusters
//! - **`engine`** - the computational core
//!   - `SimilarityEngine` - weighted four-factor pair scoring and the bulk
//!     edge-set recomputation
//!   - `ClusterBuilder` - union-find connected components over qualifying
//!     edges, enriched with centroid/radius and aggregate metrics
//!   - `SpatialEngine` - point-radius property search and neighborhood
//!     demographics
//!   - `WalkScoreEngine` - amenity-proximity walkability scoring
//! - **`geo`** - injected geometry capability (distance, centroid) with a
//!   flat-projection default
//! - **`port`** - the `PropertyStore` trait the engines consume
//! - **`store`** - store implementations: in-memory and Diesel/SQLite
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use comps::engine::{SimilarityConfig, SimilarityEngine};
//! use comps::geo::FlatProjection;
//! use comps::store::MemoryStore;
//!
//! # async fn demo() -> comps::error::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let engine = SimilarityEngine::new(store, FlatProjection::new(), SimilarityConfig::default());
//! let edges = engine.update_similarities(5.0).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod geo;
pub mod port;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
