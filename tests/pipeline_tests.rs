//! End-to-end pipeline tests over the SQLite store: raw records in,
//! enriched clusters out.

use std::sync::Arc;

use rust_decimal_macros::dec;

use comps::db::{create_pool, run_migrations};
use comps::domain::PropertyId;
use comps::engine::{
    ClusterBuilder, SimilarityConfig, SimilarityEngine, WalkScoreConfig, WalkScoreEngine,
};
use comps::geo::FlatProjection;
use comps::store::SqliteStore;
use comps::testkit;

fn open_store(url: &str) -> Arc<SqliteStore> {
    let pool = create_pool(url).expect("pool");
    run_migrations(&pool).expect("migrations");
    Arc::new(SqliteStore::new(pool))
}

#[tokio::test]
async fn similarity_pass_then_clusters_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("comps.db").display().to_string();
    let store = open_store(&url);

    // Two tight neighbors and one distant listing.
    let near = testkit::meters_as_lat_degrees(80.0);
    let far = testkit::meters_as_lat_degrees(30_000.0);
    store
        .upsert_property(&testkit::property_with("a", dec!(500000), 1200, 0.0, 0.0))
        .unwrap();
    store
        .upsert_property(&testkit::property_with("b", dec!(495000), 1180, 0.0, near))
        .unwrap();
    store
        .upsert_property(&testkit::property_with("z", dec!(900000), 3000, 0.0, far))
        .unwrap();
    store
        .upsert_amenity(&testkit::amenity_at("g", "grocery", 0.0, 0.001))
        .unwrap();

    let engine = SimilarityEngine::new(
        store.clone(),
        FlatProjection::new(),
        SimilarityConfig::default(),
    );
    let edges = engine.update_similarities(5.0).await.unwrap();

    assert_eq!(edges.len(), 1, "only the tight pair should survive");
    assert_eq!(edges[0].property_id.as_str(), "a");
    assert_eq!(edges[0].similar_property_id.as_str(), "b");

    let builder = ClusterBuilder::new(store.clone(), FlatProjection::new());
    let clusters = builder.find_clusters(0.7).await.unwrap();

    assert_eq!(clusters.len(), 1);
    let cluster = &clusters[0];
    assert_eq!(cluster.property_count(), 2);
    assert!(!cluster.contains_property(&PropertyId::new("z")));
    assert_eq!(cluster.metrics.property_count, 2);
    assert!(cluster.geography.radius_km < 0.1);
}

#[tokio::test]
async fn recomputing_replaces_rather_than_merges() {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("comps.db").display().to_string();
    let store = open_store(&url);

    let apart = testkit::meters_as_lat_degrees(3000.0);
    store
        .upsert_property(&testkit::property_at("a", 0.0, 0.0))
        .unwrap();
    store
        .upsert_property(&testkit::property_at("b", 0.0, apart))
        .unwrap();
    store
        .upsert_amenity(&testkit::amenity_at("g", "grocery", 0.0, apart / 2.0))
        .unwrap();

    let engine = SimilarityEngine::new(
        store.clone(),
        FlatProjection::new(),
        SimilarityConfig::default(),
    );

    let wide = engine.update_similarities(5.0).await.unwrap();
    assert_eq!(wide.len(), 1);

    // The 2 km pass cannot see the pair; its edge must disappear.
    let narrow = engine.update_similarities(2.0).await.unwrap();
    assert!(narrow.is_empty());

    let builder = ClusterBuilder::new(store, FlatProjection::new());
    assert!(builder.find_clusters(0.7).await.unwrap().is_empty());
}

#[tokio::test]
async fn walk_score_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("comps.db").display().to_string();
    let store = open_store(&url);

    store
        .upsert_property(&testkit::property_at("home", 0.0, 0.0))
        .unwrap();
    store
        .upsert_amenity(&testkit::amenity_at(
            "g",
            "grocery",
            0.0,
            testkit::meters_as_lat_degrees(600.0),
        ))
        .unwrap();

    let engine = WalkScoreEngine::new(store, FlatProjection::new(), WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    assert_eq!(score, 40);
}
