//! Integration tests for walk-score computation.

use std::sync::Arc;

use comps::domain::PropertyId;
use comps::engine::{WalkScoreConfig, WalkScoreEngine};
use comps::error::Error;
use comps::geo::FlatProjection;
use comps::store::MemoryStore;
use comps::testkit;

fn engine_over(
    store: Arc<MemoryStore>,
    config: WalkScoreConfig,
) -> WalkScoreEngine<MemoryStore, FlatProjection> {
    WalkScoreEngine::new(store, FlatProjection::new(), config)
}

#[tokio::test]
async fn single_grocery_at_600m_scores_forty() {
    let store = Arc::new(MemoryStore::new());
    store.insert_property(testkit::property_at("home", 0.0, 0.0));
    store.insert_amenity(testkit::amenity_at(
        "g",
        "grocery",
        0.0,
        testkit::meters_as_lat_degrees(600.0),
    ));

    let engine = engine_over(store, WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    // Only grocery present: (1 - 600/1000) of its achievable weight.
    assert_eq!(score, 40);
}

#[tokio::test]
async fn no_amenities_nearby_scores_zero() {
    let store = Arc::new(MemoryStore::new());
    store.insert_property(testkit::property_at("home", 0.0, 0.0));
    // Everything is far outside the 1.5 km lookup radius.
    store.insert_amenity(testkit::amenity_at("g", "grocery", 0.0, 1.0));

    let engine = engine_over(store, WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    assert_eq!(score, 0);
}

#[tokio::test]
async fn unrecognized_types_are_ignored() {
    let store = Arc::new(MemoryStore::new());
    store.insert_property(testkit::property_at("home", 0.0, 0.0));
    store.insert_amenity(testkit::amenity_at("h", "heliport", 0.0, 0.001));
    store.insert_amenity(testkit::amenity_at(
        "g",
        "grocery",
        0.0,
        testkit::meters_as_lat_degrees(600.0),
    ));

    let engine = engine_over(store, WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    // Same as the grocery-only case: the heliport contributes nothing.
    assert_eq!(score, 40);
}

#[tokio::test]
async fn closest_instance_of_a_type_wins() {
    let store = Arc::new(MemoryStore::new());
    store.insert_property(testkit::property_at("home", 0.0, 0.0));
    store.insert_amenity(testkit::amenity_at(
        "near",
        "grocery",
        0.0,
        testkit::meters_as_lat_degrees(200.0),
    ));
    store.insert_amenity(testkit::amenity_at(
        "far",
        "grocery",
        0.0,
        testkit::meters_as_lat_degrees(900.0),
    ));

    let engine = engine_over(store, WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    // min distance 200 m: (1 - 0.2) = 80% of the grocery weight.
    assert_eq!(score, 80);
}

#[tokio::test]
async fn rich_neighborhood_stays_within_bounds() {
    let store = Arc::new(MemoryStore::new());
    store.insert_property(testkit::property_at("home", 0.0, 0.0));
    for (i, kind) in ["grocery", "park", "school", "transit_station", "restaurant"]
        .iter()
        .enumerate()
    {
        store.insert_amenity(testkit::amenity_at(
            &format!("a{i}"),
            kind,
            0.0,
            testkit::meters_as_lat_degrees(100.0 * (i as f64 + 1.0)),
        ));
    }

    let engine = engine_over(store, WalkScoreConfig::default());
    let score = engine.calculate(&PropertyId::new("home")).await.unwrap();

    assert!(score <= 100);
    assert!(score > 50, "close amenities should score high, got {score}");
}

#[tokio::test]
async fn unknown_property_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_over(store, WalkScoreConfig::default());

    let result = engine.calculate(&PropertyId::new("ghost")).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
}
