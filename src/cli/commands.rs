//! Async handlers behind the CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::{
    CheckCommand, Cli, ClustersArgs, Commands, DemographicsArgs, NearbyArgs, UpdateArgs,
    WalkScoreArgs,
};
use crate::config::Config;
use crate::db;
use crate::domain::{GeoPoint, PropertyId};
use crate::engine::{ClusterBuilder, SimilarityEngine, SpatialEngine, WalkScoreEngine};
use crate::error::Result;
use crate::geo::FlatProjection;
use crate::store::SqliteStore;

/// Route a parsed CLI invocation to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Update(args) => run_update(args).await,
        Commands::Clusters(args) => run_clusters(args).await,
        Commands::WalkScore(args) => run_walk_score(args).await,
        Commands::Nearby(args) => run_nearby(args).await,
        Commands::Demographics(args) => run_demographics(args).await,
        Commands::Check(CheckCommand::Config(args)) => run_check_config(&args.config),
    }
}

fn open_store(config: &Config) -> Result<Arc<SqliteStore>> {
    let pool = db::create_pool(&config.database.url)?;
    db::run_migrations(&pool)?;
    Ok(Arc::new(SqliteStore::new(pool)))
}

fn load(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;
    config.init_logging();
    Ok(config)
}

async fn run_update(args: UpdateArgs) -> Result<()> {
    let config = load(&args.config)?;
    let store = open_store(&config)?;

    let engine = SimilarityEngine::new(store, FlatProjection::new(), config.similarity_config());
    let edges = engine.update_similarities(args.max_radius).await?;

    println!("{}", serde_json::to_string_pretty(&edges)?);
    Ok(())
}

async fn run_clusters(args: ClustersArgs) -> Result<()> {
    let config = load(&args.config)?;
    let store = open_store(&config)?;

    // The cluster view is always computed against a fresh edge set for the
    // requested radius.
    let engine = SimilarityEngine::new(
        store.clone(),
        FlatProjection::new(),
        config.similarity_config(),
    );
    engine.update_similarities(args.max_radius).await?;

    let builder = ClusterBuilder::new(store, FlatProjection::new());
    let clusters = builder.find_clusters(args.min_similarity).await?;

    println!("{}", serde_json::to_string_pretty(&clusters)?);
    Ok(())
}

async fn run_walk_score(args: WalkScoreArgs) -> Result<()> {
    let config = load(&args.config)?;
    let store = open_store(&config)?;

    let engine = WalkScoreEngine::new(store, FlatProjection::new(), config.walk_score.clone());
    let score = engine.calculate(&PropertyId::new(args.property_id)).await?;

    println!("{score}");
    Ok(())
}

async fn run_nearby(args: NearbyArgs) -> Result<()> {
    let config = load(&args.config)?;
    let store = open_store(&config)?;

    let engine = SpatialEngine::new(store, FlatProjection::new());
    let matches = engine
        .find_properties_in_radius(GeoPoint::new(args.lon, args.lat), args.radius)
        .await?;

    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

async fn run_demographics(args: DemographicsArgs) -> Result<()> {
    let config = load(&args.config)?;
    let store = open_store(&config)?;

    let engine = SpatialEngine::new(store, FlatProjection::new());
    let demographics = engine
        .demographics(&PropertyId::new(args.property_id))
        .await?;

    println!("{}", serde_json::to_string_pretty(&demographics)?);
    Ok(())
}

fn run_check_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    info!(path = %path.display(), "configuration is valid");
    println!(
        "ok: radius {} km, weights sum to 1.0, {} walk-score types",
        config.similarity.max_radius_km,
        config.walk_score.weights.len()
    );
    Ok(())
}
