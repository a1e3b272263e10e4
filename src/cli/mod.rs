//! Command-line interface definitions.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Comps - Property similarity scoring and spatial clustering.
#[derive(Parser, Debug)]
#[command(name = "comps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recompute the similarity edge set and print the retained pairs
    Update(UpdateArgs),

    /// Recompute similarities, then build and print property clusters
    Clusters(ClustersArgs),

    /// Compute the walk score for one property
    WalkScore(WalkScoreArgs),

    /// Find properties within a radius of a point
    Nearby(NearbyArgs),

    /// Print neighborhood price and size statistics for one property
    Demographics(DemographicsArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `comps check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `update` subcommand.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Geographic radius cap in kilometers; pairs farther apart are not scored
    #[arg(long)]
    pub max_radius: f64,
}

/// Arguments for the `clusters` subcommand.
#[derive(Parser, Debug)]
pub struct ClustersArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Minimum composite score for an edge to connect two properties, in (0, 1]
    #[arg(long)]
    pub min_similarity: f64,

    /// Geographic radius cap in kilometers for the similarity pass
    #[arg(long)]
    pub max_radius: f64,
}

/// Arguments for the `walk-score` subcommand.
#[derive(Parser, Debug)]
pub struct WalkScoreArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Property id to score
    pub property_id: String,
}

/// Arguments for the `nearby` subcommand.
#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Longitude of the search point, in degrees
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    /// Latitude of the search point, in degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Search radius in kilometers
    #[arg(long)]
    pub radius: f64,
}

/// Arguments for the `demographics` subcommand.
#[derive(Parser, Debug)]
pub struct DemographicsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Property id to report on
    pub property_id: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clusters_requires_both_parameters() {
        let missing = Cli::try_parse_from(["comps", "clusters", "--min-similarity", "0.7"]);
        assert!(missing.is_err());

        let ok = Cli::try_parse_from([
            "comps",
            "clusters",
            "--min-similarity",
            "0.7",
            "--max-radius",
            "5.0",
        ]);
        assert!(ok.is_ok());
    }

    #[test]
    fn update_requires_max_radius() {
        assert!(Cli::try_parse_from(["comps", "update"]).is_err());
        assert!(Cli::try_parse_from(["comps", "update", "--max-radius", "2.0"]).is_ok());
    }

    #[test]
    fn nearby_requires_point_and_radius() {
        assert!(Cli::try_parse_from(["comps", "nearby", "-122.4", "37.7"]).is_err());

        let ok = Cli::try_parse_from(["comps", "nearby", "-122.4", "37.7", "--radius", "2.0"]);
        assert!(ok.is_ok());
    }

    #[test]
    fn demographics_requires_property_id() {
        assert!(Cli::try_parse_from(["comps", "demographics"]).is_err());
        assert!(Cli::try_parse_from(["comps", "demographics", "prop-1"]).is_ok());
    }
}
