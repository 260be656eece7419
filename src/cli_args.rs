use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(version, about = "Query the community platform API", long_about = None)]
pub struct Cli {
    /// locale of generated texts (en, es)
    #[arg(long, global = true, default_value = "en")]
    pub locale: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// parses shorthand volumes like 60k or 1.5m
    ParseVolume { input: String },
    NumberName { value: f64 },
    #[command(flatten)]
    Api(ApiCommands),
}

/// Commands that talk to the API and need the environment configuration.
#[derive(Clone, Subcommand)]
pub enum ApiCommands {
    /// freight route picker tables
    FreightRoutes,
    /// freight contracts grouped by start and end location
    FreightContracts {
        #[arg(long)]
        history: bool,
    },
    RouteCost {
        #[arg(long)]
        route_id: i64,
        #[arg(long)]
        route_option_id: i64,
        #[arg(long)]
        collateral: i64,
    },
    /// upcoming fleets, or recent ones with --recent
    Fleets {
        #[arg(long)]
        recent: bool,
        /// without a token only the public fleet list is available
        #[arg(long, env("MM_ACCESS_TOKEN"))]
        access_token: Option<String>,
    },
    Fleet {
        #[arg(long)]
        id: i64,
        #[arg(long, env("MM_ACCESS_TOKEN"))]
        access_token: String,
    },
    FleetUsers {
        #[arg(long)]
        id: i64,
    },
    /// fleet members grouped by ship, or by solar system with --by-location
    FleetComposition {
        #[arg(long)]
        id: i64,
        #[arg(long, env("MM_ACCESS_TOKEN"))]
        access_token: String,
        #[arg(long)]
        by_location: bool,
        #[arg(long)]
        staging_system: Option<i64>,
    },
    /// industry orders grouped by location
    Orders,
    AnalyzeLog {
        #[arg(long)]
        file: PathBuf,
        /// the file is gzip compressed
        #[arg(long)]
        zipped: bool,
        #[arg(long)]
        fitting_id: Option<i64>,
        #[arg(long)]
        fleet_id: Option<i64>,
    },
    SellOrders {
        #[arg(long)]
        location_id: Option<i64>,
    },
    MarketExpectations {
        #[arg(long, env("MM_ACCESS_TOKEN"))]
        access_token: String,
    },
}
