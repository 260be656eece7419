use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use mm_core::fetching::{fleets, freights, industry};
use mm_core::mm_client::combatlog::CombatLogApi;
use mm_core::mm_client::fleets::FleetApi;
use mm_core::mm_client::freight::FreightApi;
use mm_core::mm_client::market::MarketApi;
use mm_core::reqwest_helpers::create_client;
use mm_core::{AppConfiguration, EsiClient, InMemorySunTypes, MmClient};
use mm_domain::numbers::{number_name, parse_volume_input};
use mm_domain::{FleetId, FleetTrackingTexts, FleetUi, Locale, LocationId, RouteId, RouteOptionId, SolarSystemId};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, registry::Registry, EnvFilter};

use crate::cli_args::{ApiCommands, Cli, Commands};

mod cli_args;

#[derive(Serialize)]
struct FleetDetail {
    fleet: FleetUi,
    tracking_texts: Option<FleetTrackingTexts>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let args = Cli::parse();
    let locale = Locale::from_code(&args.locale);

    match args.command {
        Commands::ParseVolume { input } => print_json(&parse_volume_input(Some(&input))),
        Commands::NumberName { value } => print_json(&number_name(value, locale)),
        Commands::Api(command) => run_api_command(command, locale).await,
    }
}

async fn run_api_command(command: ApiCommands, locale: Locale) -> Result<()> {
    let cfg = AppConfiguration::from_env()?;
    let client = create_client()?;
    let mm_client = MmClient::new(client.clone(), &cfg);

    info!("Using API at {}", cfg.api_url());

    match command {
        ApiCommands::FreightRoutes => print_json(&freights::fetch_freight_routes(&mm_client, locale).await?),
        ApiCommands::FreightContracts { history } => print_json(&freights::fetch_freight_contracts(&mm_client, history).await?),
        ApiCommands::RouteCost {
            route_id,
            route_option_id,
            collateral,
        } => print_json(&mm_client.get_route_cost(RouteId(route_id), RouteOptionId(route_option_id), collateral).await?),
        ApiCommands::Fleets { recent, access_token } => {
            let fleet_items = match access_token {
                Some(access_token) => fleets::fetch_fleets_auth(&mm_client, &mm_client, &access_token, !recent, Utc::now(), locale).await?,
                None => fleets::fetch_fleets(&mm_client, !recent, locale).await?,
            };
            print_json(&fleet_items)
        }
        ApiCommands::Fleet { id, access_token } => {
            let fleet = fleets::fetch_fleet_by_id(&mm_client, &mm_client, &mm_client, &access_token, FleetId(id), locale).await?;
            let tracking_texts = fleets::get_fleet_tracking_texts(locale, &fleet, cfg.datetime_format());
            print_json(&FleetDetail { fleet, tracking_texts })
        }
        ApiCommands::FleetUsers { id } => print_json(&fleets::fetch_fleet_users(&mm_client, FleetId(id)).await?),
        ApiCommands::FleetComposition {
            id,
            access_token,
            by_location,
            staging_system,
        } => {
            let members = mm_client.get_fleet_members(&access_token, FleetId(id)).await?;
            if by_location {
                let esi_client = EsiClient::new(client, &cfg);
                let sun_types = match cfg.sun_types_file() {
                    Some(path) => InMemorySunTypes::from_json_file(path)?,
                    None => InMemorySunTypes::default(),
                };
                print_json(&fleets::group_members_by_location(&esi_client, &sun_types, &members, staging_system.map(SolarSystemId)).await?)
            } else {
                print_json(&fleets::group_members_by_ship(&members))
            }
        }
        ApiCommands::Orders => print_json(&industry::fetch_orders_by_locations(&mm_client).await?),
        ApiCommands::AnalyzeLog {
            file,
            zipped,
            fitting_id,
            fleet_id,
        } => {
            let log = if zipped {
                let bytes = tokio::fs::read(&file).await.with_context(|| format!("Failed to read {}", file.display()))?;
                mm_client.analize_zipped_log(bytes, fitting_id, fleet_id).await?
            } else {
                let text = tokio::fs::read_to_string(&file).await.with_context(|| format!("Failed to read {}", file.display()))?;
                mm_client.analize_log(text).await?
            };
            print_json(&log)
        }
        ApiCommands::SellOrders { location_id } => print_json(&mm_client.get_sell_orders(location_id.map(LocationId)).await?),
        ApiCommands::MarketExpectations { access_token } => print_json(&mm_client.get_market_expectation(&access_token).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs go to stderr, stdout carries the JSON result.
fn setup_tracing() {
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default().with(filter).with(console_layer).init();
}
