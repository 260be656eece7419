use crate::collect::collect_settled;
use crate::mm_client::freight::FreightApi;
use anyhow::Result;
use mm_domain::grouping::group_by_first_seen;
use mm_domain::numbers::number_thousand_separator;
use mm_domain::{
    route_key, FreightContract, FreightContractDestination, FreightContractLocation, FreightLocation, FreightRoute, FreightRouteOption, FreightRoutesData, Locale,
    SelectOption,
};
use tracing::{info, warn};

/// Lookup tables for the freight calculator.
///
/// The options of all routes are fetched concurrently. A route whose options can't be fetched
/// is left out and reported in `omitted_route_ids`; a failure to list the routes fails the call.
pub async fn fetch_freight_routes(freight_api: &dyn FreightApi, locale: Locale) -> Result<FreightRoutesData> {
    let routes = freight_api.get_routes().await?;

    let route_options = collect_settled(routes.iter().map(|route| route.route_id), |route_id| freight_api.get_route_options(route_id)).await;

    let mut data = FreightRoutesData::default();

    for (route, options) in routes.iter().zip(route_options) {
        match options {
            Ok(options) => add_route(&mut data, route, &options, locale),
            Err(err) => {
                warn!("Leaving out freight route {}: {:#}", route.route_id, err);
                data.omitted_route_ids.push(route.route_id);
            }
        }
    }

    info!("Built {} freight route entries, {} routes left out", data.routes.len(), data.omitted_route_ids.len());

    Ok(data)
}

fn add_route(data: &mut FreightRoutesData, route: &FreightRoute, options: &[FreightRouteOption], locale: Locale) {
    let sizes: Vec<SelectOption<_>> = options
        .iter()
        .map(|option| SelectOption {
            label: number_thousand_separator(option.maximum_m3 as f64, locale),
            value: option.route_option_id,
        })
        .collect();

    let mut add_direction = |origin: &FreightLocation, destination: &FreightLocation| {
        let key = route_key(origin.location_id, destination.location_id);

        data.route_translation.insert(key.clone(), route.route_id);
        data.routes.push(SelectOption {
            label: format!("{} → {}", origin.short_name, destination.short_name),
            value: key.clone(),
        });
        data.sizes.insert(key.clone(), sizes.clone());
        data.stations.insert(key, [origin.name.clone(), destination.name.clone()]);
    };

    add_direction(&route.origin, &route.destination);
    if route.bidirectional {
        add_direction(&route.destination, &route.origin);
    }
}

/// Contracts with a valid issuer, grouped by start location and then by end location.
pub async fn fetch_freight_contracts(freight_api: &dyn FreightApi, history: bool) -> Result<Vec<FreightContractLocation>> {
    let contracts = freight_api.get_contracts(history).await?;
    Ok(group_contracts_by_location(contracts))
}

pub fn group_contracts_by_location(contracts: Vec<FreightContract>) -> Vec<FreightContractLocation> {
    let valid_contracts = contracts.into_iter().filter(FreightContract::has_valid_issuer);

    group_by_first_seen(valid_contracts, |contract| contract.start_location_name.clone())
        .into_iter()
        .map(|(location_name, contracts)| FreightContractLocation {
            location_name,
            destinations: group_by_first_seen(contracts, |contract| contract.end_location_name.clone())
                .into_iter()
                .map(|(location_name, contracts)| FreightContractDestination { location_name, contracts })
                .collect(),
        })
        .collect()
}
