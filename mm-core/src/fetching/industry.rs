use crate::mm_client::industry::IndustryApi;
use anyhow::Result;
use mm_domain::grouping::group_by_first_seen;
use mm_domain::{BaseIndustryOrder, IndustryOrder, IndustryOrderLocation, IndustryOrderSummaryNode, LocationOrder, OrderLocation, Producer};

pub async fn fetch_orders_summary_flat(industry_api: &dyn IndustryApi) -> Result<Vec<BaseIndustryOrder>> {
    let summary = industry_api.get_orders_summary_flat().await?;
    Ok(summary.items.unwrap_or_default())
}

pub async fn fetch_orders_summary(industry_api: &dyn IndustryApi) -> Result<Vec<IndustryOrderSummaryNode>> {
    let summary = industry_api.get_orders_summary_nested().await?;
    Ok(summary.roots.unwrap_or_default())
}

pub async fn fetch_orders_by_locations(industry_api: &dyn IndustryApi) -> Result<Vec<OrderLocation>> {
    let orders = industry_api.get_orders().await?;
    Ok(group_orders_by_location(orders))
}

/// Largest id that still orders like an array index in a JSON object.
const MAX_INDEX_LIKE_ID: i64 = 4_294_967_294;

/// Orders without a location are skipped.
///
/// Station ids (up to 2^32 - 2) come first in ascending order, larger structure ids follow
/// in the order they were first seen.
pub fn group_orders_by_location(orders: Vec<IndustryOrder>) -> Vec<OrderLocation> {
    let located = orders.into_iter().filter_map(|mut order| order.location.take().map(|location| (location, order)));

    let mut locations: Vec<OrderLocation> = group_by_first_seen(located, |(location, _)| location.location_id)
        .into_iter()
        .map(|(location_id, orders)| OrderLocation {
            location_id,
            location_name: orders[0].0.location_name.clone(),
            orders: orders.into_iter().map(|(location, order)| to_location_order(location, order)).collect(),
        })
        .collect();

    locations.sort_by_key(|location| match location.location_id.0 {
        id @ 0..=MAX_INDEX_LIKE_ID => (false, id),
        _ => (true, 0),
    });

    locations
}

fn to_location_order(location: IndustryOrderLocation, order: IndustryOrder) -> LocationOrder {
    LocationOrder {
        id: order.id,
        character_id: order.character_id,
        character_name: order.character_name,
        created_at: order.created_at,
        fulfilled_at: order.fulfilled_at,
        location,
        needed_by: order.needed_by,
        items: order.items,
        assigned_to: order
            .assigned_to
            .into_iter()
            .map(|assignee| Producer {
                id: assignee.character_id,
                name: assignee.character_name,
            })
            .collect(),
    }
}
