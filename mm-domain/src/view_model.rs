use crate::api_model::{
    CharacterId, Doctrine, DoctrineId, FleetId, FleetTracking, FreightContract, IndustryOrderItem, IndustryOrderLocation, LocationId, RouteId, RouteOptionId, ShipTypeId,
    SolarSystemId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A label/value pair for pickers and dropdowns.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetItem {
    pub id: FleetId,
    pub description: String,
    pub audience: String,
    pub doctrine_id: Option<DoctrineId>,
    pub fleet_commander_id: CharacterId,
    pub fleet_commander_name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub fleet_type: String,
    pub tracking: Option<FleetTracking>,
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetUi {
    pub id: FleetId,
    pub description: String,
    pub fleet_commander_id: CharacterId,
    pub fleet_commander_name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub fleet_type: String,
    pub doctrine: Option<Doctrine>,
    pub tracking: Option<FleetTracking>,
    pub audience: String,
    pub disable_motd: bool,
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CharacterBasic {
    pub character_id: CharacterId,
    pub character_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetComposition {
    pub ship_type_id: ShipTypeId,
    pub ship_type_name: String,
    pub members: Vec<CharacterBasic>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetRadar {
    pub solar_system_id: SolarSystemId,
    pub solar_system_name: String,
    pub sun_type_id: Option<i64>,
    /// `None` if no route to the staging system exists
    pub jumps: Option<u32>,
    pub members: Vec<CharacterBasic>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetTrackingTexts {
    pub fleet_end_eve_time_text: String,
    pub fleet_duration_text: String,
    pub fleet_tracking_hint: String,
}

/// Lookup tables for the freight calculator, keyed by `"<origin location id>-<destination location id>"`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FreightRoutesData {
    pub routes: Vec<SelectOption<String>>,
    pub sizes: BTreeMap<String, Vec<SelectOption<RouteOptionId>>>,
    pub route_translation: BTreeMap<String, RouteId>,
    pub stations: BTreeMap<String, [String; 2]>,
    /// routes left out because their options couldn't be fetched
    pub omitted_route_ids: Vec<RouteId>,
}

pub fn route_key(origin: LocationId, destination: LocationId) -> String {
    format!("{origin}-{destination}")
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightContractDestination {
    pub location_name: String,
    pub contracts: Vec<FreightContract>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightContractLocation {
    pub location_name: String,
    pub destinations: Vec<FreightContractDestination>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    pub id: CharacterId,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationOrder {
    pub id: i64,
    pub character_id: CharacterId,
    pub character_name: String,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
    pub location: IndustryOrderLocation,
    pub needed_by: Option<String>,
    pub items: Vec<IndustryOrderItem>,
    pub assigned_to: Vec<Producer>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderLocation {
    pub location_id: LocationId,
    pub location_name: String,
    pub orders: Vec<LocationOrder>,
}
