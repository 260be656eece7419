use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct LocationId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct SolarSystemId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ShipTypeId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct CharacterId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct UserId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct FleetId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct DoctrineId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct RouteId(pub i64);

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct RouteOptionId(pub i64);

macro_rules! display_inner {
    ($($t:ty),*) => {
        $(impl Display for $t {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_inner!(LocationId, SolarSystemId, ShipTypeId, CharacterId, UserId, FleetId, DoctrineId, RouteId, RouteOptionId);

// --- combat log ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CombatLog {
    #[serde(default)]
    pub db_id: Option<i64>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub damage_done: Vec<CombatLogDamageEntry>,
    #[serde(default)]
    pub damage_taken: Vec<CombatLogDamageEntry>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CombatLogDamageEntry {
    pub name: String,
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub count: i64,
}

// --- freight ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightLocation {
    pub location_id: LocationId,
    pub name: String,
    pub short_name: String,
}

/// The backend spells the origin field `orgin`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightRoute {
    pub route_id: RouteId,
    #[serde(rename = "orgin")]
    pub origin: FreightLocation,
    pub destination: FreightLocation,
    pub bidirectional: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightRouteOption {
    pub route_option_id: RouteOptionId,
    pub maximum_m3: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteCost {
    pub route_id: i64,
    pub cost: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreightContract {
    pub contract_id: i64,
    #[serde(default)]
    pub issuer_id: Option<i64>,
    pub status: String,
    pub start_location_name: String,
    pub end_location_name: String,
    pub volume: i64,
    pub collateral: i64,
    pub reward: i64,
    pub date_issued: String,
    #[serde(default)]
    pub date_completed: Option<String>,
    #[serde(default)]
    pub completed_by_character_name: Option<String>,
}

impl FreightContract {
    pub fn has_valid_issuer(&self) -> bool {
        self.issuer_id.is_some_and(|id| id > 0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SpaceTruckerStatistics {
    #[serde(default)]
    pub primary_character_id: Option<CharacterId>,
    #[serde(default)]
    pub primary_character_name: Option<String>,
    pub completed_contracts_count: i64,
}

// --- market ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketContractResponsibility {
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketContractHistoricalQuantity {
    pub date: String,
    pub quantity: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketContract {
    pub title: String,
    pub fitting_id: i64,
    #[serde(default)]
    pub structure_id: Option<i64>,
    pub location_name: String,
    pub desired_quantity: i64,
    pub current_quantity: i64,
    #[serde(default)]
    pub historical_quantity: Vec<MarketContractHistoricalQuantity>,
    #[serde(default)]
    pub responsibilities: Vec<MarketContractResponsibility>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketResponsibilityRequest {
    pub expectation_id: i64,
    pub entity_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketCharacter {
    pub character_id: CharacterId,
    pub character_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketCorporation {
    pub corporation_id: i64,
    pub corporation_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketExpectation {
    pub expectation_id: i64,
    pub fitting_id: i64,
    pub fitting_name: String,
    pub location_id: LocationId,
    pub location_name: String,
    pub quantity: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DoctrineFitting {
    pub doctrine_id: DoctrineId,
    pub doctrine_name: String,
    pub location_ids: Vec<LocationId>,
    #[serde(default)]
    pub fitting_ids: Vec<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationFittingExpectation {
    pub expectation_id: i64,
    pub fitting_id: i64,
    pub fitting_name: String,
    pub expected_quantity: i64,
    pub current_quantity: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationExpectations {
    pub location_id: LocationId,
    pub location_name: String,
    pub expectations: Vec<LocationFittingExpectation>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SellOrderItem {
    pub item_name: String,
    pub type_id: Option<i64>,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub group_id: Option<i64>,
    pub group_name: String,
    pub expected_quantity: i64,
    pub current_quantity: i64,
    pub fulfilled: bool,
    #[serde(default)]
    pub issuer_ids: Vec<i64>,
    pub current_lowest_price: Option<f64>,
    pub baseline_price: Option<f64>,
    #[serde(default)]
    pub baseline_sell_price: Option<f64>,
    #[serde(default)]
    pub baseline_buy_price: Option<f64>,
    #[serde(default)]
    pub baseline_split_price: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SellOrderLocation {
    pub location_id: LocationId,
    pub location_name: String,
    pub short_name: String,
    pub is_price_baseline: bool,
    pub items: Vec<SellOrderItem>,
}

// --- fleets, characters, doctrines ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetTracking {
    #[serde(default)]
    pub id: Option<i64>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_registered: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    pub id: FleetId,
    #[serde(default)]
    pub description: String,
    pub audience: String,
    #[serde(default)]
    pub doctrine_id: Option<DoctrineId>,
    #[serde(default)]
    pub fleet_commander: Option<UserId>,
    #[serde(default)]
    pub location: String,
    pub start_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub fleet_type: String,
    #[serde(default)]
    pub tracking: Option<FleetTracking>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub disable_motd: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetBasic {
    pub id: FleetId,
    pub audience: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetMember {
    pub character_id: CharacterId,
    pub character_name: String,
    pub ship_type_id: ShipTypeId,
    pub ship_type_name: String,
    pub solar_system_id: SolarSystemId,
    pub solar_system_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetUsers {
    pub fleet_id: FleetId,
    pub user_ids: Vec<UserId>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EveCharacterProfile {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub character_id: CharacterId,
    pub character_name: String,
    #[serde(default)]
    pub corporation_id: Option<i64>,
    #[serde(default)]
    pub corporation_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Doctrine {
    pub id: DoctrineId,
    pub name: String,
    #[serde(rename = "type")]
    pub doctrine_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sig_ids: Vec<i64>,
}

// --- industry ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryOrderLocation {
    pub location_id: LocationId,
    pub location_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryOrderItem {
    pub eve_type_id: i64,
    pub eve_type_name: String,
    pub quantity: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryAssignee {
    pub character_id: CharacterId,
    pub character_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryOrder {
    pub id: i64,
    pub character_id: CharacterId,
    pub character_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub fulfilled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub needed_by: Option<String>,
    #[serde(default)]
    pub location: Option<IndustryOrderLocation>,
    #[serde(default)]
    pub items: Vec<IndustryOrderItem>,
    #[serde(default)]
    pub assigned_to: Vec<IndustryAssignee>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseIndustryOrder {
    pub id: i64,
    pub character_id: CharacterId,
    pub character_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub needed_by: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct IndustryOrdersSummaryFlat {
    #[serde(default)]
    pub items: Option<Vec<BaseIndustryOrder>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustryOrderSummaryNode {
    pub eve_type_id: i64,
    pub eve_type_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub children: Vec<IndustryOrderSummaryNode>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct IndustryOrdersSummaryNested {
    #[serde(default)]
    pub roots: Option<Vec<IndustryOrderSummaryNode>>,
}
