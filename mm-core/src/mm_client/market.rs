use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::{
    DoctrineFitting, LocationExpectations, LocationId, MarketCharacter, MarketContract, MarketCorporation, MarketExpectation, MarketResponsibilityRequest,
    SellOrderLocation,
};
use mockall::automock;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait MarketApi: Send + Sync + Debug {
    async fn get_market_contracts(&self, location_id: LocationId) -> Result<Vec<MarketContract>>;
    async fn get_market_contract_by_id(&self, expectation_id: i64) -> Result<MarketContract>;
    async fn create_market_contract_responsibility(&self, access_token: &str, expectation_id: i64, entity_id: i64) -> Result<MarketContract>;
    async fn get_market_characters(&self, access_token: &str) -> Result<Vec<MarketCharacter>>;
    async fn get_market_corporations(&self, access_token: &str) -> Result<Vec<MarketCorporation>>;
    async fn get_market_expectation(&self, access_token: &str) -> Result<Vec<MarketExpectation>>;
    async fn get_market_locations_with_doctrines(&self) -> Result<Vec<DoctrineFitting>>;
    /// All locations unless `location_id` narrows it to one.
    async fn get_sell_orders(&self, location_id: Option<LocationId>) -> Result<Vec<SellOrderLocation>>;
    async fn get_market_expectations_by_location(&self) -> Result<Vec<LocationExpectations>>;
}

#[async_trait]
impl MarketApi for MmClient {
    async fn get_market_contracts(&self, location_id: LocationId) -> Result<Vec<MarketContract>> {
        let request = self.client.get(self.endpoint("/api/market/contracts")).query(&[("location_id", location_id.0)]);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching contracts")
    }

    async fn get_market_contract_by_id(&self, expectation_id: i64) -> Result<MarketContract> {
        let request = self.client.get(self.endpoint(&format!("/api/market/contracts/{expectation_id}")));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching contract")
    }

    async fn create_market_contract_responsibility(&self, access_token: &str, expectation_id: i64, entity_id: i64) -> Result<MarketContract> {
        let request = self
            .client
            .post(self.endpoint("/api/market/responsibilities"))
            .bearer_auth(access_token)
            .json(&MarketResponsibilityRequest { expectation_id, entity_id });
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error creating responsability")
    }

    async fn get_market_characters(&self, access_token: &str) -> Result<Vec<MarketCharacter>> {
        let request = self.client.get(self.endpoint("/api/market/characters")).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::PreferDetail).await.context("Error fetching market characters")
    }

    async fn get_market_corporations(&self, access_token: &str) -> Result<Vec<MarketCorporation>> {
        let request = self.client.get(self.endpoint("/api/market/corporations")).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching market corporations")
    }

    async fn get_market_expectation(&self, access_token: &str) -> Result<Vec<MarketExpectation>> {
        let request = self.client.get(self.endpoint("/api/market/expectations")).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::PreferDetail).await.context("Error fetching market expectations")
    }

    async fn get_market_locations_with_doctrines(&self) -> Result<Vec<DoctrineFitting>> {
        let request = self.client.get(self.endpoint("/api/doctrines/market/locations"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching market locations with doctrines")
    }

    async fn get_sell_orders(&self, location_id: Option<LocationId>) -> Result<Vec<SellOrderLocation>> {
        let mut request = self.client.get(self.endpoint("/api/market/sell-orders"));
        if let Some(location_id) = location_id {
            request = request.query(&[("location_id", location_id.0)]);
        }
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching sell orders")
    }

    async fn get_market_expectations_by_location(&self) -> Result<Vec<LocationExpectations>> {
        let request = self.client.get(self.endpoint("/api/market/expectations/by-location"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching market expectations by location")
    }
}
