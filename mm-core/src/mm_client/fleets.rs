use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::{Fleet, FleetBasic, FleetId, FleetMember, FleetUsers};
use mockall::automock;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetListKind {
    Active,
    Recent,
}

impl FleetListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FleetListKind::Active => "active",
            FleetListKind::Recent => "recent",
        }
    }
}

#[automock]
#[async_trait]
pub trait FleetApi: Send + Sync + Debug {
    async fn get_fleets_v3(&self, access_token: &str, kind: FleetListKind) -> Result<Vec<Fleet>>;
    async fn get_fleets_v2(&self, upcoming: bool) -> Result<Vec<FleetBasic>>;
    async fn get_fleet_by_id(&self, access_token: &str, fleet_id: FleetId) -> Result<Fleet>;
    async fn get_fleet_members(&self, access_token: &str, fleet_id: FleetId) -> Result<Vec<FleetMember>>;
    async fn get_fleet_users(&self, fleet_id: FleetId) -> Result<Vec<FleetUsers>>;
}

#[async_trait]
impl FleetApi for MmClient {
    async fn get_fleets_v3(&self, access_token: &str, kind: FleetListKind) -> Result<Vec<Fleet>> {
        let request = self.client.get(self.endpoint("/api/fleets/v3")).query(&[("type", kind.as_str())]).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching fleets")
    }

    async fn get_fleets_v2(&self, upcoming: bool) -> Result<Vec<FleetBasic>> {
        let request = self.client.get(self.endpoint("/api/fleets/v2")).query(&[("upcoming", upcoming)]);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching fleets")
    }

    async fn get_fleet_by_id(&self, access_token: &str, fleet_id: FleetId) -> Result<Fleet> {
        let request = self.client.get(self.endpoint(&format!("/api/fleets/{fleet_id}"))).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::PreferDetail).await.context("Error fetching fleet")
    }

    async fn get_fleet_members(&self, access_token: &str, fleet_id: FleetId) -> Result<Vec<FleetMember>> {
        let request = self.client.get(self.endpoint(&format!("/api/fleets/{fleet_id}/members"))).bearer_auth(access_token);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching fleet members")
    }

    async fn get_fleet_users(&self, fleet_id: FleetId) -> Result<Vec<FleetUsers>> {
        let request = self.client.get(self.endpoint(&format!("/api/fleets/{fleet_id}/users")));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching fleet users")
    }
}
