use crate::mm_client::{optional_positive_query, ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::CombatLog;
use mockall::automock;
use reqwest::header::CONTENT_TYPE;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait CombatLogApi: Send + Sync + Debug {
    /// Analyzes a plain-text combat log.
    async fn analize_log(&self, combatlog: String) -> Result<CombatLog>;

    /// Analyzes a gzip-compressed combat log. `fitting_id` and `fleet_id` are only sent when positive.
    async fn analize_zipped_log(&self, combatlog: Vec<u8>, fitting_id: Option<i64>, fleet_id: Option<i64>) -> Result<CombatLog>;
}

#[async_trait]
impl CombatLogApi for MmClient {
    async fn analize_log(&self, combatlog: String) -> Result<CombatLog> {
        let request = self.client.post(self.endpoint("/api/combatlog/")).header(CONTENT_TYPE, "text/plain").body(combatlog);

        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error analizing log")
    }

    async fn analize_zipped_log(&self, combatlog: Vec<u8>, fitting_id: Option<i64>, fleet_id: Option<i64>) -> Result<CombatLog> {
        let query = optional_positive_query(&[("fitting_id", fitting_id), ("fleet_id", fleet_id)]);

        let request = self
            .client
            .post(self.endpoint("/api/combatlog"))
            .query(&query)
            .header(CONTENT_TYPE, "application/gzip")
            .body(combatlog);

        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error analizing log")
    }
}
