use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use itertools::Itertools;
use mm_domain::{EveCharacterProfile, UserId};
use mockall::automock;
use reqwest::StatusCode;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait CharacterApi: Send + Sync + Debug {
    /// Primary characters of several users in one request. An empty id list sends nothing.
    async fn get_users_character(&self, user_ids: Vec<UserId>) -> Result<Vec<EveCharacterProfile>>;

    /// `None` if the user has no primary character.
    async fn get_user_character(&self, user_id: UserId) -> Result<Option<EveCharacterProfile>>;
}

#[async_trait]
impl CharacterApi for MmClient {
    async fn get_users_character(&self, user_ids: Vec<UserId>) -> Result<Vec<EveCharacterProfile>> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        let request = self
            .client
            .get(self.endpoint("/api/eveonline/characters/primary"))
            .query(&[("user_ids", user_ids.iter().join(","))]);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching characters")
    }

    async fn get_user_character(&self, user_id: UserId) -> Result<Option<EveCharacterProfile>> {
        let request = self.client.get(self.endpoint(&format!("/api/eveonline/characters/primary/{user_id}")));

        match self.make_api_call::<EveCharacterProfile>(request, ErrorDetail::StatusOnly).await {
            Ok(profile) => Ok(Some(profile)),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(err) => Err(anyhow::Error::new(err).context("Error fetching character")),
        }
    }
}
