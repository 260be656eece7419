use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::{Doctrine, DoctrineId};
use mockall::automock;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait DoctrineApi: Send + Sync + Debug {
    async fn get_doctrine_by_id(&self, doctrine_id: DoctrineId) -> Result<Doctrine>;
}

#[async_trait]
impl DoctrineApi for MmClient {
    async fn get_doctrine_by_id(&self, doctrine_id: DoctrineId) -> Result<Doctrine> {
        let request = self.client.get(self.endpoint(&format!("/api/doctrines/{doctrine_id}")));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching doctrine")
    }
}
