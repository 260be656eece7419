use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::{IndustryOrder, IndustryOrdersSummaryFlat, IndustryOrdersSummaryNested};
use mockall::automock;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait IndustryApi: Send + Sync + Debug {
    async fn get_orders(&self) -> Result<Vec<IndustryOrder>>;
    async fn get_orders_summary_flat(&self) -> Result<IndustryOrdersSummaryFlat>;
    async fn get_orders_summary_nested(&self) -> Result<IndustryOrdersSummaryNested>;
}

#[async_trait]
impl IndustryApi for MmClient {
    async fn get_orders(&self) -> Result<Vec<IndustryOrder>> {
        let request = self.client.get(self.endpoint("/api/industry/orders")).query(&[("with_location", true)]);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching industry orders")
    }

    async fn get_orders_summary_flat(&self) -> Result<IndustryOrdersSummaryFlat> {
        let request = self.client.get(self.endpoint("/api/industry/orders/summary/flat"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching industry orders summary")
    }

    async fn get_orders_summary_nested(&self) -> Result<IndustryOrdersSummaryNested> {
        let request = self.client.get(self.endpoint("/api/industry/orders/summary/nested"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching industry orders summary")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mm_client::test::client_for;
    use mockito::Matcher;
    use test_log::test;

    #[test(tokio::test)]
    async fn orders_are_requested_with_locations() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/industry/orders")
            .match_query(Matcher::UrlEncoded("with_location".to_string(), "true".to_string()))
            .with_status(200)
            .with_body(r#"[{"id":1,"character_id":5,"character_name":"Builder","created_at":"2025-03-01T10:00:00Z","items":[]}]"#)
            .create_async()
            .await;

        let orders = client_for(&server.url()).get_orders().await.unwrap();

        mock.assert_async().await;
        assert!(orders[0].location.is_none());
    }

    #[test(tokio::test)]
    async fn nested_summary_without_roots() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/industry/orders/summary/nested").with_status(200).with_body("{}").create_async().await;

        let summary = client_for(&server.url()).get_orders_summary_nested().await.unwrap();

        assert_eq!(summary.roots, None);
    }
}
