use crate::mm_client::{ErrorDetail, MmClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::{FreightContract, FreightRoute, FreightRouteOption, RouteCost, RouteId, RouteOptionId, SpaceTruckerStatistics};
use mockall::automock;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait FreightApi: Send + Sync + Debug {
    async fn get_routes(&self) -> Result<Vec<FreightRoute>>;
    async fn get_route_options(&self, route_id: RouteId) -> Result<Vec<FreightRouteOption>>;
    async fn get_route_cost(&self, route_id: RouteId, route_option_id: RouteOptionId, collateral: i64) -> Result<RouteCost>;
    /// Outstanding contracts, or the completed ones with `history`.
    async fn get_contracts(&self, history: bool) -> Result<Vec<FreightContract>>;
    async fn get_characters_statistics(&self) -> Result<Vec<SpaceTruckerStatistics>>;
}

#[async_trait]
impl FreightApi for MmClient {
    async fn get_routes(&self) -> Result<Vec<FreightRoute>> {
        let request = self.client.get(self.endpoint("/api/freight/routes"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching freight routes")
    }

    async fn get_route_options(&self, route_id: RouteId) -> Result<Vec<FreightRouteOption>> {
        let request = self.client.get(self.endpoint(&format!("/api/freight/{route_id}/options")));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching freight route options")
    }

    async fn get_route_cost(&self, route_id: RouteId, route_option_id: RouteOptionId, collateral: i64) -> Result<RouteCost> {
        let request = self
            .client
            .get(self.endpoint(&format!("/api/freight/routes/{route_id}/options/{route_option_id}/cost")))
            .query(&[("collateral", collateral)]);
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching freight route cost")
    }

    async fn get_contracts(&self, history: bool) -> Result<Vec<FreightContract>> {
        let path = if history { "/api/freight/contracts/history" } else { "/api/freight/contracts" };
        let request = self.client.get(self.endpoint(path));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching freight contracts")
    }

    async fn get_characters_statistics(&self) -> Result<Vec<SpaceTruckerStatistics>> {
        let request = self.client.get(self.endpoint("/api/freight/character-statistics"));
        self.make_api_call(request, ErrorDetail::StatusOnly).await.context("Error fetching freight contracts")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api_error::ApiError;
    use crate::mm_client::test::client_for;
    use mockito::Matcher;
    use reqwest::StatusCode;
    use test_log::test;

    #[test(tokio::test)]
    async fn routes_are_decoded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/freight/routes")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(
                r#"[{"route_id":1,"orgin":{"location_id":10,"name":"Sosala - WATERMELLON","short_name":"Sosala"},"destination":{"location_id":20,"name":"BWF - Ouroboros","short_name":"BWF"},"bidirectional":true}]"#,
            )
            .create_async()
            .await;

        let routes = client_for(&server.url()).get_routes().await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].origin.short_name, "Sosala");
        assert_eq!(routes[0].destination.location_id.0, 20);
    }

    #[test(tokio::test)]
    async fn route_cost_uses_route_option_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/freight/routes/1/options/4/cost")
            .match_query(Matcher::UrlEncoded("collateral".to_string(), "2000".to_string()))
            .with_status(200)
            .with_body(r#"{"route_id":4,"cost":5000000}"#)
            .create_async()
            .await;

        let cost = client_for(&server.url()).get_route_cost(RouteId(1), RouteOptionId(4), 2000).await.unwrap();

        mock.assert_async().await;
        assert_eq!(cost.cost, 5_000_000);
    }

    #[test(tokio::test)]
    async fn history_flag_selects_history_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/api/freight/contracts/history").with_status(200).with_body("[]").create_async().await;

        let contracts = client_for(&server.url()).get_contracts(true).await.unwrap();

        mock.assert_async().await;
        assert!(contracts.is_empty());
    }

    #[test(tokio::test)]
    async fn not_found_mentions_method_and_url() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/freight/7/options").with_status(404).with_body(r#"{"detail":"Not Found"}"#).create_async().await;

        let err = client_for(&server.url()).get_route_options(RouteId(7)).await.unwrap_err();

        let msg = format!("{:#}", err);
        assert!(msg.starts_with("Error fetching freight route options: "));
        assert!(msg.contains(&format!("GET {}/api/freight/7/options", server.url())));
        assert!(msg.ends_with("failed because not found"));
        assert_eq!(err.downcast_ref::<ApiError>().and_then(ApiError::status), Some(StatusCode::NOT_FOUND));
    }

    #[test(tokio::test)]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/freight/character-statistics").with_status(200).with_body("not json").create_async().await;

        let err = client_for(&server.url()).get_characters_statistics().await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Decode { .. })));
        assert!(format!("{:#}", err).starts_with("Error fetching freight contracts: Error decoding response of GET"));
    }
}
