use crate::configuration::AppConfiguration;
use crate::mm_client::{make_api_call, ErrorDetail};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::SolarSystemId;
use mockall::automock;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::Debug;

#[automock]
#[async_trait]
pub trait RouteLookup: Send + Sync + Debug {
    /// Systems along the shortest route, both ends included. Empty if no route exists.
    async fn get_route(&self, origin: SolarSystemId, destination: SolarSystemId) -> Result<Vec<SolarSystemId>>;
}

/// Number of jumps along a route as returned by [`RouteLookup::get_route`].
pub fn route_jumps(route: &[SolarSystemId]) -> Option<u32> {
    route.len().checked_sub(1).and_then(|jumps| u32::try_from(jumps).ok())
}

#[derive(Debug, Clone)]
pub struct EsiClient {
    client: ClientWithMiddleware,
    esi_url: String,
    prod_error_messages: bool,
}

impl EsiClient {
    pub fn new(client: ClientWithMiddleware, cfg: &AppConfiguration) -> Self {
        EsiClient {
            client,
            esi_url: cfg.esi_url().to_string(),
            prod_error_messages: cfg.prod_error_messages(),
        }
    }
}

#[async_trait]
impl RouteLookup for EsiClient {
    async fn get_route(&self, origin: SolarSystemId, destination: SolarSystemId) -> Result<Vec<SolarSystemId>> {
        let request = self.client.get(format!("{}/route/{}/{}/", self.esi_url, origin, destination));
        make_api_call(&self.client, request, ErrorDetail::StatusOnly, self.prod_error_messages)
            .await
            .context("Error fetching route")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::configuration::test::vars;
    use crate::reqwest_helpers::create_client;
    use test_log::test;

    fn esi_client_for(esi_url: &str) -> EsiClient {
        let cfg = AppConfiguration::from_vars(vars(&[("API_URL", "http://localhost:8000"), ("APP_URL", "http://localhost:4321"), ("ESI_URL", esi_url)])).unwrap();
        EsiClient::new(create_client().unwrap(), &cfg)
    }

    #[test]
    fn jumps_are_route_length_minus_one() {
        assert_eq!(route_jumps(&[SolarSystemId(1), SolarSystemId(2), SolarSystemId(3)]), Some(2));
        assert_eq!(route_jumps(&[SolarSystemId(1)]), Some(0));
        assert_eq!(route_jumps(&[]), None);
    }

    #[test(tokio::test)]
    async fn route_is_fetched_from_esi() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/route/30002537/30003070/")
            .with_status(200)
            .with_body("[30002537,30002538,30003070]")
            .create_async()
            .await;

        let route = esi_client_for(&server.url()).get_route(SolarSystemId(30002537), SolarSystemId(30003070)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(route_jumps(&route), Some(2));
    }

    #[test(tokio::test)]
    async fn esi_failure_is_labelled() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/route/1/2/")
            .with_status(404)
            .with_body(r#"{"error":"No route found"}"#)
            .create_async()
            .await;

        let err = esi_client_for(&server.url()).get_route(SolarSystemId(1), SolarSystemId(2)).await.unwrap_err();

        assert!(format!("{:#}", err).starts_with("Error fetching route: GET"));
    }
}
