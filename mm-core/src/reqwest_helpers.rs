use anyhow::{Context, Result};
use http::Extensions;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Request, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Builds the shared HTTP client. No retries and no timeouts beyond reqwest's defaults.
pub fn create_client() -> Result<ClientWithMiddleware> {
    let reqwest_client = Client::builder().build().context("Failed to build http client")?;

    let client = ClientBuilder::new(reqwest_client)
        .with(JsonHeadersMiddleware)
        .with(ErrorLoggingMiddleware)
        .build();

    Ok(client)
}

/// The backend expects JSON content negotiation headers on every request.
/// Requests that already declare a content type (plain text or gzip uploads) keep it.
#[derive(Clone)]
pub struct JsonHeadersMiddleware;

#[async_trait::async_trait]
impl Middleware for JsonHeadersMiddleware {
    async fn handle(&self, mut req: Request, extensions: &mut Extensions, next: Next<'_>) -> reqwest_middleware::Result<Response> {
        let headers = req.headers_mut();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        next.run(req, extensions).await
    }
}

pub struct ErrorLoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for ErrorLoggingMiddleware {
    async fn handle(&self, req: Request, extensions: &mut Extensions, next: Next<'_>) -> reqwest_middleware::Result<Response> {
        let start = Instant::now();
        let method = req.method().clone();
        let url = req.url().clone();

        let result = next.run(req, extensions).await;

        let duration = start.elapsed();

        match &result {
            Ok(resp) if !resp.status().is_success() => {
                let status = resp.status();

                // expired sessions and unknown characters are routine, not failures of this service
                match status {
                    StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                        warn!("Request failed: {} {} - Status: {}, Duration: {:?}", method, url, status, duration)
                    }
                    _ => error!("Request failed: {} {} - Status: {}, Duration: {:?}", method, url, status, duration),
                }
            }
            Err(e) => {
                error!("Request error: {} {} - Error: {}, Duration: {:?}", method, url, e, duration);
            }
            _ => {
                debug!("Request succeeded: {} {} - Duration: {:?}", method, url, duration);
            }
        }

        result
    }
}
