use crate::api_error::{error_message, parse_error_message, ApiError};
use crate::configuration::AppConfiguration;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

pub mod characters;
pub mod combatlog;
pub mod doctrines;
pub mod fleets;
pub mod freight;
pub mod industry;
pub mod market;

/// Whether a non-2xx body should be searched for a `detail` message before falling back to the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    StatusOnly,
    PreferDetail,
}

/// Client for the community backend. One instance per process, shared by all aggregations.
#[derive(Debug, Clone)]
pub struct MmClient {
    pub client: ClientWithMiddleware,
    api_url: String,
    prod_error_messages: bool,
}

impl MmClient {
    pub fn new(client: ClientWithMiddleware, cfg: &AppConfiguration) -> Self {
        MmClient {
            client,
            api_url: cfg.api_url().to_string(),
            prod_error_messages: cfg.prod_error_messages(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) async fn make_api_call<T: DeserializeOwned>(&self, request: RequestBuilder, error_detail: ErrorDetail) -> Result<T, ApiError> {
        make_api_call(&self.client, request, error_detail, self.prod_error_messages).await
    }
}

/// Sends `request`, checks the status and decodes the JSON body.
/// The request line is logged before sending.
pub(crate) async fn make_api_call<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    request: RequestBuilder,
    error_detail: ErrorDetail,
    prod_error_messages: bool,
) -> Result<T, ApiError> {
    let request = request.build()?;
    let method = request.method().clone();
    let url = request.url().clone();

    info!("Requesting {} {}", method, url);

    let resp = client.execute(request).await.map_err(|source| ApiError::Transport {
        method: method.clone(),
        url: url.clone(),
        source,
    })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Transport {
        method: method.clone(),
        url: url.clone(),
        source: e.into(),
    })?;

    if !status.is_success() {
        if error_detail == ErrorDetail::PreferDetail {
            let detail = serde_json::from_str::<Value>(&body).ok().and_then(|json| json.get("detail").and_then(parse_error_message));
            if let Some(detail) = detail {
                return Err(ApiError::Detail { method, url, status, detail });
            }
        }

        let message = error_message(status, &format!("{} {}", method, url), prod_error_messages);
        return Err(ApiError::Status { method, url, status, message });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode { method, url, source })
}

/// Query pairs for optional id filters. Absent, zero and negative ids are left out.
pub fn optional_positive_query(params: &[(&'static str, Option<i64>)]) -> Vec<(&'static str, String)> {
    params
        .iter()
        .filter_map(|(name, value)| value.filter(|v| *v > 0).map(|v| (*name, v.to_string())))
        .collect()
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::configuration::test::config_for;
    use crate::reqwest_helpers::create_client;

    pub(crate) fn client_for(server_url: &str) -> MmClient {
        MmClient::new(create_client().unwrap(), &config_for(server_url))
    }

    #[test]
    fn optional_filters_only_keep_positive_values() {
        assert_eq!(
            optional_positive_query(&[("fitting_id", Some(7)), ("fleet_id", Some(3))]),
            vec![("fitting_id", "7".to_string()), ("fleet_id", "3".to_string())]
        );
        assert_eq!(optional_positive_query(&[("fitting_id", None), ("fleet_id", Some(3))]), vec![("fleet_id", "3".to_string())]);
        assert!(optional_positive_query(&[("fitting_id", Some(0)), ("fleet_id", Some(-4))]).is_empty());
    }
}
