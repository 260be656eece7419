use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// non-2xx response
    #[error("{message}")]
    Status { method: Method, url: Url, status: StatusCode, message: String },

    /// non-2xx response whose body carried a usable `detail` field
    #[error("{detail}")]
    Detail { method: Method, url: Url, status: StatusCode, detail: String },

    #[error("Error decoding response of {method} {url}: {source}")]
    Decode { method: Method, url: Url, source: serde_json::Error },

    #[error("{method} {url} could not be sent: {source}")]
    Transport { method: Method, url: Url, source: reqwest_middleware::Error },

    #[error("Request could not be built: {0}")]
    Build(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::Detail { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub fn status_reason(status: StatusCode) -> String {
    let reason = match status.as_u16() {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        405 => "method not allowed",
        408 => "request timeout",
        409 => "conflict",
        422 => "unprocessable entity",
        429 => "too many requests",
        500 => "internal server error",
        502 => "bad gateway",
        503 => "service unavailable",
        504 => "gateway timeout",
        code => {
            return status.canonical_reason().map(|reason| reason.to_lowercase()).unwrap_or_else(|| format!("status {code}"));
        }
    };
    reason.to_string()
}

/// `"<METHOD> <URL> failed because <reason>"`. With production messages the request line is left out.
pub fn error_message(status: StatusCode, request_line: &str, prod_error_messages: bool) -> String {
    let reason = status_reason(status);
    if prod_error_messages {
        format!("Request failed because {reason}")
    } else {
        format!("{request_line} failed because {reason}")
    }
}

/// Turns the `detail` field of an error body into a readable message.
///
/// Plain strings are used as they are. Validation error lists become `"<field>: <msg>"` entries joined with `"; "`.
pub fn parse_error_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => Some(text.trim().to_string()).filter(|text| !text.is_empty()),
        Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let msg = entry.get("msg")?.as_str()?;
                    let field = entry.get("loc").and_then(Value::as_array).and_then(|loc| loc.last()).map(|field| match field {
                        Value::String(name) => name.clone(),
                        other => other.to_string(),
                    });
                    Some(match field {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();

            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
