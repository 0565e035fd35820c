//! Bot API client.
//!
//! [`Api::call`] builds `<base>/bot<token>/<method>?<query>`, sends it and
//! unwraps the `{ok, result, description}` envelope. The typed method surface
//! in the submodules is generated on top of it.

#[macro_use]
mod params;

mod bot;
mod chat;
mod forum;
mod games;
mod inline;
mod messages;
mod payments;
mod stickers;
mod webhook;

pub use bot::*;
pub use chat::*;
pub use forum::*;
pub use games::*;
pub use inline::*;
pub use messages::*;
pub use params::{to_query, NoParams};
pub use payments::*;
pub use stickers::*;
pub use webhook::*;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::types::ResponseParameters;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure. The request URL is stripped so the token never
    /// ends up in logs.
    #[error("request to Telegram failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("undecodable Telegram response (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Telegram API error: {description}")]
    Remote {
        description: String,
        error_code: Option<i64>,
        parameters: Option<ResponseParameters>,
    },

    #[error("Telegram response was ok but carried no result")]
    MissingResult,

    #[error("invalid method parameters: {0}")]
    Params(#[source] serde_json::Error),
}

impl ApiError {
    /// Seconds to wait before retrying, when the API asked for it.
    pub fn retry_after(&self) -> Option<i64> {
        match self {
            ApiError::Remote {
                parameters: Some(parameters),
                ..
            } => parameters.retry_after,
            _ => None,
        }
    }
}

/// The `{ok, result, description, error_code, parameters}` wrapper around
/// every Bot API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    /// `Some(Value::Null)` when the field is present but null.
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    description: Option<String>,
    error_code: Option<i64>,
    parameters: Option<ResponseParameters>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A Bot API client bound to one token.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Api {
    client: reqwest::Client,
    base: Url,
    token: String,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("base", &self.base.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Api {
    /// `base` must be an http(s) URL such as `https://api.telegram.org`.
    pub fn new(base: Url, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base, token)
    }

    pub fn with_client(client: reqwest::Client, base: Url, token: impl Into<String>) -> Self {
        Self {
            client,
            base,
            token: token.into(),
        }
    }

    /// Build the shared HTTP client, with an optional overall timeout.
    pub fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn build_url(&self, method: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&format!("bot{}", self.token))
                .push(method);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// Call `method` with `params` and decode its result.
    ///
    /// The envelope is decoded whatever the HTTP status; `ok: false` becomes
    /// [`ApiError::Remote`].
    pub async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = to_query(params).map_err(ApiError::Params)?;
        let url = self.build_url(method, &query);

        debug!("Calling Telegram method {}", method);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))?;

        let envelope: Envelope = serde_json::from_slice(&body)
            .map_err(|source| ApiError::Decode { status, source })?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("{} failed without a description", method));
            warn!(
                "Telegram method {} failed ({}): {}",
                method,
                envelope
                    .error_code
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| status.as_u16().to_string()),
                description
            );
            return Err(ApiError::Remote {
                description,
                error_code: envelope.error_code,
                parameters: envelope.parameters,
            });
        }

        let result = envelope.result.ok_or(ApiError::MissingResult)?;
        serde_json::from_value(result).map_err(|source| ApiError::Decode { status, source })
    }
}
