//! HTTP front: the webhook endpoint plus webhook (un)registration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use serde_json::Value;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use url::Url;

use crate::api::{Api, ApiError, SetWebhook};
use crate::config::Config;
use crate::dispatch::{dispatch, BotContext, UpdateHandler};
use crate::env::{EnvError, EnvironmentSlot};
use crate::types::{Update, ALL_UPDATE_KINDS};

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";
pub const WEBHOOK_PATH: &str = "/endpoint";

pub struct AppState {
    pub env: EnvironmentSlot,
    pub client: reqwest::Client,
    pub api_base: Url,
    /// Base URL Telegram should call. Taken from the request headers when unset.
    pub public_url: Option<Url>,
    /// `Host` values trusted to build the webhook URL when `public_url` is unset.
    pub allowed_hosts: Vec<String>,
    pub allowed_updates: Vec<String>,
    pub handler: Arc<dyn UpdateHandler>,
}

impl AppState {
    pub fn new(env: EnvironmentSlot, api_base: Url, handler: Arc<dyn UpdateHandler>) -> Self {
        Self {
            env,
            client: reqwest::Client::new(),
            api_base,
            public_url: None,
            allowed_hosts: Vec::new(),
            allowed_updates: ALL_UPDATE_KINDS.iter().map(|k| k.to_string()).collect(),
            handler,
        }
    }

    pub fn from_config(config: &Config, handler: Arc<dyn UpdateHandler>) -> Result<Self> {
        let client = Api::http_client(config.telegram.request_timeout())
            .context("Failed to build HTTP client")?;
        let mut state = Self::new(
            EnvironmentSlot::with(config.environment()),
            config.telegram.api_url()?,
            handler,
        );
        state.client = client;
        state.public_url = config.server.public_url.clone();
        state.allowed_hosts = config.server.allowed_hosts.clone();
        if let Some(kinds) = &config.telegram.allowed_updates {
            state.allowed_updates = kinds.clone();
        }
        Ok(state)
    }

    /// Snapshot the environment and bind a client to its token.
    fn context(&self) -> Result<BotContext, EnvError> {
        let env = self.env.get()?;
        let api = Api::with_client(self.client.clone(), self.api_base.clone(), env.token.clone());
        Ok(BotContext::new(env, api))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook))
        .route("/registerWebhook", any(register_webhook))
        .route("/unRegisterWebhook", any(unregister_webhook))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn not_configured(e: EnvError) -> Response {
    error!("Rejecting request: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Service not configured").into_response()
}

async fn webhook(State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return not_configured(e),
    };

    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    if !secret_matches(provided, &ctx.env.secret) {
        warn!("Webhook call with missing or wrong secret token");
        return StatusCode::FORBIDDEN.into_response();
    }

    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            warn!("Webhook body is not valid JSON: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response();
        }
    };

    // Malformed updates are still acknowledged so Telegram stops redelivering them.
    match serde_json::from_value::<Update>(body.clone()) {
        Ok(update) => {
            dispatch(state.handler.as_ref(), &ctx, &update).await;
        }
        Err(e) => warn!("Ignoring malformed update: {}", e),
    }

    Json(body).into_response()
}

/// Constant-time check of the secret header against the configured secret.
fn secret_matches(provided: Option<&str>, expected: &str) -> bool {
    provided.is_some_and(|provided| provided.as_bytes().ct_eq(expected.as_bytes()).into())
}

async fn register_webhook(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return not_configured(e),
    };

    let base = match public_base(state.public_url.as_ref(), &state.allowed_hosts, &headers) {
        Ok(base) => base,
        Err(reason) => {
            warn!("Cannot register webhook: {}", reason);
            return (StatusCode::BAD_REQUEST, reason).into_response();
        }
    };
    let url = format!("{}{}", base.trim_end_matches('/'), WEBHOOK_PATH);

    info!("Registering webhook at {}", url);
    let params = SetWebhook::new(url)
        .secret_token(ctx.env.secret.clone())
        .allowed_updates(state.allowed_updates.clone());
    plain_outcome(ctx.api.set_webhook(&params).await)
}

async fn unregister_webhook(State(state): State<Arc<AppState>>) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return not_configured(e),
    };

    info!("Removing webhook");
    plain_outcome(ctx.api.set_webhook(&SetWebhook::new("")).await)
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// `Ok` on success, otherwise the remote description, as plain text.
fn plain_outcome(result: Result<bool, ApiError>) -> Response {
    match result {
        Ok(_) => (StatusCode::OK, "Ok").into_response(),
        Err(ApiError::Remote { description, .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, description).into_response()
        }
        Err(e) => {
            error!("Webhook registration failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// The public base URL for registration. A header-derived host is only used
/// when it appears in `allowed_hosts`.
fn public_base(
    configured: Option<&Url>,
    allowed_hosts: &[String],
    headers: &HeaderMap,
) -> Result<String, &'static str> {
    if let Some(url) = configured {
        return Ok(url.as_str().to_string());
    }

    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .ok_or("Missing Host header")?;
    if !allowed_hosts
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(host))
    {
        return Err("Untrusted Host header");
    }

    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("https");
    Ok(format!("{}://{}", proto, host))
}
