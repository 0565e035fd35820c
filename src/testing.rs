//! In-process stand-in for the Bot API, used by the tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use crate::api::Api;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub token: String,
    pub method: String,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
enum Canned {
    Json(Value),
    Raw(String),
}

#[derive(Default)]
struct FakeState {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<String, Canned>>,
    webhook_url: Mutex<String>,
}

/// Records every call and answers `{"ok":true,"result":true}` unless told
/// otherwise. `setWebhook` and `getWebhookInfo` share a stored webhook URL.
pub struct FakeTelegram {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeTelegram {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/{bot}/{method}", any(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn api(&self, token: &str) -> Api {
        Api::new(self.base_url(), token)
    }

    pub fn respond(&self, method: &str, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(method.to_string(), Canned::Json(body));
    }

    pub fn respond_raw(&self, method: &str, body: &str) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(method.to_string(), Canned::Raw(body.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn webhook_url(&self) -> String {
        self.state.webhook_url.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    Path((bot, method)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let token = bot.strip_prefix("bot").unwrap_or(&bot).to_string();

    if method == "setWebhook" {
        if let Some(url) = query.get("url") {
            *state.webhook_url.lock().unwrap() = url.clone();
        }
    }

    state.calls.lock().unwrap().push(RecordedCall {
        token,
        method: method.clone(),
        query,
    });

    let canned = state.responses.lock().unwrap().get(&method).cloned();
    match canned {
        Some(Canned::Json(body)) => {
            let status = if body["ok"] == json!(false) {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            (status, Json(body)).into_response()
        }
        Some(Canned::Raw(body)) => (StatusCode::BAD_GATEWAY, body).into_response(),
        None if method == "getWebhookInfo" => {
            let url = state.webhook_url.lock().unwrap().clone();
            Json(json!({
                "ok": true,
                "result": {"url": url, "has_custom_certificate": false, "pending_update_count": 0}
            }))
            .into_response()
        }
        None => Json(json!({"ok": true, "result": true})).into_response(),
    }
}
