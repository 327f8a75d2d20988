//! Relay proxy: one GET route that forwards questions to the upstream chatbot.
//!
//! Lets a separately hosted front end reach the chatbot through a same-origin or
//! CORS-enabled path.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::core::dispatch::{ChatbotClient, DispatchError, QUESTION_PARAM};

pub const PROXY_ROUTE: &str = "/api/proxy";
pub const TEST_ROUTE: &str = "/api/test";

const MISSING_PARAM_ERROR: &str = "Missing user_input_question parameter";

/// Shared state: the client bound to the upstream chatbot route.
pub struct ProxyState {
    pub upstream: ChatbotClient,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyAnswer {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyError {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
    pub timestamp: String,
    pub method: String,
    pub query: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the proxy router. Every response carries permissive CORS headers.
pub fn create_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route(PROXY_ROUTE, get(relay_question).options(preflight))
        .route(TEST_ROUTE, get(test_function))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ProxyError {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Forward the question upstream and wrap the normalized answer.
async fn relay_question(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // Pairs keep repeated keys; the first occurrence wins.
    let Some(question) = params
        .into_iter()
        .find_map(|(k, v)| (k == QUESTION_PARAM).then_some(v))
        .filter(|q| !q.trim().is_empty())
    else {
        log::info!("Rejected request without {}", QUESTION_PARAM);
        return error_response(StatusCode::BAD_REQUEST, MISSING_PARAM_ERROR);
    };

    log::info!("Relaying question to {}", state.upstream.endpoint());
    match state.upstream.fetch_answer(&question).await {
        Ok(message) => {
            log::debug!("Relayed answer length: {}", message.len());
            (StatusCode::OK, Json(ProxyAnswer { message })).into_response()
        }
        Err(e) => {
            match &e {
                DispatchError::HttpStatus { status, .. } => {
                    log::error!("API Error: upstream status {}: {}", status, e)
                }
                other => log::error!("API Error: {:?}", other),
            }
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Liveness route mirroring the request back.
async fn test_function(
    method: Method,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<TestResponse> {
    log::info!("Test function called");
    Json(TestResponse {
        message: "Test function is working!".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        method: method.to_string(),
        query,
    })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<ProxyState>) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    log::info!(
        "Proxy listening on http://{}{} (upstream {})",
        local,
        PROXY_ROUTE,
        state.upstream.endpoint()
    );
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
