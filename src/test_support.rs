//! Local HTTP fixtures shared by async tests.

use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::core::config::UPSTREAM_ROUTE;

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// Fake chatbot: the question selects the response shape.
async fn fake_chatbot(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let question = params
        .get("user_input_question")
        .cloned()
        .unwrap_or_default();
    match question.as_str() {
        "capital" => (StatusCode::OK, r#"{"answer":"Paris"}"#).into_response(),
        "plain" => (StatusCode::OK, "just text").into_response(),
        "empty" => (StatusCode::OK, "").into_response(),
        "blank" => (StatusCode::OK, "   ").into_response(),
        "down" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "accept" => {
            let accept = headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<none>")
                .to_string();
            (StatusCode::OK, accept).into_response()
        }
        "object" => (StatusCode::OK, r#"{"data":{"x":1}}"#).into_response(),
        _ => (
            StatusCode::OK,
            serde_json::json!({ "message": format!("echo: {}", question) }).to_string(),
        )
            .into_response(),
    }
}

/// Start a fake chatbot and return the full upstream endpoint URL.
pub(crate) async fn spawn_fake_chatbot() -> String {
    let base = serve(Router::new().route(UPSTREAM_ROUTE, get(fake_chatbot))).await;
    format!("{}{}", base, UPSTREAM_ROUTE)
}

/// An endpoint on a port nothing listens on.
pub(crate) async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}{}", addr, UPSTREAM_ROUTE)
}
