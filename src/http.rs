use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::extract::ExtractionResult;
use crate::mcp::contracts;
use crate::mcp::errors;
use crate::mcp::protocol::{self, RequestId, Response as RpcResponse, RpcError};

struct AppState {
    dispatcher: Arc<Dispatcher>,
    notifications: broadcast::Sender<String>,
    message_path: &'static str,
}

/// HTTP transport: the JSON-RPC message endpoint, the SSE stream, and the
/// browser-facing helper endpoints. JSON-RPC dispatch runs on the blocking
/// pool so the extraction path stays synchronous.
pub async fn serve(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Result<()> {
    let (notifications, _) = broadcast::channel(64);
    let message_path = config.mode.message_path();
    let state = Arc::new(AppState {
        dispatcher,
        notifications,
        message_path,
    });

    let router = Router::new()
        .route(message_path, post(rpc_message))
        .route("/sse", get(sse_stream))
        .route("/api/test-extract", post(test_extract))
        .route("/api/health", get(health).post(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    let addr = listener
        .local_addr()
        .context("failed to read bound address")?;
    info!(mode = ?config.mode, "http transport starting");
    info!("  POST {message_path} - JSON-RPC messages");
    info!("  GET /sse - notification stream");
    info!("  POST /api/test-extract - direct extraction");
    info!("  GET|POST /api/health - health check");
    info!("listening on {addr}");

    axum::serve(listener, router)
        .await
        .context("http server terminated")?;
    Ok(())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// JSON-RPC over HTTP. Protocol failures are JSON-RPC error responses with
/// HTTP 200; only a notification changes the status line.
async fn rpc_message(State(state): State<Arc<AppState>>, body: String) -> Response {
    let dispatcher = state.dispatcher.clone();
    let outcome = tokio::task::spawn_blocking(move || match protocol::parse_request(&body) {
        Ok(request) => {
            let method = request.method.clone();
            (dispatcher.handle_request(request), Some(method))
        }
        Err(e) => (Some(RpcResponse::from_error(RequestId::Null, e)), None),
    })
    .await;

    let (response, method) = match outcome {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "request handler panicked");
            (
                Some(RpcResponse::from_error(
                    RequestId::Null,
                    RpcError::InternalError("request handler failed".to_string()),
                )),
                None,
            )
        }
    };

    if method.as_deref() == Some("tools/call") {
        // A failed send just means no SSE subscriber is connected.
        let _ = state.notifications.send(log_notification("tools/call"));
    }

    match response {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// SSE stream. The first event tells the client where to POST messages;
/// afterwards the stream relays log notifications and keep-alive pings.
async fn sse_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4();
    info!(%session_id, "sse client connected");

    let endpoint = format!("{}?sessionId={session_id}", state.message_path);
    let greeting = tokio_stream::once(Ok::<_, Infallible>(
        Event::default().event("endpoint").data(endpoint),
    ));
    let feed = BroadcastStream::new(state.notifications.subscribe())
        .filter_map(|message| message.ok())
        .map(|message| Ok::<_, Infallible>(Event::default().event("message").data(message)));

    Sse::new(greeting.chain(feed)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Direct extraction endpoint for browser consoles and smoke tests. Unlike
/// the JSON-RPC path it maps the outcome onto the HTTP status line.
async fn test_extract(State(state): State<Arc<AppState>>, body: String) -> Response {
    let filename = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("filename").and_then(Value::as_str).map(String::from));

    let Some(filename) = filename else {
        let result = ExtractionResult::protocol_error("missing required parameter: filename");
        return envelope_response(StatusCode::BAD_REQUEST, &result);
    };

    let dispatcher = state.dispatcher.clone();
    let outcome =
        tokio::task::spawn_blocking(move || dispatcher.extractor().extract(&filename)).await;

    match outcome {
        Ok(result) => envelope_response(status_for(&result), &result),
        Err(e) => {
            warn!(error = %e, "extraction task panicked");
            let result = ExtractionResult::Error {
                kind: errors::INTERNAL,
                message: "extraction task failed".to_string(),
            };
            envelope_response(StatusCode::INTERNAL_SERVER_ERROR, &result)
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "server": contracts::HEALTH_SERVER_NAME,
        "version": contracts::HEALTH_SERVER_VERSION,
    }))
}

fn envelope_response(status: StatusCode, result: &ExtractionResult) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        result.body(),
    )
        .into_response()
}

fn status_for(result: &ExtractionResult) -> StatusCode {
    match result.error_kind() {
        None => StatusCode::OK,
        Some(errors::NOT_FOUND) => StatusCode::NOT_FOUND,
        Some(errors::PROTOCOL) => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_notification(method: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "method": "notifications/message",
        "params": {
            "level": "info",
            "logger": env!("CARGO_PKG_NAME"),
            "data": format!("handled {method}"),
        },
    })
    .to_string()
}
