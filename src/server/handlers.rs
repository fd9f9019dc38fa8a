// HTTP request handlers

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::middleware::auth_middleware;
use super::protocol::{
    call_tool_result, initialize_result, tools_list_result, CallToolParams, JsonRpcRequest,
    JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use super::WingmanServer;
use crate::providers::BackendInfo;
use crate::tools::InvocationRequest;

/// Request body ceiling for `/mcp`. Screenshots arrive base64-encoded inline,
/// so this sits well above the normalized image limit.
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

/// Create the application router. Only `/mcp` sits behind the auth guard.
pub fn create_router(server: Arc<WingmanServer>) -> Router {
    let protected = Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/mcp/", post(handle_mcp))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&server),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(server)
}

/// Handle GET / - plain-text description for humans
pub async fn landing_page(State(server): State<Arc<WingmanServer>>) -> String {
    let names = server.dispatcher().registry().tool_names().join(", ");
    format!(
        "Dating Wingman MCP server\n\n\
        Send JSON-RPC 2.0 requests to POST /mcp with an \
        `Authorization: Bearer <token>` header.\n\n\
        Tools: {}\n",
        names
    )
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub tool_count: usize,
    pub backend_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendInfo>,
    pub uptime_seconds: u64,
}

/// Handle GET /health
pub async fn health_check(State(server): State<Arc<WingmanServer>>) -> Json<HealthStatus> {
    let dispatcher = server.dispatcher();
    Json(HealthStatus {
        status: "ok".to_string(),
        tool_count: dispatcher.registry().len(),
        backend_configured: dispatcher.context().backend.is_configured(),
        backend: dispatcher.context().backend.info(),
        uptime_seconds: server.uptime_seconds(),
    })
}

/// Handle POST /mcp - one JSON-RPC message per request
pub async fn handle_mcp(State(server): State<Arc<WingmanServer>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Unparseable request body: {}", e);
            return rpc_response(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    if value.is_array() {
        return rpc_response(JsonRpcResponse::error(
            Value::Null,
            INVALID_REQUEST,
            "Batch requests are not supported",
        ));
    }

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return rpc_response(JsonRpcResponse::error(
                Value::Null,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ));
        }
    };

    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "Notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return rpc_response(JsonRpcResponse::error(
            id,
            INVALID_REQUEST,
            "jsonrpc must be \"2.0\"",
        ));
    }

    tracing::debug!(method = %request.method, "Handling request");

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::result(id, initialize_result()),
        "ping" => JsonRpcResponse::result(id, json!({})),
        "tools/list" => JsonRpcResponse::result(
            id,
            tools_list_result(server.dispatcher().registry().list_tools()),
        ),
        "tools/call" => match serde_json::from_value::<CallToolParams>(request.params) {
            Ok(params) => {
                let invocation =
                    InvocationRequest::new(params.name, params.arguments.unwrap_or_default());
                let result = server.dispatcher().dispatch(invocation).await;
                JsonRpcResponse::result(id, call_tool_result(&result))
            }
            Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e)),
        },
        other => {
            tracing::debug!(method = %other, "Unknown method");
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
        }
    };

    rpc_response(response)
}

fn rpc_response(response: JsonRpcResponse) -> Response {
    (StatusCode::OK, Json(response)).into_response()
}
