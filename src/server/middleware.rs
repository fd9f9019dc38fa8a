// Bearer authentication for the protocol endpoint

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;

use super::protocol::{JsonRpcResponse, UNAUTHORIZED};
use super::WingmanServer;

/// Single shared-secret check
#[derive(Clone)]
pub struct AuthGuard {
    secret: String,
}

impl AuthGuard {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// True iff the credential equals the configured secret exactly
    pub fn authorize(&self, credential: Option<&str>) -> bool {
        match credential {
            Some(token) => !self.secret.is_empty() && token == self.secret,
            None => false,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// Everything after the single separating space is the credential, verbatim.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token)
    } else {
        None
    }
}

/// Reject unauthenticated requests before any dispatch happens
pub async fn auth_middleware(
    State(server): State<Arc<WingmanServer>>,
    request: Request,
    next: Next,
) -> Response {
    if !server.auth().authorize(bearer_token(request.headers())) {
        tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated request");
        return unauthorized_response();
    }

    next.run(request).await
}

fn unauthorized_response() -> Response {
    let body = JsonRpcResponse::error(Value::Null, UNAUTHORIZED, "Unauthorized: missing or invalid bearer token");
    let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
