use super::memory::InMemoryRegistry;
use super::protocol::*;
use crate::error::ElectionError;

use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

/// Routes serving `registry` to remote `HttpRegistry` clients.
pub fn router(registry: Arc<InMemoryRegistry>) -> Router {
    Router::new()
        .route(ENDPOINT_REGISTER, post(handle_register))
        .route(&format!("{}/:name", ENDPOINT_LOOKUP), get(handle_lookup))
        .route(ENDPOINT_LIST, get(handle_list))
        .route(&format!("{}/:name", ENDPOINT_ENTRY), delete(handle_deregister))
        .layer(Extension(registry))
}

pub async fn handle_register(
    Extension(registry): Extension<Arc<InMemoryRegistry>>,
    Json(req): Json<RegisterRequest>,
) -> StatusCode {
    match registry.bind(&req.name, req.endpoint) {
        Ok(()) => StatusCode::OK,
        Err(ElectionError::AlreadyBound(name)) => {
            tracing::warn!("Rejected duplicate registration of {}", name);
            StatusCode::CONFLICT
        }
        Err(e) => {
            tracing::error!("Failed to register {}: {}", req.name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn handle_lookup(
    Extension(registry): Extension<Arc<InMemoryRegistry>>,
    Path(name): Path<String>,
) -> (StatusCode, Json<LookupResponse>) {
    match registry.resolve(&name) {
        Ok(endpoint) => (
            StatusCode::OK,
            Json(LookupResponse {
                endpoint: Some(endpoint),
            }),
        ),
        Err(_) => {
            tracing::trace!("Lookup miss for {}", name);
            (StatusCode::NOT_FOUND, Json(LookupResponse { endpoint: None }))
        }
    }
}

pub async fn handle_list(
    Extension(registry): Extension<Arc<InMemoryRegistry>>,
) -> Json<ListResponse> {
    Json(ListResponse {
        names: registry.names(),
    })
}

pub async fn handle_deregister(
    Extension(registry): Extension<Arc<InMemoryRegistry>>,
    Path(name): Path<String>,
) -> StatusCode {
    match registry.unbind(&name) {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::NOT_FOUND,
    }
}
