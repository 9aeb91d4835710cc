use super::process::ProcessNode;
use super::protocol::{ENDPOINT_RPC, NodeRequest, NodeResponse};

use axum::{Extension, Json, Router, http::StatusCode, routing::post};
use std::sync::Arc;

/// Routes serving `node`'s RPC surface.
pub fn router(node: Arc<ProcessNode>) -> Router {
    Router::new()
        .route(ENDPOINT_RPC, post(handle_rpc))
        .layer(Extension(node))
}

/// Answers `503` while the node is inside its recovery window, so callers see a
/// communication failure rather than a reply.
pub async fn handle_rpc(
    Extension(node): Extension<Arc<ProcessNode>>,
    Json(request): Json<NodeRequest>,
) -> Result<Json<NodeResponse>, (StatusCode, String)> {
    tracing::trace!("Process [{}] received {:?}", node.name(), request);

    match node.handle(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::debug!("Process [{}] rejected call: {}", node.name(), e);
            Err((StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
    }
}
