//! Request Delivery
//!
//! A `Transport` carries one `NodeRequest` to the node behind an endpoint and returns its
//! reply. Any failure to get a reply (refused, timed out, node unresponsive, unknown
//! endpoint, garbled body) is a `CommunicationFailure`.

use super::process::ProcessNode;
use super::protocol::{ENDPOINT_RPC, NodeRequest, NodeResponse};
use crate::error::{ElectionError, Result};
use crate::registry::Endpoint;

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub trait Transport: Send + Sync + 'static {
    fn call(
        &self,
        endpoint: &Endpoint,
        request: NodeRequest,
    ) -> impl Future<Output = Result<NodeResponse>> + Send;
}

/// JSON over HTTP with a per-call deadline.
pub struct HttpTransport {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
        }
    }
}

impl Transport for HttpTransport {
    async fn call(&self, endpoint: &Endpoint, request: NodeRequest) -> Result<NodeResponse> {
        let url = format!("{}{}", endpoint.base_url(), ENDPOINT_RPC);

        let response = self
            .http_client
            .post(url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ElectionError::communication(endpoint.as_str(), e))?;

        if !response.status().is_success() {
            return Err(ElectionError::communication(
                endpoint.as_str(),
                format!("peer answered {}", response.status()),
            ));
        }

        response
            .json::<NodeResponse>()
            .await
            .map_err(|e| ElectionError::communication(endpoint.as_str(), e))
    }
}

/// Delivers requests to nodes living in the same process.
///
/// Lets a whole cluster run inside one runtime; detaching a node simulates it
/// becoming unreachable.
#[derive(Default)]
pub struct LocalTransport {
    nodes: DashMap<Endpoint, Arc<ProcessNode>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `node` reachable and returns the endpoint to register it under.
    pub fn attach(&self, node: Arc<ProcessNode>) -> Endpoint {
        let endpoint = Endpoint::local(node.name());
        self.nodes.insert(endpoint.clone(), node);
        endpoint
    }

    pub fn detach(&self, endpoint: &Endpoint) -> Option<Arc<ProcessNode>> {
        self.nodes.remove(endpoint).map(|(_, node)| node)
    }
}

impl Transport for LocalTransport {
    async fn call(&self, endpoint: &Endpoint, request: NodeRequest) -> Result<NodeResponse> {
        let node = self
            .nodes
            .get(endpoint)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ElectionError::communication(endpoint.as_str(), "no such endpoint"))?;

        node.handle(request).await
    }
}
