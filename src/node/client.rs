//! Typed calls to peers addressed by registry name.
//!
//! Each call resolves the name through the registry first; an unresolvable name is
//! reported as a `CommunicationFailure` for that peer, exactly like an unreachable one.

use super::protocol::{NodeRequest, NodeResponse};
use super::transport::Transport;
use super::types::{ElectionMessage, NodeIdentity, Priority};
use crate::error::{ElectionError, Result};
use crate::registry::{Endpoint, Registry};

use std::sync::Arc;

pub struct PeerClient<R, T> {
    registry: Arc<R>,
    transport: Arc<T>,
}

impl<R, T> Clone for PeerClient<R, T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<R: Registry, T: Transport> PeerClient<R, T> {
    pub fn new(registry: Arc<R>, transport: Arc<T>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub async fn is_alive(&self, peer: &str) -> Result<bool> {
        let response = self.call(peer, NodeRequest::IsAlive).await?;
        expect_flag(peer, response)
    }

    pub async fn is_leader(&self, peer: &str) -> Result<bool> {
        let response = self.call(peer, NodeRequest::IsLeader).await?;
        expect_flag(peer, response)
    }

    pub async fn priority(&self, peer: &str) -> Result<Priority> {
        match self.call(peer, NodeRequest::Priority).await? {
            NodeResponse::Priority(priority) => Ok(priority),
            other => Err(unexpected(peer, &other)),
        }
    }

    pub async fn identity(&self, peer: &str) -> Result<NodeIdentity> {
        match self.call(peer, NodeRequest::Identity).await? {
            NodeResponse::Identity(identity) => Ok(identity),
            other => Err(unexpected(peer, &other)),
        }
    }

    /// `true` means the peer concedes dominance to the sender.
    pub async fn inquiry(&self, peer: &str, msg: &ElectionMessage) -> Result<bool> {
        let response = self.call(peer, NodeRequest::Inquiry(msg.clone())).await?;
        expect_flag(peer, response)
    }

    /// `true` means the peer accepts the sender as leader; `false` is a contest.
    pub async fn victory(&self, peer: &str, msg: &ElectionMessage) -> Result<bool> {
        let response = self.call(peer, NodeRequest::Victory(msg.clone())).await?;
        expect_flag(peer, response)
    }

    async fn resolve(&self, peer: &str) -> Result<Endpoint> {
        self.registry
            .lookup(peer)
            .await
            .map_err(|e| e.into_communication(peer))
    }

    async fn call(&self, peer: &str, request: NodeRequest) -> Result<NodeResponse> {
        let endpoint = self.resolve(peer).await?;
        self.transport
            .call(&endpoint, request)
            .await
            .map_err(|e| match e {
                ElectionError::CommunicationFailure { reason, .. } => {
                    ElectionError::communication(peer, reason)
                }
                other => other.into_communication(peer),
            })
    }
}

fn expect_flag(peer: &str, response: NodeResponse) -> Result<bool> {
    match response {
        NodeResponse::Flag(flag) => Ok(flag),
        other => Err(unexpected(peer, &other)),
    }
}

fn unexpected(peer: &str, response: &NodeResponse) -> ElectionError {
    ElectionError::communication(peer, format!("unexpected response {:?}", response))
}
