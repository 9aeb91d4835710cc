//! Participant State
//!
//! `ProcessNode` owns one participant's priority and its `alive` / `leader` flags.
//! All three live behind a single lock so that `victory`'s compare-then-clear and the
//! crash/recover transitions are atomic with respect to each other and to inbound reads.

use super::protocol::{NodeRequest, NodeResponse};
use super::types::{ElectionMessage, NodeIdentity, NodeState, Priority, sample_priority};
use crate::error::{ElectionError, Result};

use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Vitals {
    priority: Priority,
    alive: bool,
    leader: bool,
}

pub struct ProcessNode {
    name: String,
    vitals: RwLock<Vitals>,
}

impl ProcessNode {
    /// Creates an alive, non-leader node with a priority drawn from `0..priority_range`.
    pub fn new(name: &str, priority_range: u32) -> Arc<Self> {
        Self::with_priority(name, sample_priority(priority_range))
    }

    pub fn with_priority(name: &str, priority: Priority) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            vitals: RwLock::new(Vitals {
                priority,
                alive: true,
                leader: false,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn is_alive(&self) -> bool {
        self.vitals.read().await.alive
    }

    pub async fn is_leader(&self) -> bool {
        self.vitals.read().await.leader
    }

    pub async fn priority(&self) -> Priority {
        self.vitals.read().await.priority
    }

    pub async fn identity(&self) -> NodeIdentity {
        NodeIdentity {
            name: self.name.clone(),
            priority: self.priority().await,
        }
    }

    pub async fn state(&self) -> NodeState {
        let vitals = self.vitals.read().await;
        NodeState {
            alive: vitals.alive,
            leader: vitals.leader,
        }
    }

    /// The message this node campaigns with at its current priority.
    pub async fn election_message(&self) -> ElectionMessage {
        ElectionMessage::new(self.name.clone(), self.priority().await)
    }

    /// Concedes to the caller iff our priority is strictly lower.
    pub async fn inquiry(&self, msg: &ElectionMessage) -> bool {
        self.vitals.read().await.priority < msg.sender_priority
    }

    /// Accepts the caller as leader iff our priority is strictly lower, stepping
    /// down if we held leadership. Otherwise contests without touching state.
    pub async fn victory(&self, msg: &ElectionMessage) -> bool {
        let mut vitals = self.vitals.write().await;
        if vitals.priority < msg.sender_priority {
            if vitals.leader {
                tracing::info!(
                    "Process [{}] stepping down in favour of {}",
                    self.name,
                    msg
                );
                vitals.leader = false;
            }
            true
        } else {
            tracing::debug!(
                "Process [{}] ({}) contests victory of {}",
                self.name,
                vitals.priority,
                msg
            );
            false
        }
    }

    /// Marks this node leader, provided it is still alive and still holds the
    /// priority it campaigned with. A crash or recovery mid-round voids the claim.
    pub async fn claim_leadership(&self, campaign_priority: Priority) -> bool {
        let mut vitals = self.vitals.write().await;
        if vitals.alive && vitals.priority == campaign_priority {
            vitals.leader = true;
            true
        } else {
            false
        }
    }

    /// Alive → dead: clears both flags. Returns `false` if already dead.
    pub async fn crash(&self) -> bool {
        let mut vitals = self.vitals.write().await;
        if !vitals.alive {
            return false;
        }
        vitals.alive = false;
        vitals.leader = false;
        true
    }

    /// Dead → alive with a fresh priority. Returns `false`, leaving the priority
    /// untouched, if the node was not dead.
    pub async fn recover(&self, priority: Priority) -> bool {
        let mut vitals = self.vitals.write().await;
        if vitals.alive {
            return false;
        }
        vitals.alive = true;
        vitals.priority = priority;
        true
    }

    /// Serves one inbound RPC.
    ///
    /// While dead the node still answers the pure reads (reporting `alive = false`)
    /// but is unreachable for `inquiry` and `victory`.
    pub async fn handle(&self, request: NodeRequest) -> Result<NodeResponse> {
        match request {
            NodeRequest::IsAlive => Ok(NodeResponse::Flag(self.is_alive().await)),
            NodeRequest::IsLeader => Ok(NodeResponse::Flag(self.is_leader().await)),
            NodeRequest::Priority => Ok(NodeResponse::Priority(self.priority().await)),
            NodeRequest::Identity => Ok(NodeResponse::Identity(self.identity().await)),
            NodeRequest::Inquiry(msg) => {
                self.ensure_responsive().await?;
                Ok(NodeResponse::Flag(self.inquiry(&msg).await))
            }
            NodeRequest::Victory(msg) => {
                self.ensure_responsive().await?;
                Ok(NodeResponse::Flag(self.victory(&msg).await))
            }
        }
    }

    async fn ensure_responsive(&self) -> Result<()> {
        if self.is_alive().await {
            Ok(())
        } else {
            Err(ElectionError::communication(&self.name, "process is unresponsive"))
        }
    }
}
