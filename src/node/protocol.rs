//! Node RPC Protocol
//!
//! A node exposes a single JSON endpoint. Requests and responses are externally
//! tagged enums, e.g. `"IsAlive"` or `{"Inquiry": {"senderName": "P1", "senderPriority": 42}}`.

use super::types::{ElectionMessage, NodeIdentity, Priority};
use serde::{Deserialize, Serialize};

/// Endpoint serving every node RPC.
pub const ENDPOINT_RPC: &str = "/rpc";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeRequest {
    IsAlive,
    IsLeader,
    Priority,
    Identity,
    Inquiry(ElectionMessage),
    Victory(ElectionMessage),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeResponse {
    Flag(bool),
    Priority(Priority),
    Identity(NodeIdentity),
}
