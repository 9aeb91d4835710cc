use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Randomised election priority. Higher wins.
pub type Priority = u32;

/// Draws a priority uniformly from `0..range`.
///
/// `range` must be non-zero; `ElectionConfig::sanitized` guarantees that.
pub fn sample_priority(range: u32) -> Priority {
    rand::thread_rng().gen_range(0..range)
}

/// Who a node is. `name` never changes; `priority` is resampled on every
/// dead → alive transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeIdentity {
    pub name: String,
    pub priority: Priority,
}

/// Snapshot of a node's flags, both owned by the node itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeState {
    pub alive: bool,
    pub leader: bool,
}

/// Immutable `(sender, priority)` pair carried by `inquiry` and `victory`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElectionMessage {
    pub sender_name: String,
    pub sender_priority: Priority,
}

impl ElectionMessage {
    pub fn new(sender_name: impl Into<String>, sender_priority: Priority) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_priority,
        }
    }
}

impl fmt::Display for ElectionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.sender_name, self.sender_priority)
    }
}
