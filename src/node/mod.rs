//! Process Node Module
//!
//! One election participant: its identity, its liveness and leadership flags, and the
//! remotely callable surface other participants use to query and challenge it.
//!
//! ## Components
//! - **`types`**: identity, state snapshot and the `ElectionMessage` carried by election calls.
//! - **`process`**: `ProcessNode`, the owner of all mutable per-node state.
//! - **`protocol`**: the RPC wire enums (`NodeRequest` / `NodeResponse`).
//! - **`handlers`**: axum route serving a node's RPC surface.
//! - **`transport`**: how requests reach a node (`HttpTransport`, `LocalTransport`).
//! - **`client`**: `PeerClient`, typed calls addressed by registry name.
//!
//! Other nodes never write a node's flags directly; they only observe them through RPC
//! reads, and the only remote mutation is a successful `victory` stepping a leader down.

pub mod client;
pub mod handlers;
pub mod process;
pub mod protocol;
pub mod transport;
pub mod types;


pub use client::PeerClient;
pub use process::ProcessNode;
pub use transport::{HttpTransport, LocalTransport, Transport};
pub use types::{ElectionMessage, NodeIdentity, NodeState, Priority};
