//! Bully Leader Election Simulator Library
//!
//! This library crate defines the modules that make up the simulation.
//! The binary (`main.rs`) wires them into either a participating node or the observer.
//!
//! ## Architecture Modules
//! - **`config`**: `ElectionConfig`, timing and probability knobs with env overrides.
//! - **`error`**: `ElectionError`, the crate-wide error type.
//! - **`registry`**: the shared name → endpoint directory (in-memory store, HTTP server
//!   and client).
//! - **`node`**: `ProcessNode` and its remotely callable surface, plus the transports and
//!   `PeerClient` used to reach other nodes by name.
//! - **`election`**: `ElectionEngine`, the bully-style inquiry/victory protocol.
//! - **`monitor`**: the per-node scheduling loop, failure injection and the observer.
//! - **`fifo`**: `FifoQueue`, a standalone first-come-first-served admission primitive.

pub mod config;
pub mod election;
pub mod error;
pub mod fifo;
pub mod monitor;
pub mod node;
pub mod registry;
