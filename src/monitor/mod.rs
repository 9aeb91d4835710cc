//! Scheduling Module
//!
//! Ties each node's election engine, failure injection and liveness of the shared
//! environment together on a fixed cadence, and provides the non-participating observer.
//!
//! ## Components
//! - **`failure`**: `FailureInjector`, random crash + self-healing with a fresh priority.
//! - **`monitor`**: `Monitor`, the per-node loop. Each tick, in order: scan for a leader,
//!   elect if none, roll for a failure, then verify the node's own registry entry.
//! - **`observer`**: `Observer`, polls every registered node and renders one status line
//!   each, never taking part in elections.
//! - **`types`**: observer report types.

pub mod failure;
pub mod monitor;
pub mod observer;
pub mod types;


pub use failure::FailureInjector;
pub use monitor::Monitor;
pub use observer::{OBSERVER_NAME, Observer, is_reserved_name};
pub use types::{PeerReport, PeerStatus};
