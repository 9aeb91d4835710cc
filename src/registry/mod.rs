//! Naming Directory Module
//!
//! The shared name → endpoint directory through which participants discover each other.
//! The election core only consumes the [`Registry`] contract; the directory itself is an
//! external collaborator that the simulation happens to host in the observer process.
//!
//! ## Components
//! - **`memory`**: `InMemoryRegistry`, the directory's backing store. Used directly by
//!   in-process clusters and behind the HTTP directory server.
//! - **`client`**: `HttpRegistry`, the remote client every node uses.
//! - **`handlers`**: axum routes exposing an `InMemoryRegistry` over HTTP.
//! - **`protocol`**: endpoint paths and DTOs shared by client and server.
//!
//! A node registers once at startup and removes its entry only on process exit.
//! Losing the ability to resolve one's own entry means the shared environment is gone.

pub mod client;
pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod types;


use crate::error::Result;
use std::future::Future;

pub use client::HttpRegistry;
pub use memory::InMemoryRegistry;
pub use types::Endpoint;

/// Name → endpoint directory.
///
/// `list` order carries no meaning; callers must not rely on it.
pub trait Registry: Send + Sync + 'static {
    /// Binds `name`, failing with `AlreadyBound` if it is taken.
    fn register(&self, name: &str, endpoint: Endpoint) -> impl Future<Output = Result<()>> + Send;

    /// Resolves `name`, failing with `NotFound` if it is unbound.
    fn lookup(&self, name: &str) -> impl Future<Output = Result<Endpoint>> + Send;

    /// Every currently bound name.
    fn list(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Removes `name`, failing with `NotFound` if it is unbound.
    fn deregister(&self, name: &str) -> impl Future<Output = Result<()>> + Send;
}
