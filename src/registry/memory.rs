//! In-memory directory backed by a `DashMap`.

use super::Registry;
use super::types::Endpoint;
use crate::error::{ElectionError, Result};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// The directory's authoritative store.
///
/// Shared by reference between an in-process cluster's nodes, or wrapped by
/// the HTTP handlers when hosted for separate processes.
#[derive(Default)]
pub struct InMemoryRegistry {
    entries: DashMap<String, Endpoint>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, name: &str, endpoint: Endpoint) -> Result<()> {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ElectionError::AlreadyBound(name.to_string())),
            Entry::Vacant(slot) => {
                tracing::info!("Bound {} -> {}", name, endpoint);
                slot.insert(endpoint);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Result<Endpoint> {
        self.entries
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ElectionError::NotFound(name.to_string()))
    }

    /// Bound names, sorted so output is stable for logs and tests.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn unbind(&self, name: &str) -> Result<()> {
        match self.entries.remove(name) {
            Some(_) => {
                tracing::info!("Unbound {}", name);
                Ok(())
            }
            None => Err(ElectionError::NotFound(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Registry for InMemoryRegistry {
    async fn register(&self, name: &str, endpoint: Endpoint) -> Result<()> {
        self.bind(name, endpoint)
    }

    async fn lookup(&self, name: &str) -> Result<Endpoint> {
        self.resolve(name)
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.names())
    }

    async fn deregister(&self, name: &str) -> Result<()> {
        self.unbind(name)
    }
}
