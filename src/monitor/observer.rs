//! Non-participating status poller.
//!
//! The observer only reads: it never sends `inquiry` or `victory`, and an unreachable
//! peer is rendered as down rather than treated as an error.

use super::types::{PeerReport, PeerStatus};
use crate::error::Result;
use crate::node::{PeerClient, Transport};
use crate::registry::Registry;

use std::time::Duration;

/// Name the observer filters out of every snapshot; participants may not use it.
pub const OBSERVER_NAME: &str = "observer";

/// Whether `name` would be hidden from observer snapshots.
pub fn is_reserved_name(name: &str) -> bool {
    name == OBSERVER_NAME
}

pub struct Observer<R, T> {
    name: String,
    peers: PeerClient<R, T>,
    interval: Duration,
}

impl<R: Registry, T: Transport> Observer<R, T> {
    pub fn new(name: &str, peers: PeerClient<R, T>, interval: Duration) -> Self {
        Self {
            name: name.to_string(),
            peers,
            interval,
        }
    }

    /// Polls every registered name except our own.
    pub async fn snapshot(&self) -> Result<Vec<PeerReport>> {
        let names = self.peers.registry().list().await?;

        let mut reports = Vec::with_capacity(names.len());
        for name in names.into_iter().filter(|name| name != &self.name) {
            let status = self.status_of(&name).await;
            reports.push(PeerReport { name, status });
        }

        Ok(reports)
    }

    async fn status_of(&self, name: &str) -> PeerStatus {
        let priority = match self.peers.priority(name).await {
            Ok(priority) => priority,
            Err(e) => {
                tracing::trace!("Observer could not reach {}: {}", name, e);
                return PeerStatus::Down;
            }
        };

        match (self.peers.is_alive(name).await, self.peers.is_leader(name).await) {
            (Ok(true), Ok(true)) => PeerStatus::Leader { priority },
            (Ok(true), Ok(false)) => PeerStatus::Alive { priority },
            (Ok(false), _) => PeerStatus::Unresponsive { priority },
            _ => PeerStatus::Down,
        }
    }

    /// Header plus one line per report.
    pub fn render(reports: &[PeerReport]) -> Vec<String> {
        let mut lines = Vec::with_capacity(reports.len() + 1);
        lines.push(format!(
            "Total number of candidate processes in leader election: {}",
            reports.len()
        ));
        lines.extend(reports.iter().map(|report| report.to_string()));
        lines
    }

    /// Polls forever on the configured interval.
    pub async fn run(self) {
        tracing::info!(
            "Observer [{}] will not participate in leader election and will just monitor the simulation",
            self.name
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.snapshot().await {
                Ok(reports) if reports.is_empty() => {
                    tracing::debug!("No candidate processes registered yet");
                }
                Ok(reports) => {
                    for line in Self::render(&reports) {
                        tracing::info!("{}", line);
                    }
                }
                Err(e) => {
                    tracing::warn!("Observer failed to list registry: {}", e);
                }
            }
        }
    }
}
