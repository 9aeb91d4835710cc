//! Random crash simulation.
//!
//! On a hit the node goes dead (clearing `alive` and `leader`), stays dead for the
//! recovery window, then comes back alive with a freshly sampled priority. Calls that
//! reach it in between fail as communication failures; that is the point.

use crate::config::ElectionConfig;
use crate::node::ProcessNode;
use crate::node::types::sample_priority;

use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FailureInjector {
    probability: f64,
    recovery_window: Duration,
    priority_range: u32,
}

impl FailureInjector {
    pub fn new(probability: f64, recovery_window: Duration, priority_range: u32) -> Self {
        Self {
            probability: if probability.is_finite() {
                probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
            recovery_window,
            priority_range: priority_range.max(1),
        }
    }

    pub fn from_config(config: &ElectionConfig) -> Self {
        Self::new(
            config.failure_probability,
            config.recovery_window,
            config.priority_range,
        )
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Rolls for a failure on an alive node and, on a hit, runs the whole
    /// crash → recovery cycle before returning. Returns whether it hit.
    pub async fn roll(&self, node: &ProcessNode) -> bool {
        if !node.is_alive().await {
            return false;
        }

        let hit = rand::thread_rng().gen_bool(self.probability);
        if !hit {
            return false;
        }

        self.inject(node).await
    }

    /// Crashes `node`, waits out the recovery window, then heals it with a new priority.
    /// Returns `false` without waiting if the node was already dead.
    pub async fn inject(&self, node: &ProcessNode) -> bool {
        if !node.crash().await {
            return false;
        }

        tracing::warn!(
            "Process [{}] encountered an error and became unresponsive for {:?}",
            node.name(),
            self.recovery_window
        );

        tokio::time::sleep(self.recovery_window).await;

        let priority = sample_priority(self.priority_range);
        if node.recover(priority).await {
            tracing::info!(
                "Process [{}] auto-healed with new priority ({})",
                node.name(),
                priority
            );
        }

        true
    }
}
