use crate::node::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the observer saw when it polled one registered name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeerStatus {
    Leader { priority: Priority },
    Alive { priority: Priority },
    /// Reachable but inside its recovery window.
    Unresponsive { priority: Priority },
    /// Could not be reached or resolved at all.
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeerReport {
    pub name: String,
    pub status: PeerStatus,
}

impl fmt::Display for PeerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (priority, label) = match &self.status {
            PeerStatus::Leader { priority } => (priority, "Leader"),
            PeerStatus::Alive { priority } => (priority, "Alive"),
            PeerStatus::Unresponsive { priority } => (priority, "Unresponsive"),
            PeerStatus::Down => {
                return write!(
                    f,
                    "Process [{}] is down and disconnected, restart it to participate again.",
                    self.name
                );
            }
        };

        write!(
            f,
            "Process [{}] is up with priority ({}) and status: {}",
            self.name, priority, label
        )
    }
}
