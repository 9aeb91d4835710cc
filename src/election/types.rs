use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a node's election state machine currently sits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ElectionState {
    /// Not campaigning; waiting for the next tick.
    Idle,
    /// Running the inquiry pass.
    Inquiring,
    /// A victory pass was contested; a retry is pending.
    Contested,
    /// Holds leadership.
    Leader,
}

impl fmt::Display for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ElectionState::Idle => "IDLE",
            ElectionState::Inquiring => "INQUIRING",
            ElectionState::Contested => "CONTESTED",
            ElectionState::Leader => "LEADER",
        };
        f.write_str(label)
    }
}

/// Result of asking every peer whether it concedes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryOutcome {
    /// Every responsive peer conceded. `responsive == 0` is a win by default.
    Clear { responsive: usize },
    /// `peer` refused; the round is abandoned.
    Dissent { peer: String },
}

/// Result of announcing victory to every peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VictoryOutcome {
    /// Every responsive peer accepted.
    Accepted { notified: usize },
    /// These peers refused the claim.
    Contested { by: Vec<String> },
}
