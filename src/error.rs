//! Error types shared by the registry, node RPC and election layers.

/// Failures surfaced by registry lookups and remote node calls.
#[derive(Debug, thiserror::Error)]
pub enum ElectionError {
    /// The peer could not be reached, timed out, refused the call, or its
    /// registry entry could not be resolved. Callers exclude the peer from
    /// the current round.
    #[error("communication with `{peer}` failed: {reason}")]
    CommunicationFailure { peer: String, reason: String },

    /// `register` was called with a name that already has an entry.
    #[error("name `{0}` is already bound")]
    AlreadyBound(String),

    /// `lookup` found no entry for the name.
    #[error("name `{0}` is not bound")]
    NotFound(String),

    /// The shared directory itself cannot be reached.
    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),
}

impl ElectionError {
    pub fn communication(peer: impl Into<String>, reason: impl ToString) -> Self {
        Self::CommunicationFailure {
            peer: peer.into(),
            reason: reason.to_string(),
        }
    }

    /// Re-labels any registry failure for `peer` as a communication failure,
    /// which is how the election treats an unresolvable peer.
    pub fn into_communication(self, peer: &str) -> Self {
        match self {
            Self::CommunicationFailure { .. } => self,
            other => Self::communication(peer, other),
        }
    }

    pub fn is_communication_failure(&self) -> bool {
        matches!(self, Self::CommunicationFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, ElectionError>;
