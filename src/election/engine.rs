//! Per-node election state machine.
//!
//! The engine is driven by the monitor loop: one `tick` per cadence step. Contests are
//! retried in a bounded loop inside the tick; anything still unresolved falls back to
//! `Idle` and is picked up again on the next tick.

use super::types::{ElectionState, InquiryOutcome, VictoryOutcome};
use crate::error::Result;
use crate::node::{ElectionMessage, PeerClient, ProcessNode, Transport};
use crate::registry::Registry;

use std::sync::Arc;

pub struct ElectionEngine<R, T> {
    node: Arc<ProcessNode>,
    peers: PeerClient<R, T>,
    state: ElectionState,
    max_contest_retries: usize,
}

impl<R: Registry, T: Transport> ElectionEngine<R, T> {
    pub fn new(node: Arc<ProcessNode>, peers: PeerClient<R, T>, max_contest_retries: usize) -> Self {
        Self {
            node,
            peers,
            state: ElectionState::Idle,
            max_contest_retries,
        }
    }

    pub fn node(&self) -> &Arc<ProcessNode> {
        &self.node
    }

    pub fn peers(&self) -> &PeerClient<R, T> {
        &self.peers
    }

    /// Current state, reconciled with the node's flag: leadership lost to a crash
    /// or to a higher victory call returns the machine to `Idle`.
    pub async fn state(&mut self) -> ElectionState {
        if self.state == ElectionState::Leader && !self.node.is_leader().await {
            tracing::info!("Process [{}] is no longer leader", self.node.name());
            self.state = ElectionState::Idle;
        }
        self.state
    }

    /// One monitor step: elect only if alive, not leading, and no leader is visible.
    pub async fn tick(&mut self) -> Result<ElectionState> {
        let state = self.state().await;
        if state == ElectionState::Leader || !self.node.is_alive().await {
            return Ok(state);
        }

        match self.find_leader().await? {
            Some(leader) => {
                tracing::info!("Leader process in distributed system is: {}", leader);
                self.state = ElectionState::Idle;
                Ok(self.state)
            }
            None => self.run_election().await,
        }
    }

    /// First peer reporting both `alive` and `leader`, if any.
    pub async fn find_leader(&self) -> Result<Option<String>> {
        for peer in self.other_peers().await? {
            let alive = self.peers.is_alive(&peer).await;
            let leader = self.peers.is_leader(&peer).await;

            match (alive, leader) {
                (Ok(true), Ok(true)) => return Ok(Some(peer)),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::debug!("Leader scan skipped {}: {}", peer, e);
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Runs inquiry → victory, retrying contested victories up to the configured bound.
    pub async fn run_election(&mut self) -> Result<ElectionState> {
        let result = self.campaign().await;
        if result.is_err() {
            self.state = ElectionState::Idle;
        }
        result
    }

    async fn campaign(&mut self) -> Result<ElectionState> {
        tracing::info!(
            "No leader elected in distributed system, Process [{}] calling inquiry",
            self.node.name()
        );

        for attempt in 0..=self.max_contest_retries {
            if !self.node.is_alive().await {
                self.state = ElectionState::Idle;
                return Ok(self.state);
            }

            let msg = self.node.election_message().await;
            self.state = ElectionState::Inquiring;

            match self.inquiry_pass(&msg).await? {
                InquiryOutcome::Dissent { peer } => {
                    tracing::info!(
                        "Process [{}] ({}) defers to {}",
                        msg.sender_name,
                        msg.sender_priority,
                        peer
                    );
                    self.state = ElectionState::Idle;
                    return Ok(self.state);
                }
                InquiryOutcome::Clear { responsive: 0 } => {
                    tracing::info!(
                        "Process [{}] found no responsive peers, winning by default",
                        msg.sender_name
                    );
                }
                InquiryOutcome::Clear { .. } => {}
            }

            tracing::info!(
                "Process [{}] seems to be a leader, announcing victory",
                msg.sender_name
            );

            match self.victory_pass(&msg).await? {
                VictoryOutcome::Accepted { notified } => {
                    if self.node.claim_leadership(msg.sender_priority).await {
                        tracing::info!(
                            "Process [{}] is elected as leader ({} peers notified)",
                            msg.sender_name,
                            notified
                        );
                        self.state = ElectionState::Leader;
                    } else {
                        tracing::info!(
                            "Process [{}] failed during the round, leadership not claimed",
                            msg.sender_name
                        );
                        self.state = ElectionState::Idle;
                    }
                    return Ok(self.state);
                }
                VictoryOutcome::Contested { by } => {
                    tracing::info!(
                        "Victory countered by process(es) {:?} (round {} of {})",
                        by,
                        attempt + 1,
                        self.max_contest_retries + 1
                    );
                    self.state = ElectionState::Contested;
                }
            }
        }

        tracing::warn!(
            "Process [{}] still contested after {} retries, retrying next tick",
            self.node.name(),
            self.max_contest_retries
        );
        self.state = ElectionState::Idle;
        Ok(self.state)
    }

    /// Asks every other alive peer to concede, stopping at the first refusal.
    pub async fn inquiry_pass(&self, msg: &ElectionMessage) -> Result<InquiryOutcome> {
        let mut responsive = 0;

        for peer in self.other_peers().await? {
            if !self.participating(&peer).await {
                continue;
            }

            match self.peers.inquiry(&peer, msg).await {
                Ok(true) => responsive += 1,
                Ok(false) => return Ok(InquiryOutcome::Dissent { peer }),
                Err(e) => tracing::debug!("Inquiry skipped {}: {}", peer, e),
            }
        }

        Ok(InquiryOutcome::Clear { responsive })
    }

    /// Announces victory to every other alive peer. Not short-circuited: every lower
    /// peer must hear the claim so it can step down.
    pub async fn victory_pass(&self, msg: &ElectionMessage) -> Result<VictoryOutcome> {
        let mut notified = 0;
        let mut contested_by = Vec::new();

        for peer in self.other_peers().await? {
            if !self.participating(&peer).await {
                continue;
            }

            match self.peers.victory(&peer, msg).await {
                Ok(true) => notified += 1,
                Ok(false) => contested_by.push(peer),
                Err(e) => tracing::debug!("Victory skipped {}: {}", peer, e),
            }
        }

        if contested_by.is_empty() {
            Ok(VictoryOutcome::Accepted { notified })
        } else {
            Ok(VictoryOutcome::Contested { by: contested_by })
        }
    }

    async fn other_peers(&self) -> Result<Vec<String>> {
        let names = self.peers.registry().list().await?;
        Ok(names
            .into_iter()
            .filter(|name| name != self.node.name())
            .collect())
    }

    /// Dead or unreachable peers sit this round out.
    async fn participating(&self, peer: &str) -> bool {
        match self.peers.is_alive(peer).await {
            Ok(alive) => alive,
            Err(e) => {
                tracing::debug!("Excluding {} from round: {}", peer, e);
                false
            }
        }
    }
}
