//! Election Module Tests
//!
//! ## Test Scopes
//! - **Convergence**: a static cluster with distinct priorities settles on exactly one leader,
//!   the highest-priority alive node.
//! - **Exclusion**: dead, unreachable and unresolvable peers are skipped, never fatal.
//! - **Contests**: contested victories are retried in a bounded loop; tied priorities cycle.
//! - **HTTP**: the same protocol over real sockets, including a peer that never answers.

#[cfg(test)]
mod tests {
    use crate::election::{ElectionEngine, ElectionState, InquiryOutcome, VictoryOutcome};
    use crate::error::Result;
    use crate::node::handlers;
    use crate::node::protocol::{NodeRequest, NodeResponse};
    use crate::node::{
        ElectionMessage, HttpTransport, LocalTransport, PeerClient, ProcessNode, Transport,
    };
    use crate::registry::{Endpoint, InMemoryRegistry, Registry};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const RETRIES: usize = 3;

    type LocalEngine = ElectionEngine<InMemoryRegistry, LocalTransport>;

    /// Builds an in-process cluster: one node + engine per `(name, priority)`.
    async fn local_cluster(
        members: &[(&str, u32)],
    ) -> (Arc<InMemoryRegistry>, Arc<LocalTransport>, Vec<LocalEngine>) {
        let registry = Arc::new(InMemoryRegistry::new());
        let transport = Arc::new(LocalTransport::new());
        let peers = PeerClient::new(registry.clone(), transport.clone());

        let mut engines = Vec::new();
        for (name, priority) in members {
            let node = ProcessNode::with_priority(name, *priority);
            let endpoint = transport.attach(node.clone());
            registry.register(name, endpoint).await.unwrap();
            engines.push(ElectionEngine::new(node, peers.clone(), RETRIES));
        }

        (registry, transport, engines)
    }

    async fn leaders(engines: &[LocalEngine]) -> Vec<String> {
        let mut names = Vec::new();
        for engine in engines {
            if engine.node().is_leader().await {
                names.push(engine.node().name().to_string());
            }
        }
        names
    }

    async fn tick_all(engines: &mut [LocalEngine], rounds: usize) {
        for _ in 0..rounds {
            for engine in engines.iter_mut() {
                engine.tick().await.unwrap();
            }
        }
    }

    // ============================================================
    // CONVERGENCE
    // ============================================================

    #[tokio::test]
    async fn test_highest_priority_converges_to_leader() {
        // ARRANGE: A=10, B=900, C=500
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900), ("C", 500)]).await;

        // ACT
        tick_all(&mut engines, 3).await;

        // ASSERT: exactly one leader, and it is B
        assert_eq!(leaders(&engines).await, vec!["B"]);
        assert_eq!(engines[1].state().await, ElectionState::Leader);
        assert_eq!(engines[0].state().await, ElectionState::Idle);
        assert_eq!(engines[2].state().await, ElectionState::Idle);
    }

    #[tokio::test]
    async fn test_convergence_independent_of_tick_order() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900), ("C", 500), ("D", 899)]).await;

        // Highest node ticks last in every round
        engines.rotate_left(2);
        tick_all(&mut engines, 2).await;

        assert_eq!(leaders(&engines).await, vec!["B"]);
    }

    #[tokio::test]
    async fn test_lower_node_abandons_round_on_dissent() {
        let (_registry, _transport, engines) = local_cluster(&[("A", 10), ("B", 900)]).await;
        let engine = &engines[0];

        let msg = engine.node().election_message().await;
        let outcome = engine.inquiry_pass(&msg).await.unwrap();

        assert_eq!(
            outcome,
            InquiryOutcome::Dissent {
                peer: "B".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_existing_leader_suppresses_election() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900), ("C", 500)]).await;
        tick_all(&mut engines, 1).await;

        // A later tick by a follower finds B and leaves everything as is
        let state = engines[2].tick().await.unwrap();

        assert_eq!(state, ElectionState::Idle);
        assert_eq!(
            engines[2].find_leader().await.unwrap(),
            Some("B".to_string())
        );
        assert_eq!(leaders(&engines).await, vec!["B"]);
    }

    #[tokio::test]
    async fn test_single_node_wins_by_default() {
        let (_registry, _transport, mut engines) = local_cluster(&[("solo", 1)]).await;

        let msg = engines[0].node().election_message().await;
        assert_eq!(
            engines[0].inquiry_pass(&msg).await.unwrap(),
            InquiryOutcome::Clear { responsive: 0 }
        );

        assert_eq!(engines[0].tick().await.unwrap(), ElectionState::Leader);
        assert!(engines[0].node().is_leader().await);
    }

    // ============================================================
    // EXCLUSION
    // ============================================================

    #[tokio::test]
    async fn test_dead_peer_is_excluded() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900), ("C", 500)]).await;
        engines[1].node().crash().await;

        tick_all(&mut engines, 2).await;

        assert_eq!(leaders(&engines).await, vec!["C"]);
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_excluded() {
        let (_registry, transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900), ("C", 500)]).await;
        transport.detach(&Endpoint::local("B"));

        // B still runs its own engine but nobody can reach it
        engines[0].tick().await.unwrap();
        engines[2].tick().await.unwrap();

        assert!(engines[2].node().is_leader().await);
        assert!(!engines[0].node().is_leader().await);
    }

    #[tokio::test]
    async fn test_unresolvable_peer_is_excluded() {
        let (registry, _transport, mut engines) = local_cluster(&[("A", 10)]).await;
        // Listed under a name whose endpoint nothing serves
        registry
            .register("phantom", Endpoint::local("nowhere"))
            .await
            .unwrap();

        assert_eq!(engines[0].tick().await.unwrap(), ElectionState::Leader);
    }

    #[tokio::test]
    async fn test_dead_node_does_not_campaign() {
        let (_registry, _transport, mut engines) = local_cluster(&[("A", 10)]).await;
        engines[0].node().crash().await;

        assert_eq!(engines[0].tick().await.unwrap(), ElectionState::Idle);
        assert!(!engines[0].node().is_leader().await);
    }

    #[tokio::test]
    async fn test_leader_state_reconciled_after_step_down() {
        let (_registry, _transport, mut engines) = local_cluster(&[("A", 10)]).await;
        engines[0].tick().await.unwrap();
        assert_eq!(engines[0].state().await, ElectionState::Leader);

        // A higher node (not in the registry yet) announces victory directly
        let accepted = engines[0]
            .node()
            .victory(&ElectionMessage::new("Z", 999))
            .await;

        assert!(accepted);
        assert_eq!(engines[0].state().await, ElectionState::Idle);
    }

    #[tokio::test]
    async fn test_victory_pass_steps_down_stale_leader() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900)]).await;
        // A became leader while B was away
        engines[0].node().claim_leadership(10).await;

        let msg = engines[1].node().election_message().await;
        let outcome = engines[1].victory_pass(&msg).await.unwrap();

        assert_eq!(outcome, VictoryOutcome::Accepted { notified: 1 });
        assert!(!engines[0].node().is_leader().await);
        assert_eq!(engines[0].state().await, ElectionState::Idle);
    }

    #[tokio::test]
    async fn test_late_claim_persists_until_crash() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("A", 10), ("B", 900)]).await;
        tick_all(&mut engines, 1).await;
        assert_eq!(leaders(&engines).await, vec!["B"]);

        // A's claim lands after B's victory pass already went through
        assert!(engines[0].node().claim_leadership(10).await);

        // B does not rescan and A only sees B leading, so ticks alone leave both flags set
        tick_all(&mut engines, 2).await;
        assert_eq!(leaders(&engines).await, vec!["A", "B"]);

        // A crash clears the stale claim
        engines[0].node().crash().await;
        assert_eq!(leaders(&engines).await, vec!["B"]);
    }

    // ============================================================
    // CONTESTS
    // ============================================================

    /// Lets a lower peer concede the inquiry but contest the victory a set number of
    /// times, reproducing the window where a peer's view changes between passes.
    struct ContestingTransport {
        inner: LocalTransport,
        contester: Endpoint,
        contests_left: AtomicUsize,
        victory_calls: AtomicUsize,
    }

    impl Transport for ContestingTransport {
        async fn call(&self, endpoint: &Endpoint, request: NodeRequest) -> Result<NodeResponse> {
            if endpoint == &self.contester && matches!(request, NodeRequest::Victory(_)) {
                self.victory_calls.fetch_add(1, Ordering::SeqCst);
                let contest = self
                    .contests_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok();
                if contest {
                    return Ok(NodeResponse::Flag(false));
                }
            }
            self.inner.call(endpoint, request).await
        }
    }

    async fn contested_engine(
        contests: usize,
    ) -> (
        ElectionEngine<InMemoryRegistry, ContestingTransport>,
        Arc<ContestingTransport>,
    ) {
        let registry = Arc::new(InMemoryRegistry::new());
        let inner = LocalTransport::new();

        let candidate = ProcessNode::with_priority("high", 800);
        let contester = ProcessNode::with_priority("low", 100);
        registry
            .register("high", inner.attach(candidate.clone()))
            .await
            .unwrap();
        let contester_endpoint = inner.attach(contester);
        registry
            .register("low", contester_endpoint.clone())
            .await
            .unwrap();

        let transport = Arc::new(ContestingTransport {
            inner,
            contester: contester_endpoint,
            contests_left: AtomicUsize::new(contests),
            victory_calls: AtomicUsize::new(0),
        });
        let peers = PeerClient::new(registry, transport.clone());

        (ElectionEngine::new(candidate, peers, RETRIES), transport)
    }

    #[tokio::test]
    async fn test_contest_is_retried_within_the_tick() {
        let (mut engine, transport) = contested_engine(2).await;

        let state = engine.tick().await.unwrap();

        assert_eq!(state, ElectionState::Leader);
        assert!(engine.node().is_leader().await);
        assert_eq!(transport.victory_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_persistent_contest_is_bounded() {
        let (mut engine, transport) = contested_engine(usize::MAX).await;

        let state = engine.tick().await.unwrap();

        assert_eq!(state, ElectionState::Idle);
        assert!(!engine.node().is_leader().await);
        assert_eq!(
            transport.victory_calls.load(Ordering::SeqCst),
            RETRIES + 1,
            "one initial round plus the retries"
        );
    }

    #[tokio::test]
    async fn test_tied_priorities_never_converge() {
        let (_registry, _transport, mut engines) =
            local_cluster(&[("X", 500), ("Y", 500), ("Z", 100)]).await;

        tick_all(&mut engines, 10).await;

        assert!(leaders(&engines).await.is_empty());
        for engine in engines.iter_mut() {
            assert_eq!(engine.state().await, ElectionState::Idle);
        }
    }

    // ============================================================
    // HTTP
    // ============================================================

    #[tokio::test]
    async fn test_election_over_http() {
        let registry = Arc::new(InMemoryRegistry::new());
        let peers = PeerClient::new(
            registry.clone(),
            Arc::new(HttpTransport::new(Duration::from_secs(2))),
        );

        let mut engines = Vec::new();
        for (name, priority) in [("A", 10), ("B", 900), ("C", 500)] {
            let node = ProcessNode::with_priority(name, priority);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let router = handlers::router(node.clone());
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            registry.register(name, Endpoint::http(addr)).await.unwrap();
            engines.push(ElectionEngine::new(node, peers.clone(), RETRIES));
        }

        for _ in 0..2 {
            for engine in engines.iter_mut() {
                engine.tick().await.unwrap();
            }
        }

        assert!(!engines[0].node().is_leader().await);
        assert!(engines[1].node().is_leader().await);
        assert!(!engines[2].node().is_leader().await);
    }

    /// Accepts connections and holds them open without ever answering.
    async fn spawn_silent_peer() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_timed_out_peer_is_excluded_over_http() {
        let registry = Arc::new(InMemoryRegistry::new());
        let peers = PeerClient::new(
            registry.clone(),
            Arc::new(HttpTransport::new(Duration::from_millis(200))),
        );

        let mut engines = Vec::new();
        for (name, priority) in [("A", 900), ("B", 10)] {
            let node = ProcessNode::with_priority(name, priority);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let router = handlers::router(node.clone());
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            registry.register(name, Endpoint::http(addr)).await.unwrap();
            engines.push(ElectionEngine::new(node, peers.clone(), RETRIES));
        }
        registry
            .register("hung", Endpoint::http(spawn_silent_peer().await))
            .await
            .unwrap();

        // A hung peer stalls each call only until the deadline, then sits the round out
        assert_eq!(engines[0].tick().await.unwrap(), ElectionState::Leader);
        assert_eq!(engines[1].tick().await.unwrap(), ElectionState::Idle);

        assert!(engines[0].node().is_leader().await);
        assert!(!engines[1].node().is_leader().await);
    }
}
