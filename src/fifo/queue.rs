use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueueError {
    /// `leave` with nobody waiting.
    #[error("no waiter to release")]
    Empty,

    /// `leave_batch(n)` asked for more waiters than are queued.
    #[error("cannot release {requested} waiters, only {available} queued")]
    BatchTooLarge { requested: usize, available: usize },

    /// The queue was dropped before this caller's gate opened.
    #[error("queue closed before the gate opened")]
    Closed,

    /// `enter_timeout` gave up waiting.
    #[error("gave up waiting after {0:?}")]
    TimedOut(Duration),
}

/// Single-use signal; sending on it opens the gate.
type Gate = oneshot::Sender<()>;

/// Ticket-ordered admission queue.
///
/// The mutex guards only the gate sequence and is never held while a caller waits.
#[derive(Default)]
pub struct FifoQueue {
    gates: Mutex<VecDeque<Gate>>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a ticket at the tail and waits until that ticket's gate opens.
    pub async fn enter(&self) -> Result<(), QueueError> {
        let opened = self.take_ticket().await;
        opened.await.map_err(|_| QueueError::Closed)
    }

    /// Like [`enter`](Self::enter), but abandons the ticket after `timeout`.
    /// An abandoned ticket is skipped by later `leave` calls, and a `leave` that
    /// reported success always corresponds to an `Ok` here.
    pub async fn enter_timeout(&self, timeout: Duration) -> Result<(), QueueError> {
        let mut opened = self.take_ticket().await;
        match tokio::time::timeout(timeout, &mut opened).await {
            Ok(result) => result.map_err(|_| QueueError::Closed),
            Err(_) => {
                // Closing first makes any later `leave` skip this gate; a release that
                // landed before the close still belongs to us.
                opened.close();
                match opened.try_recv() {
                    Ok(()) => Ok(()),
                    Err(_) => Err(QueueError::TimedOut(timeout)),
                }
            }
        }
    }

    async fn take_ticket(&self) -> oneshot::Receiver<()> {
        let (gate, opened) = oneshot::channel();
        self.gates.lock().await.push_back(gate);
        opened
    }

    /// Releases the longest-waiting caller.
    pub async fn leave(&self) -> Result<(), QueueError> {
        let mut gates = self.gates.lock().await;
        while let Some(gate) = gates.pop_front() {
            if gate.send(()).is_ok() {
                return Ok(());
            }
            tracing::trace!("Skipping abandoned gate");
        }
        Err(QueueError::Empty)
    }

    /// Releases the `n` longest-waiting callers at once.
    ///
    /// Fails, releasing nobody, if fewer than `n` callers are waiting.
    pub async fn leave_batch(&self, n: usize) -> Result<usize, QueueError> {
        let mut gates = self.gates.lock().await;
        gates.retain(|gate| !gate.is_closed());

        if n > gates.len() {
            return Err(QueueError::BatchTooLarge {
                requested: n,
                available: gates.len(),
            });
        }

        let mut released = 0;
        for gate in gates.drain(..n) {
            // A waiter can still abandon between the prune and the send
            if gate.send(()).is_ok() {
                released += 1;
            }
        }
        Ok(released)
    }

    /// Advisory count of callers currently waiting.
    pub async fn size(&self) -> usize {
        let mut gates = self.gates.lock().await;
        gates.retain(|gate| !gate.is_closed());
        gates.len()
    }
}
