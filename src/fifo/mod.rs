//! FIFO Admission Module
//!
//! First-come-first-served admission for any shared resource. Ordinary locks and
//! semaphores make no promise about which waiter goes next; `FifoQueue` does.
//!
//! Each caller of `enter` appends its own single-use gate to the tail and waits on it.
//! `leave` opens the head gate, so waiters are released strictly in arrival order and a
//! caller only ever wakes on its own gate. Independent of the election logic.

pub mod queue;


pub use queue::{FifoQueue, QueueError};
