//! Election Module
//!
//! A Bully-style election driven by randomised priorities over unreliable remote calls.
//!
//! ## Protocol
//! 1. **Scan**: if any peer reports `alive && leader`, there is nothing to do.
//! 2. **Inquiry**: ask every other alive peer whether it concedes to our priority.
//!    The first refusal abandons the round; the node returns to `Idle` until the next tick.
//! 3. **Victory**: announce to every other alive peer. Lower peers step down and accept;
//!    any contest sends the engine straight back to step 2, up to a bounded number of
//!    retries per tick.
//!
//! Unreachable or unresolvable peers are excluded from the round rather than aborting it,
//! so a node with no responsive peers wins by default.
//!
//! ## Convergence
//! Priorities are fixed while a node stays alive, so the highest-priority alive node meets
//! no dissent and no contest and converges to `Leader`. Equal priorities never concede to
//! each other (the comparison is strict), so two tied front-runners keep abandoning their
//! rounds; that cycling is observable and left unresolved.
//!
//! A node in `Leader` never scans or campaigns again. If a lower node claims leadership
//! just after the higher leader's victory pass has already stepped it down, both hold the
//! flag until one of them crashes (or a later victory pass reaches the lower one); the
//! split is not healed by subsequent ticks alone.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::ElectionEngine;
pub use types::{ElectionState, InquiryOutcome, VictoryOutcome};
