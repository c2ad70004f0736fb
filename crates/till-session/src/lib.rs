//! Session/identity hydration engine.
//!
//! One hydration pass resolves session -> profile -> company -> branches
//! for a user id. Passes are totally ordered by a monotonic sequence
//! counter and commit optimistically: last-issued wins, superseded passes
//! discard their results instead of being aborted. A watchdog guarantees
//! the loading flag never hangs, whatever the upstream services do.

pub mod engine;
pub mod error;
pub mod hydrator;
pub mod listener;
pub mod pass;
pub mod resolver;
pub mod snapshot;
pub mod watchdog;

pub use engine::SessionEngine;
pub use error::{Result, SessionError};
pub use hydrator::{ProfileHydrator, ProfileOutcome};
pub use listener::SessionListener;
pub use pass::{PassCounter, PassTicket};
pub use resolver::{CompanyContext, CompanyResolver};
pub use snapshot::SessionSnapshot;
pub use watchdog::Watchdog;

#[cfg(test)]
mod tests;
