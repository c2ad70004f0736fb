use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter that totally orders hydration passes.
///
/// Concurrency control is last-issued-wins: a pass may commit its results
/// only while it is still the newest issued pass. Superseded passes are
/// never aborted, they simply discard what they computed.
#[derive(Debug, Default)]
pub struct PassCounter {
    latest: AtomicU64,
}

/// Proof of participation in one hydration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTicket {
    seq: u64,
}

impl PassCounter {
    /// Issue the next ticket, superseding every earlier one.
    pub fn begin(&self) -> PassTicket {
        PassTicket {
            seq: self.latest.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Whether the ticket still belongs to the newest issued pass.
    pub fn is_current(&self, ticket: PassTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.seq
    }
}

impl PassTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}
