use crate::pass::PassTicket;
use crate::snapshot::SessionSnapshot;

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Upper bound on how long a hydration pass may report as loading.
///
/// If a pass stalls past the deadline the watchdog clears the loading flag
/// so the UI never hangs on a spinner; the pass itself keeps running and
/// may still commit later.
pub struct Watchdog {
    timeout: Duration,
    slot: Mutex<Option<(u64, JoinHandle<()>)>>,
}

impl Watchdog {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            slot: Mutex::new(None),
        }
    }

    /// Arm the timer for a new pass. Any previous timer is cancelled; only
    /// the newest pass is ever watched.
    pub async fn arm(&self, ticket: PassTicket, state: Arc<RwLock<SessionSnapshot>>) {
        let mut slot = self.slot.lock().await;
        if let Some((_, handle)) = slot.take() {
            handle.abort();
        }

        let timeout = self.timeout;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            warn!(
                "Hydration pass {} still running after {timeout:?}, clearing loading flag",
                ticket.seq()
            );
            state.write().await.loading = false;
        });

        *slot = Some((ticket.seq(), handle));
    }

    /// Cancel the timer when its pass finishes. A superseded pass cannot
    /// disarm the timer a newer pass armed.
    pub async fn disarm(&self, ticket: PassTicket) {
        let mut slot = self.slot.lock().await;
        match slot.take() {
            Some((seq, handle)) if seq == ticket.seq() => handle.abort(),
            other => *slot = other,
        }
    }
}
