use crate::engine::SessionEngine;

use std::sync::Arc;

use log::warn;
use till_platform::AuthEvent;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Background task that keeps the engine in lockstep with the auth client.
pub struct SessionListener;

impl SessionListener {
    /// Probe the session already held by the auth client once, then follow
    /// auth transitions until the event channel closes.
    ///
    /// The subscription is taken before the probe so a transition landing
    /// between the two is never lost.
    pub fn spawn(engine: Arc<SessionEngine>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut events = engine.auth().subscribe();

            if let Some(session) = engine.auth().current_session().await {
                engine
                    .handle_event(AuthEvent::SignedIn { user: session.user })
                    .await;
            }

            loop {
                match events.recv().await {
                    Ok(event) => engine.handle_event(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Auth event stream lagged, {skipped} events skipped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
