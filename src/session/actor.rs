//! # Session Actor
//!
//! The server half of the tab session. It owns the [`TabList`], the request
//! receiver, and the settlement channel its own spawned tasks report back
//! on. It processes one message at a time, so every structural mutation and
//! every scheduling decision is serialized through this single task. No
//! locks, no concurrent writers.
//!
//! # Architecture Note
//! The actor itself contains no lifecycle rules. Each message becomes a
//! [`TabEvent`] applied through the pure [`reduce`], after which [`plan`]
//! says which transitions or close drains to start. The actor's job is only
//! to execute those effects: allocate a generation token, record the start,
//! and spawn the task that will settle it. Between two awaits everything
//! here is synchronous, which is what makes the lifecycle race-free.

use crate::config::SessionConfig;
use crate::driver::TransitionDriver;
use crate::error::TabError;
use crate::model::{TabId, TabList, TabSnapshot, TabStatus};
use crate::session::client::SessionClient;
use crate::session::message::{SessionRequest, Settlement};
use crate::store::{plan, reduce, Effect, TabEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub struct SessionActor {
    requests: mpsc::Receiver<SessionRequest>,
    settlements: mpsc::Receiver<Settlement>,
    /// Cloned into every spawned task; the actor's own copy keeps the
    /// settlement channel open for the lifetime of the loop.
    settle_tx: mpsc::Sender<Settlement>,
    state: TabList,
    /// Generation counter for transition tokens. Global, so a `seq` is
    /// unique across all tabs and never ambiguous on settlement.
    next_seq: u64,
    config: SessionConfig,
    driver: Arc<dyn TransitionDriver>,
    snapshot_tx: watch::Sender<TabSnapshot>,
}

impl SessionActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it
    /// is full. The actor must be started with [`run`](Self::run), usually
    /// via `tokio::spawn`.
    pub fn new(
        config: SessionConfig,
        driver: Arc<dyn TransitionDriver>,
        buffer_size: usize,
    ) -> (Self, SessionClient) {
        let (sender, requests) = mpsc::channel(buffer_size);
        let (settle_tx, settlements) = mpsc::channel(buffer_size);
        let (snapshot_tx, _) = watch::channel(TabSnapshot::default());
        let actor = Self {
            requests,
            settlements,
            settle_tx,
            state: TabList::new(),
            next_seq: 0,
            config,
            driver,
            snapshot_tx,
        };
        let client = SessionClient::new(sender);
        (actor, client)
    }

    /// A receiver that yields a fresh [`TabSnapshot`] after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<TabSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Runs the event loop until every client is dropped.
    ///
    /// Requests and settlements are multiplexed onto the same loop, so
    /// settlement handling observes exactly the state left behind by
    /// whatever ran before it; the "freshly observed status" rule falls
    /// out of the message ordering.
    pub async fn run(mut self) {
        info!("session actor started");
        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => self.handle_request(request),
                    // All clients gone: tear down. In-flight timers are
                    // abandoned with the session.
                    None => break,
                },
                Some(settlement) = self.settlements.recv() => {
                    self.handle_settlement(settlement);
                }
            }
        }
        info!(tabs = self.state.tabs.len(), "session actor shutdown");
    }

    fn handle_request(&mut self, request: SessionRequest) {
        match request {
            SessionRequest::OpenTab { respond_to } => {
                let id = self.state.next_tab_id();
                self.apply(TabEvent::Opened);
                info!(%id, tabs = self.state.tabs.len(), "tab opened");
                let _ = respond_to.send(Ok(id));
            }
            SessionRequest::SelectTab { id, respond_to } => {
                let Some(tab) = self.state.get(id) else {
                    warn!(%id, "select: tab not found");
                    let _ = respond_to.send(Err(TabError::NotFound(id)));
                    return;
                };
                if self.state.active_id == Some(id) && !tab.stalled {
                    debug!(%id, "already the active tab");
                } else {
                    debug!(%id, previous = ?self.state.active_id, "tab selected");
                    self.apply(TabEvent::Selected { id });
                }
                let _ = respond_to.send(Ok(()));
            }
            SessionRequest::RequestClose { id, respond_to } => {
                let Some(tab) = self.state.get(id) else {
                    warn!(%id, "close: tab not found");
                    let _ = respond_to.send(Err(TabError::NotFound(id)));
                    return;
                };
                if tab.is_closing() {
                    debug!(%id, "close already in progress");
                } else {
                    info!(%id, "close requested");
                    self.apply(TabEvent::CloseRequested { id });
                }
                let _ = respond_to.send(Ok(()));
            }
            SessionRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.snapshot()));
            }
        }
    }

    fn handle_settlement(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Transition {
                id,
                seq,
                target,
                outcome,
            } => {
                let current = self
                    .state
                    .get(id)
                    .and_then(|tab| tab.transition)
                    .map(|pending| pending.seq);
                if current != Some(seq) {
                    // Tab removed, or a newer generation took over.
                    debug!(%id, seq, "stale transition settled, discarded");
                    return;
                }
                match outcome {
                    Ok(()) => {
                        info!(%id, seq, status = ?target, "transition settled");
                        self.apply(TabEvent::TransitionSettled {
                            id,
                            seq,
                            status: target,
                        });
                    }
                    Err(error) => {
                        warn!(%id, seq, %error, "transition failed");
                        self.apply(TabEvent::TransitionFailed { id, seq });
                    }
                }
            }
            Settlement::CloseElapsed { id } => {
                if self.state.contains(id) {
                    info!(%id, "tab closed");
                    self.apply(TabEvent::Removed { id });
                } else {
                    warn!(%id, "close elapsed but tab not found");
                }
            }
        }
    }

    /// Applies one event, starts whatever work the new state calls for, and
    /// publishes the resulting snapshot.
    fn apply(&mut self, event: TabEvent) {
        self.state = reduce(&self.state, &event);
        // A started effect records itself in the state, so one planning
        // pass converges; nothing it starts creates further work here.
        for effect in plan(&self.state) {
            match effect {
                Effect::StartTransition { id, target } => self.start_transition(id, target),
                Effect::StartClose { id } => self.start_close(id),
            }
        }
        let _ = self.snapshot_tx.send(self.state.snapshot());
    }

    fn start_transition(&mut self, id: TabId, target: TabStatus) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.state = reduce(&self.state, &TabEvent::TransitionStarted { id, seq, target });
        debug!(%id, seq, ?target, "transition started");
        let driver = Arc::clone(&self.driver);
        let settle = self.settle_tx.clone();
        tokio::spawn(async move {
            let outcome = driver.perform(id, target).await;
            let _ = settle
                .send(Settlement::Transition {
                    id,
                    seq,
                    target,
                    outcome,
                })
                .await;
        });
    }

    fn start_close(&mut self, id: TabId) {
        self.state = reduce(&self.state, &TabEvent::CloseStarted { id });
        let delay = self.config.close_delay();
        debug!(%id, ?delay, "close drain started");
        let settle = self.settle_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = settle.send(Settlement::CloseElapsed { id }).await;
        });
    }
}
