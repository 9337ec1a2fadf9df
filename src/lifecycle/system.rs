use crate::config::SessionConfig;
use crate::driver::{DelayDriver, TransitionDriver};
use crate::error::TabError;
use crate::model::TabSnapshot;
use crate::session::{SessionActor, SessionClient};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Request channel capacity; callers wait when the actor falls this far
/// behind.
const REQUEST_BUFFER: usize = 32;

/// The runtime orchestrator of a tab session.
///
/// `TabSystem` owns the session's lifecycle: it spawns the
/// [`SessionActor`], hands out the [`SessionClient`] and snapshot
/// subscriptions, and tears the session down on [`shutdown`](Self::shutdown).
/// Constructed once at session start; there are no hidden singletons.
///
/// # Example
///
/// ```ignore
/// let system = TabSystem::new(SessionConfig::default());
/// let tab = system.client.open_tab().await?;
/// system.client.select_tab(tab).await?;
/// system.shutdown().await?;
/// ```
pub struct TabSystem {
    /// Client for the session actor. Clone freely.
    pub client: SessionClient,
    snapshots: watch::Receiver<TabSnapshot>,
    handle: tokio::task::JoinHandle<()>,
}

impl TabSystem {
    /// Starts a session with the production [`DelayDriver`].
    pub fn new(config: SessionConfig) -> Self {
        let driver = Arc::new(DelayDriver::new(&config));
        Self::with_driver(config, driver)
    }

    /// Starts a session with a caller-supplied driver. This is the seam the
    /// mock drivers plug into.
    pub fn with_driver(config: SessionConfig, driver: Arc<dyn TransitionDriver>) -> Self {
        let (actor, client) = SessionActor::new(config, driver, REQUEST_BUFFER);
        let snapshots = actor.subscribe();
        let handle = tokio::spawn(actor.run());
        Self {
            client,
            snapshots,
            handle,
        }
    }

    /// A receiver that observes a fresh [`TabSnapshot`] after every
    /// mutation. This is the core-to-presentation half of the contract.
    pub fn subscribe(&self) -> watch::Receiver<TabSnapshot> {
        self.snapshots.clone()
    }

    /// Gracefully shuts the session down.
    ///
    /// Dropping the client closes the request channel; the actor drains and
    /// exits its loop, and we await its task. Clones of the client held
    /// elsewhere keep the session alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), TabError> {
        info!("shutting down tab session");
        drop(self.client);
        drop(self.snapshots);
        self.handle
            .await
            .map_err(|e| TabError::TaskFailed(e.to_string()))?;
        info!("tab session shutdown complete");
        Ok(())
    }
}
