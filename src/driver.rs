//! # Transition Driver
//!
//! The seam between the session machinery and whatever actually performs a
//! tab's activation or deactivation. The production [`DelayDriver`] simulates
//! a remote handshake by sleeping a configured delay; tests substitute the
//! drivers in [`crate::mock`] to observe or fail transitions.

use crate::config::SessionConfig;
use crate::model::{TabId, TabStatus};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Failure of a backing activation or deactivation operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transition failed: {0}")]
pub struct DriverError(pub String);

/// Performs the asynchronous work behind a single transition.
///
/// The session actor spawns one `perform` call per started transition and
/// feeds its outcome back through the settlement channel. The driver never
/// touches session state; it only does (or simulates) the work.
#[async_trait]
pub trait TransitionDriver: Send + Sync + 'static {
    async fn perform(&self, id: TabId, target: TabStatus) -> Result<(), DriverError>;
}

/// Production driver: waits out the configured delay and always succeeds.
pub struct DelayDriver {
    activation: Duration,
    deactivation: Duration,
}

impl DelayDriver {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            activation: config.activation_delay(),
            deactivation: config.deactivation_delay(),
        }
    }
}

#[async_trait]
impl TransitionDriver for DelayDriver {
    async fn perform(&self, id: TabId, target: TabStatus) -> Result<(), DriverError> {
        let delay = match target {
            TabStatus::Active => self.activation,
            TabStatus::Inactive => self.deactivation,
        };
        debug!(%id, ?target, ?delay, "simulating handshake");
        tokio::time::sleep(delay).await;
        Ok(())
    }
}
