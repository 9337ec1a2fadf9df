//! # Session Errors
//!
//! The error surface is deliberately small: a stale tab id is the only
//! domain error, and it is never fatal. The channel variants cover the
//! client side of the actor boundary.

use crate::driver::DriverError;
use crate::model::TabId;

/// Errors reported by the tab session.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    /// The referenced tab is no longer in the collection. Operations hitting
    /// this become no-ops; it is reported, never escalated.
    #[error("tab not found: {0}")]
    NotFound(TabId),
    /// The session actor is gone; its request channel is closed.
    #[error("session closed")]
    SessionClosed,
    /// The actor dropped the response channel before answering.
    #[error("session dropped response channel")]
    SessionDropped,
    /// A backing activation/deactivation operation failed.
    #[error(transparent)]
    Transition(#[from] DriverError),
    /// The session task panicked or was cancelled during shutdown.
    #[error("session task failed: {0}")]
    TaskFailed(String),
}
