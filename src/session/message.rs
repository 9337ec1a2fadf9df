//! # Session Messages
//!
//! The two message families the actor consumes: requests from clients, and
//! settlements from the tasks it spawned itself.

use crate::driver::DriverError;
use crate::error::TabError;
use crate::model::{TabId, TabSnapshot, TabStatus};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, TabError>>;

/// A user intent forwarded by a [`SessionClient`](crate::session::SessionClient).
#[derive(Debug)]
pub enum SessionRequest {
    OpenTab { respond_to: Response<TabId> },
    SelectTab { id: TabId, respond_to: Response<()> },
    RequestClose { id: TabId, respond_to: Response<()> },
    Snapshot { respond_to: Response<TabSnapshot> },
}

/// Completion of asynchronous work the actor scheduled.
///
/// Settlements go through their own channel so a spawned task can never be
/// confused with an external caller, and the actor can keep a sender for its
/// own tasks without holding its request channel open.
#[derive(Debug)]
pub(crate) enum Settlement {
    /// A driver call finished, successfully or not. `seq` is the generation
    /// token of the transition that started it.
    Transition {
        id: TabId,
        seq: u64,
        target: TabStatus,
        outcome: Result<(), DriverError>,
    },
    /// The close drain timer for `id` elapsed.
    CloseElapsed { id: TabId },
}
