//! # Session Client
//!
//! The client half of the tab session. Holds only an `mpsc::Sender`, so it
//! is cheap to clone and share; every method sends a request and awaits the
//! actor's answer on a oneshot channel.

use crate::error::TabError;
use crate::model::{TabId, TabSnapshot};
use crate::session::message::SessionRequest;
use tokio::sync::{mpsc, oneshot};

/// Type-safe handle for talking to a running [`SessionActor`](crate::session::SessionActor).
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub(crate) fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    /// Opens a new tab, selects it, and returns its id. Activation is
    /// scheduled immediately; the returned tab is still `Inactive`.
    pub async fn open_tab(&self) -> Result<TabId, TabError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::OpenTab { respond_to })
            .await
            .map_err(|_| TabError::SessionClosed)?;
        response.await.map_err(|_| TabError::SessionDropped)?
    }

    /// Makes `id` the active tab. Selecting the tab that is already active
    /// is a no-op; a missing id reports [`TabError::NotFound`].
    pub async fn select_tab(&self, id: TabId) -> Result<(), TabError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::SelectTab { id, respond_to })
            .await
            .map_err(|_| TabError::SessionClosed)?;
        response.await.map_err(|_| TabError::SessionDropped)?
    }

    /// Asks the session to close `id`. The tab stays in the collection
    /// until its pending transition settles and the close delay elapses.
    /// Requesting close twice is a no-op.
    pub async fn request_close(&self, id: TabId) -> Result<(), TabError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::RequestClose { id, respond_to })
            .await
            .map_err(|_| TabError::SessionClosed)?;
        response.await.map_err(|_| TabError::SessionDropped)?
    }

    /// Current state of the collection, for rendering or inspection.
    pub async fn snapshot(&self) -> Result<TabSnapshot, TabError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Snapshot { respond_to })
            .await
            .map_err(|_| TabError::SessionClosed)?;
        response.await.map_err(|_| TabError::SessionDropped)?
    }
}
