//! # Tab Data Model
//!
//! Pure data structures describing a tab session: the tabs themselves, the
//! ordered collection they live in, and the read-only snapshot handed to the
//! presentation layer.
//!
//! # Architecture Note
//! Nothing in this module performs I/O or spawns tasks. All state changes go
//! through the pure reducer in [`crate::store`], and all read access from the
//! outside happens through [`TabSnapshot`]. The richer bookkeeping fields on
//! [`Tab`] (`transition`, `close`, `stalled`) are internal to the session and
//! deliberately absent from the snapshot.

use serde::Serialize;
use std::fmt;

/// Unique identifier of a tab.
///
/// Ids are allocated monotonically by the session and never reused, so a
/// stale id held by the presentation layer can only ever miss, never alias a
/// different tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Activation status of a tab. Exactly one at any time.
///
/// Status lags behind the active-tab selection because activation and
/// deactivation are asynchronous: a freshly selected tab stays `Inactive`
/// until its activation handshake settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Inactive,
    Active,
}

/// The in-flight activate or deactivate operation of a single tab.
///
/// # Architecture Note
/// Instead of chaining on a stored future, each started transition gets a
/// fresh generation token (`seq`). A settlement that arrives carrying a `seq`
/// that no longer matches the tab's current transition is discarded as stale.
/// This replaces "await the previous pending promise" with "compare
/// generation on settlement", which keeps the state plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub seq: u64,
    pub target: TabStatus,
}

/// Progress of a requested close.
///
/// - `Requested`: close intent recorded; the close drain starts once any
///   pending transition has settled.
/// - `Draining`: the close delay timer is running; removal follows.
///
/// While either phase is set the tab stays in the collection and remains
/// visible and selectable, but no new activate/deactivate transitions are
/// started for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePhase {
    Requested,
    Draining,
}

/// A single tab and its lifecycle bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub status: TabStatus,
    /// At most one in-flight transition; a new one is only started after the
    /// prior one has settled.
    pub transition: Option<PendingTransition>,
    pub close: Option<ClosePhase>,
    /// Set when a transition fails. Blocks automatic rescheduling until the
    /// tab is selected again.
    pub stalled: bool,
}

impl Tab {
    pub(crate) fn new(id: TabId) -> Self {
        Self {
            id,
            status: TabStatus::Inactive,
            transition: None,
            close: None,
            stalled: false,
        }
    }

    pub fn is_closing(&self) -> bool {
        self.close.is_some()
    }
}

/// The ordered collection of tabs owned by the session actor.
///
/// Insertion order is display order. `active_id` is `None` or the id of a
/// tab currently in the collection; it does not necessarily match the tab
/// whose status is `Active`, since activation is asynchronous.
#[derive(Debug, Clone, PartialEq)]
pub struct TabList {
    pub tabs: Vec<Tab>,
    pub active_id: Option<TabId>,
    /// Strictly increasing id counter. Never rewinds, so ids are never
    /// reused.
    pub next_id: u64,
}

impl TabList {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active_id: None,
            next_id: 1,
        }
    }

    /// The id the next `Opened` event will allocate.
    pub fn next_tab_id(&self) -> TabId {
        TabId::new(self.next_id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Derives the read-only view handed to the presentation layer.
    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            active_id: self.active_id,
            tabs: self
                .tabs
                .iter()
                .map(|tab| TabView {
                    id: tab.id,
                    status: tab.status,
                })
                .collect(),
        }
    }
}

impl Default for TabList {
    fn default() -> Self {
        Self::new()
    }
}

/// One tab as the presentation layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: TabId,
    pub status: TabStatus,
}

/// Immutable view of the session state at a point in time, suitable for
/// re-rendering after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TabSnapshot {
    pub active_id: Option<TabId>,
    pub tabs: Vec<TabView>,
}

impl TabSnapshot {
    pub fn status_of(&self, id: TabId) -> Option<TabStatus> {
        self.tabs
            .iter()
            .find(|view| view.id == id)
            .map(|view| view.status)
    }
}
