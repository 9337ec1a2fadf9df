//! # Tab Lifecycle
//!
//! A UI-independent core for a tabbed interface in which every tab has an
//! asynchronous activation/deactivation lifecycle, as if each tab performed
//! a remote handshake before becoming usable. The crate coordinates
//! open/select/close intents with time-delayed transition side effects,
//! guaranteeing at most one in-flight transition per tab and a clean,
//! ordered teardown on close.
//!
//! ## Architecture
//!
//! - **[model]**: Plain data: [`Tab`], [`TabList`], and the read-only
//!   [`TabSnapshot`] the presentation layer renders.
//! - **[store]**: A pure reducer `(state, event) -> state` plus a pure
//!   planner that derives which asynchronous work is due. Every lifecycle
//!   rule lives here and is testable without a runtime.
//! - **[session]**: The actor boundary. [`SessionActor`] is the single
//!   writer of the state; [`SessionClient`] is the cheap-clone handle that
//!   forwards intents over a channel.
//! - **[driver]**: The [`TransitionDriver`] seam behind which the (here:
//!   simulated) handshake runs. [`mock`] has test doubles.
//! - **[lifecycle]**: [`TabSystem`] orchestration (spawn, subscribe,
//!   shutdown) and tracing setup.
//!
//! ## Concurrency Model
//!
//! All state mutation is serialized through the session actor's task.
//! Transitions of different tabs run on concurrent timers, but their
//! settlements queue through the same loop, so each one observes the state
//! exactly as the previous message left it. There is no hard cancellation:
//! a transition always runs out, and its effect is discarded if its tab is
//! gone or a newer transition has superseded it by settlement time.
//!
//! ## Quick Start
//!
//! ```ignore
//! let system = TabSystem::new(SessionConfig::default());
//! let first = system.client.open_tab().await?;   // selected, activating
//! let second = system.client.open_tab().await?;  // first drifts inactive
//! system.client.select_tab(first).await?;
//! system.client.request_close(second).await?;    // removed after the delay
//! system.shutdown().await?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use driver::{DelayDriver, DriverError, TransitionDriver};
pub use error::TabError;
pub use lifecycle::{setup_tracing, TabSystem};
pub use model::{Tab, TabId, TabList, TabSnapshot, TabStatus, TabView};
pub use session::{SessionActor, SessionClient};
