//! # System Lifecycle & Orchestration
//!
//! Owns the runtime concerns around the session actor: starting it, wiring
//! the driver in, handing out snapshot subscriptions, shutting down, and
//! observability setup.
//!
//! ## Shutdown
//!
//! 1. Drop the clients; the request channel closes.
//! 2. The actor's `recv()` returns `None` and its loop exits; timers still
//!    in flight are abandoned with it.
//! 3. Await the task handle.
//!
//! No messages already queued are lost; the actor processes them before it
//! observes the closed channel.

pub mod system;
pub mod tracing;

pub use system::TabSystem;
pub use tracing::setup_tracing;
