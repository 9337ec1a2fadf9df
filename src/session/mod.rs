//! # Tab Session Actor
//!
//! The actor boundary of the crate: [`SessionActor`] is the single writer of
//! the tab collection, [`SessionClient`] is the shared handle callers use to
//! reach it. Messages are defined in [`message`].

mod actor;
mod client;
pub(crate) mod message;

pub use actor::SessionActor;
pub use client::SessionClient;
pub use message::{Response, SessionRequest};
