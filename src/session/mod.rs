//! Lobby presence and the local user's session.
//!
//! Transport is out of scope: presence is an injected `PresenceDirectory`,
//! and match state arrives as snapshots handed to
//! [`Session::receive_snapshot`].

pub mod presence;
#[allow(clippy::module_inception)]
pub mod session;

pub use presence::{InMemoryPresence, PresenceDirectory};
pub use session::Session;
