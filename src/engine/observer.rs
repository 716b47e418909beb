//! Collaborator hook for persistence.
//!
//! The engine hands a fresh snapshot to its observer after every committed
//! turn and after a reset. What happens next (write a file, push it to the
//! other client, nothing) is up to the observer; the engine does not wait
//! for or inspect the outcome.

use crate::snapshot::Snapshot;

/// Receives the state after each change.
pub trait StateObserver: Send {
    fn on_state_changed(&mut self, snapshot: &Snapshot);
}

impl<F> StateObserver for F
where
    F: FnMut(&Snapshot) + Send,
{
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        self(snapshot);
    }
}
