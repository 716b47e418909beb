//! Who is online.
//!
//! The session layer only needs three operations on the set of online
//! identities. Where that set lives (a shared file, a server, memory) is the
//! implementor's business.

/// Directory of online player identities.
pub trait PresenceDirectory {
    /// Online identities, in the order they came online.
    fn list(&self) -> Vec<String>;

    /// Mark `identity` online. Returns false if it already was.
    fn add(&mut self, identity: &str) -> bool;

    /// Mark `identity` offline. Returns false if it wasn't online.
    fn remove(&mut self, identity: &str) -> bool;
}

/// Process-local directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryPresence {
    online: Vec<String>,
}

impl InMemoryPresence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.online.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.online.is_empty()
    }
}

impl PresenceDirectory for InMemoryPresence {
    fn list(&self) -> Vec<String> {
        self.online.clone()
    }

    fn add(&mut self, identity: &str) -> bool {
        if self.online.iter().any(|p| p == identity) {
            return false;
        }
        self.online.push(identity.to_owned());
        true
    }

    fn remove(&mut self, identity: &str) -> bool {
        let before = self.online.len();
        self.online.retain(|p| p != identity);
        self.online.len() != before
    }
}
